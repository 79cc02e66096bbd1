//! Loggers that wrap a parent and forward to it.
//!
//! A decorator never writes anything itself: it merges its local
//! configuration into the [`MergeContext`](anchorlog_core::MergeContext) and
//! hands the call up. The merge rules are:
//!
//! - the effective minimum level is the highest local minimum on the path,
//! - fields from decorators nearer the root come first,
//! - options are applied root-side first, so those nearest the call site
//!   (and per-call options last of all) win.

mod anchor;
mod custom;
mod noanchor;
mod tee;

use std::sync::Arc;

use anchorlog_core::{Field, Logger, PrinterOption};

pub use anchor::AnchoredLogger;
pub use custom::CustomLogger;
pub use noanchor::NoAnchorLogger;
pub use tee::{RootTee, TeeLogger, root_tee};

/// Wraps `parent` so every call carries `fields` in front of its own.
pub fn with_fields(parent: &Arc<dyn Logger>, fields: &[Field]) -> Arc<dyn Logger> {
    Arc::new(CustomLogger::new(Arc::clone(parent), fields.to_vec(), Vec::new()))
}

/// Wraps `parent` so every call is rendered with `opts` unless the call
/// overrides them.
pub fn with_options(parent: &Arc<dyn Logger>, opts: &[PrinterOption]) -> Arc<dyn Logger> {
    Arc::new(CustomLogger::new(Arc::clone(parent), Vec::new(), opts.to_vec()))
}

/// [`with_fields`] and [`with_options`] in one decorator.
pub fn with_options_and_fields(
    parent: &Arc<dyn Logger>,
    opts: &[PrinterOption],
    fields: &[Field],
) -> Arc<dyn Logger> {
    Arc::new(CustomLogger::new(Arc::clone(parent), fields.to_vec(), opts.to_vec()))
}

/// Duplicates every call to `primary` and `secondary`.
pub fn tee(primary: &Arc<dyn Logger>, secondary: &Arc<dyn Logger>) -> Arc<dyn Logger> {
    Arc::new(TeeLogger::new(Arc::clone(primary), Arc::clone(secondary)))
}

#[cfg(test)]
pub(crate) mod recorder {
    use std::sync::Mutex;

    use anchorlog_core::{AtomicLevel, Field, Level, Logger, MergeContext, PrinterOption};

    /// One call as seen by a root.
    #[derive(Debug, Clone)]
    pub(crate) struct Call {
        pub(crate) level: Level,
        pub(crate) msg: String,
        pub(crate) fields: Vec<Field>,
        pub(crate) opts: Vec<PrinterOption>,
        pub(crate) ctx: MergeContext,
    }

    /// Root that records what reaches it without filtering.
    #[derive(Default)]
    pub(crate) struct Recorder {
        pub(crate) calls: Mutex<Vec<Call>>,
        min_level: AtomicLevel,
    }

    impl Recorder {
        pub(crate) fn take(&self) -> Vec<Call> {
            std::mem::take(&mut *self.calls.lock().unwrap())
        }
    }

    impl Logger for Recorder {
        fn log_impl(
            &self,
            level: Level,
            msg: &str,
            fields: &[Field],
            opts: &[PrinterOption],
            ctx: MergeContext,
        ) {
            self.calls.lock().unwrap().push(Call {
                level,
                msg: msg.to_string(),
                fields: fields.to_vec(),
                opts: opts.to_vec(),
                ctx,
            });
        }

        fn min_level(&self) -> Level {
            self.min_level.get()
        }

        fn set_min_level(&self, level: Level) {
            self.min_level.set(level);
        }
    }
}
