//! Capability traits shared by roots and decorators.
//!
//! Every logger is a [`Logger`]. A few also expose optional capabilities
//! through the `anchor_adder` / `anchor_remover` hooks; only the
//! chain-walking helpers in the `anchorlog` crate look at those.

use std::sync::Arc;

use crate::context::MergeContext;
use crate::error::LogError;
use crate::field::Field;
use crate::level::Level;
use crate::options::PrinterOption;

/// Exit code used after a fatal message has been flushed.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Terminates the process after a fatal message.
///
/// Callers must have already flushed every root on the path; the provided
/// [`Logger::fatal`] does this by going through `log_impl` first.
pub fn exit_fatal() -> ! {
    std::process::exit(FATAL_EXIT_CODE)
}

/// Something that accepts log calls.
///
/// Decorators merge their local configuration into the [`MergeContext`] and
/// forward to their parent; roots decide whether to print and own the sink.
pub trait Logger: Send + Sync {
    /// Merges this logger's configuration into `ctx` and forwards (or, for a
    /// root, prints).
    ///
    /// A root receiving a `Fatal` message flushes everything it has accepted
    /// before returning.
    fn log_impl(
        &self,
        level: Level,
        msg: &str,
        fields: &[Field],
        opts: &[PrinterOption],
        ctx: MergeContext,
    );

    /// The local minimum level.
    fn min_level(&self) -> Level;

    /// Replaces the local minimum level.
    fn set_min_level(&self, level: Level);

    /// The logger this one forwards to, if any.
    fn parent(&self) -> Option<Arc<dyn Logger>> {
        None
    }

    /// Capability hook: this logger can create anchored lines.
    fn anchor_adder(&self) -> Option<&dyn AnchorAdder> {
        None
    }

    /// Capability hook: this logger owns an anchored line it can release.
    fn anchor_remover(&self) -> Option<&dyn AnchorRemover> {
        None
    }

    /// Logs with per-call printer options. Exits the process on `Fatal`.
    fn log_with(&self, level: Level, msg: &str, fields: &[Field], opts: &[PrinterOption]) {
        self.log_impl(level, msg, fields, opts, MergeContext::new());
        if level == Level::Fatal {
            exit_fatal();
        }
    }

    /// Logs at `level`. Exits the process on `Fatal`.
    fn log(&self, level: Level, msg: &str, fields: &[Field]) {
        self.log_with(level, msg, fields, &[]);
    }

    fn transient(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Transient, msg, fields);
    }

    fn verbose(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Verbose, msg, fields);
    }

    fn info(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Info, msg, fields);
    }

    fn warning(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Warning, msg, fields);
    }

    fn error(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Error, msg, fields);
    }

    /// Logs, flushes every root on the path, then exits the process.
    fn fatal(&self, msg: &str, fields: &[Field]) -> ! {
        self.log_impl(Level::Fatal, msg, fields, &[], MergeContext::new());
        exit_fatal()
    }
}

/// A logger able to anchor new lines to the bottom of its output.
pub trait AnchorAdder {
    /// Reserves a new anchored line and returns a handle forwarding to
    /// `parent` (the logger the caller asked to anchor).
    fn add_anchor(&self, parent: Arc<dyn Logger>) -> Arc<dyn Logger>;
}

/// A logger owning an anchored line.
pub trait AnchorRemover {
    /// Releases the anchored line. Calls after the first do nothing.
    fn remove_anchor(&self);
}

/// A logger at the top of a chain, owning its output.
pub trait RootLogger: Logger {
    /// Flushes everything accepted so far and releases the sink.
    ///
    /// Safe to call more than once and from several threads; every call
    /// returns only once shutdown has completed.
    fn close(&self) -> Result<(), LogError>;

    /// This root as a plain [`Logger`], for use as a decorator parent.
    fn into_logger(self: Arc<Self>) -> Arc<dyn Logger>;
}
