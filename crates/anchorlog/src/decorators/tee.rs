//! Fan-out loggers.
//!
//! Only the primary side takes part in anchoring: the secondary never sees
//! an anchored-line id, since it has no idea what the primary's screen
//! looks like.

use std::sync::Arc;

use anchorlog_core::{
    AnchorAdder, AtomicLevel, Field, Level, LogError, Logger, MergeContext, PrinterOption, RootLogger,
};

fn fan_out<P, S>(
    primary: &P,
    secondary: &S,
    level: Level,
    msg: &str,
    fields: &[Field],
    opts: &[PrinterOption],
    ctx: MergeContext,
) where
    P: Logger + ?Sized,
    S: Logger + ?Sized,
{
    let mut plain = ctx.clone();
    plain.anchored_line = 0;
    primary.log_impl(level, msg, fields, opts, ctx);
    secondary.log_impl(level, msg, fields, opts, plain);
}

/// Duplicates every call to two loggers.
pub struct TeeLogger {
    primary: Arc<dyn Logger>,
    secondary: Arc<dyn Logger>,
    min_level: AtomicLevel,
}

impl TeeLogger {
    pub fn new(primary: Arc<dyn Logger>, secondary: Arc<dyn Logger>) -> Self {
        Self {
            primary,
            secondary,
            min_level: AtomicLevel::default(),
        }
    }
}

impl Logger for TeeLogger {
    fn log_impl(
        &self,
        level: Level,
        msg: &str,
        fields: &[Field],
        opts: &[PrinterOption],
        mut ctx: MergeContext,
    ) {
        ctx.merge_min_level(self.min_level.get());
        fan_out(&*self.primary, &*self.secondary, level, msg, fields, opts, ctx);
    }

    fn min_level(&self) -> Level {
        self.min_level.get()
    }

    fn set_min_level(&self, level: Level) {
        self.min_level.set(level);
    }

    /// The primary side; anchors are looked up there.
    fn parent(&self) -> Option<Arc<dyn Logger>> {
        Some(Arc::clone(&self.primary))
    }
}

impl std::fmt::Debug for TeeLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeeLogger")
            .field("min_level", &self.min_level.get())
            .finish_non_exhaustive()
    }
}

/// A tee over two roots, itself usable as a root.
///
/// Anchors are added on the primary but bound to the tee, so anchored
/// output reaches both sides. Closing closes both roots.
pub struct RootTee {
    primary: Arc<dyn RootLogger>,
    secondary: Arc<dyn RootLogger>,
    min_level: AtomicLevel,
}

impl RootTee {
    pub fn new(primary: Arc<dyn RootLogger>, secondary: Arc<dyn RootLogger>) -> Self {
        Self {
            primary,
            secondary,
            min_level: AtomicLevel::default(),
        }
    }
}

/// Tees two roots and returns the combined root.
pub fn root_tee(primary: Arc<dyn RootLogger>, secondary: Arc<dyn RootLogger>) -> Arc<RootTee> {
    Arc::new(RootTee::new(primary, secondary))
}

impl Logger for RootTee {
    fn log_impl(
        &self,
        level: Level,
        msg: &str,
        fields: &[Field],
        opts: &[PrinterOption],
        mut ctx: MergeContext,
    ) {
        ctx.merge_min_level(self.min_level.get());
        fan_out(&*self.primary, &*self.secondary, level, msg, fields, opts, ctx);
    }

    fn min_level(&self) -> Level {
        self.min_level.get()
    }

    fn set_min_level(&self, level: Level) {
        self.min_level.set(level);
    }

    fn anchor_adder(&self) -> Option<&dyn AnchorAdder> {
        self.primary.anchor_adder()
    }
}

impl RootLogger for RootTee {
    /// Closes both roots, primary first. Both are closed even if the first
    /// fails; the first error is returned.
    fn close(&self) -> Result<(), LogError> {
        let primary = self.primary.close();
        let secondary = self.secondary.close();
        primary.and(secondary)
    }

    fn into_logger(self: Arc<Self>) -> Arc<dyn Logger> {
        self
    }
}

impl std::fmt::Debug for RootTee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RootTee")
            .field("min_level", &self.min_level.get())
            .finish_non_exhaustive()
    }
}
