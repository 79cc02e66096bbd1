use std::sync::Arc;

use anchorlog_core::{AnchorRemover, AtomicLevel, Field, Level, Logger, MergeContext, PrinterOption};

/// Stand-in for an anchor when nothing on the chain can anchor lines.
///
/// Calls pass straight through; removing it does nothing, and in particular
/// never reaches an anchor further up the chain.
pub struct NoAnchorLogger {
    parent: Arc<dyn Logger>,
    min_level: AtomicLevel,
}

impl NoAnchorLogger {
    pub fn new(parent: Arc<dyn Logger>) -> Self {
        Self {
            parent,
            min_level: AtomicLevel::default(),
        }
    }
}

impl Logger for NoAnchorLogger {
    fn log_impl(
        &self,
        level: Level,
        msg: &str,
        fields: &[Field],
        opts: &[PrinterOption],
        mut ctx: MergeContext,
    ) {
        ctx.merge_min_level(self.min_level.get());
        self.parent.log_impl(level, msg, fields, opts, ctx);
    }

    fn min_level(&self) -> Level {
        self.min_level.get()
    }

    fn set_min_level(&self, level: Level) {
        self.min_level.set(level);
    }

    fn parent(&self) -> Option<Arc<dyn Logger>> {
        Some(Arc::clone(&self.parent))
    }

    fn anchor_remover(&self) -> Option<&dyn AnchorRemover> {
        Some(self)
    }
}

impl AnchorRemover for NoAnchorLogger {
    fn remove_anchor(&self) {}
}

impl std::fmt::Debug for NoAnchorLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoAnchorLogger")
            .field("min_level", &self.min_level.get())
            .finish_non_exhaustive()
    }
}
