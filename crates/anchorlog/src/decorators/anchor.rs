//! Handle to one anchored line.

use std::sync::{Arc, PoisonError, RwLock};

use anchorlog_core::{AnchorRemover, AtomicLevel, Field, Level, Logger, MergeContext, PrinterOption};

type Release = Box<dyn FnOnce() + Send + Sync>;

/// A logger bound to an anchored line.
///
/// Transient calls redraw the anchored line in place; every other level
/// scrolls above the anchored block as usual. Once released (explicitly or
/// by dropping the last handle) the line disappears and transient calls go
/// through as ordinary, level-filtered calls.
pub struct AnchoredLogger {
    parent: Arc<dyn Logger>,
    line: u32,
    min_level: AtomicLevel,
    // Held for reading across each forward so a release waits for in-flight
    // writes to the line.
    release: RwLock<Option<Release>>,
}

impl AnchoredLogger {
    /// Binds a handle to `line`. `release` runs exactly once, on removal or
    /// drop.
    pub fn new(parent: Arc<dyn Logger>, line: u32, release: Release) -> Self {
        Self {
            parent,
            line,
            min_level: AtomicLevel::default(),
            release: RwLock::new(Some(release)),
        }
    }

    /// Id of the anchored line.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[must_use]
    pub fn is_released(&self) -> bool {
        self.release
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }
}

impl Logger for AnchoredLogger {
    fn log_impl(
        &self,
        level: Level,
        msg: &str,
        fields: &[Field],
        opts: &[PrinterOption],
        mut ctx: MergeContext,
    ) {
        ctx.merge_min_level(self.min_level.get());

        let release = self.release.read().unwrap_or_else(PoisonError::into_inner);
        if level != Level::Transient {
            ctx.anchored_line = 0;
        } else if release.is_some() && ctx.anchored_line == 0 {
            ctx.anchored_line = self.line;
        }
        self.parent.log_impl(level, msg, fields, opts, ctx);
        drop(release);
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

impl AnchorRemover for AnchoredLogger {
    fn remove_anchor(&self) {
        let release = self
            .release
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(release) = release {
            release();
        }
    }
}

impl Drop for AnchoredLogger {
    fn drop(&mut self) {
        let release = self
            .release
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(release) = release {
            release();
        }
    }
}

impl std::fmt::Debug for AnchoredLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnchoredLogger")
            .field("line", &self.line)
            .field("min_level", &self.min_level.get())
            .field("released", &self.is_released())
            .finish_non_exhaustive()
    }
}
