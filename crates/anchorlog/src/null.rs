use std::sync::Arc;

use anchorlog_core::{AtomicLevel, Field, Level, LogError, Logger, MergeContext, PrinterOption, RootLogger};

/// Root that discards everything.
#[derive(Debug, Default)]
pub struct NullLogger {
    min_level: AtomicLevel,
}

impl NullLogger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Logger for NullLogger {
    fn log_impl(
        &self,
        _level: Level,
        _msg: &str,
        _fields: &[Field],
        _opts: &[PrinterOption],
        _ctx: MergeContext,
    ) {
    }

    fn min_level(&self) -> Level {
        self.min_level.get()
    }

    fn set_min_level(&self, level: Level) {
        self.min_level.set(level);
    }
}

impl RootLogger for NullLogger {
    fn close(&self) -> Result<(), LogError> {
        Ok(())
    }

    fn into_logger(self: Arc<Self>) -> Arc<dyn Logger> {
        self
    }
}
