//! `log` crate records forwarded to a [`Logger`].

use std::sync::Arc;

use log::{LevelFilter, Log, Metadata, Record};

use anchorlog_core::{Field, Level, LogError, Logger};

/// Maps a `log` level onto an anchorlog level.
///
/// `log` has no transient or fatal levels; `Debug` and `Trace` both become
/// [`Level::Verbose`].
#[must_use]
pub fn level_from_log(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warning,
        log::Level::Info => Level::Info,
        log::Level::Debug | log::Level::Trace => Level::Verbose,
    }
}

/// A `log` crate logger forwarding every record to an anchorlog [`Logger`].
pub struct LogBridge {
    logger: Arc<dyn Logger>,
    max_level: LevelFilter,
    with_targets: bool,
}

impl LogBridge {
    /// Create a bridge forwarding records at `Info` and above.
    #[must_use]
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        LogBridgeBuilder::new().build(logger)
    }

    /// Create a bridge using the builder pattern.
    #[must_use]
    pub fn builder() -> LogBridgeBuilder {
        LogBridgeBuilder::new()
    }
}

/// Builder for configuring the `log` bridge.
#[derive(Debug)]
pub struct LogBridgeBuilder {
    max_level: LevelFilter,
    with_targets: bool,
}

impl Default for LogBridgeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LogBridgeBuilder {
    /// Create a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_level: LevelFilter::Info,
            with_targets: true,
        }
    }

    /// Set the most verbose `log` level forwarded.
    #[must_use]
    pub fn level(mut self, filter: LevelFilter) -> Self {
        self.max_level = filter;
        self
    }

    /// Set whether to attach the record target as a `target` field.
    #[must_use]
    pub fn with_targets(mut self, show: bool) -> Self {
        self.with_targets = show;
        self
    }

    /// Build the bridge without installing it.
    #[must_use]
    pub fn build(self, logger: Arc<dyn Logger>) -> LogBridge {
        LogBridge {
            logger,
            max_level: self.max_level,
            with_targets: self.with_targets,
        }
    }

    /// Build and install as the global `log` logger.
    ///
    /// Returns an error if a logger has already been set.
    pub fn init(self, logger: Arc<dyn Logger>) -> Result<(), LogError> {
        let level = self.max_level;
        log::set_boxed_logger(Box::new(self.build(logger)))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = record.args().to_string();
        let level = level_from_log(record.level());
        // `Arc<T>` implements `Log` too, so name the trait explicitly.
        if self.with_targets {
            Logger::log(&*self.logger, level, &message, &[Field::string("target", record.target())]);
        } else {
            Logger::log(&*self.logger, level, &message, &[]);
        }
    }

    fn flush(&self) {}
}

impl std::fmt::Debug for LogBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogBridge")
            .field("max_level", &self.max_level)
            .field("with_targets", &self.with_targets)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorators::recorder::Recorder;

    fn metadata(level: log::Level) -> Metadata<'static> {
        Metadata::builder().level(level).target("test").build()
    }

    #[test]
    fn test_bridge_enabled() {
        let bridge = LogBridge::new(Arc::new(Recorder::default()));

        assert!(bridge.enabled(&metadata(log::Level::Error)));
        assert!(bridge.enabled(&metadata(log::Level::Warn)));
        assert!(bridge.enabled(&metadata(log::Level::Info)));
        assert!(!bridge.enabled(&metadata(log::Level::Debug)));
        assert!(!bridge.enabled(&metadata(log::Level::Trace)));
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(level_from_log(log::Level::Error), Level::Error);
        assert_eq!(level_from_log(log::Level::Warn), Level::Warning);
        assert_eq!(level_from_log(log::Level::Info), Level::Info);
        assert_eq!(level_from_log(log::Level::Debug), Level::Verbose);
        assert_eq!(level_from_log(log::Level::Trace), Level::Verbose);
    }

    #[test]
    fn test_records_are_forwarded_with_target() {
        let root = Arc::new(Recorder::default());
        let bridge = LogBridge::builder().level(LevelFilter::Trace).build(root.clone());

        bridge.log(
            &Record::builder()
                .args(format_args!("disk at {}%", 93))
                .level(log::Level::Warn)
                .target("app::disk")
                .build(),
        );
        bridge.log(
            &Record::builder()
                .args(format_args!("details"))
                .level(log::Level::Trace)
                .target("app")
                .build(),
        );

        let calls = root.take();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].level, Level::Warning);
        assert_eq!(calls[0].msg, "disk at 93%");
        assert_eq!(calls[0].fields, [Field::string("target", "app::disk")]);
        assert_eq!(calls[1].level, Level::Verbose);
    }

    #[test]
    fn test_filtered_records_are_dropped() {
        let root = Arc::new(Recorder::default());
        let bridge = LogBridge::builder().level(LevelFilter::Warn).build(root.clone());
        bridge.log(
            &Record::builder()
                .args(format_args!("chatty"))
                .level(log::Level::Info)
                .build(),
        );
        assert!(root.take().is_empty());
    }

    #[test]
    fn test_without_targets() {
        let root = Arc::new(Recorder::default());
        let bridge = LogBridge::builder().with_targets(false).build(root.clone());
        bridge.log(
            &Record::builder()
                .args(format_args!("bare"))
                .level(log::Level::Error)
                .build(),
        );
        assert!(root.take()[0].fields.is_empty());
    }

    #[test]
    fn test_builder_default() {
        let builder = LogBridgeBuilder::default();
        assert_eq!(builder.max_level, LevelFilter::Info);
        assert!(builder.with_targets);
    }
}
