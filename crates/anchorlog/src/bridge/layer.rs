//! Tracing subscriber integration.
//!
//! Provides a tracing `Layer` and builder that forward events to an
//! anchorlog [`Logger`] as structured fields.

use std::fmt;
use std::sync::Arc;

use tracing::field::{Field as TracingField, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;

use anchorlog_core::{Field, Level, LogError, Logger};

/// Maps a tracing level onto an anchorlog level.
#[must_use]
pub fn level_from_tracing(level: tracing::Level) -> Level {
    match level {
        tracing::Level::ERROR => Level::Error,
        tracing::Level::WARN => Level::Warning,
        tracing::Level::INFO => Level::Info,
        _ => Level::Verbose,
    }
}

/// A tracing layer that forwards events to a [`Logger`].
pub struct AnchorLayer {
    logger: Arc<dyn Logger>,
    with_targets: bool,
}

impl AnchorLayer {
    /// Create a new layer.
    #[must_use]
    pub fn new(logger: Arc<dyn Logger>, with_targets: bool) -> Self {
        Self { logger, with_targets }
    }
}

#[derive(Default)]
struct FieldCollector {
    message: Option<String>,
    fields: Vec<Field>,
}

impl FieldCollector {
    fn record_field(&mut self, field: &TracingField, value: Field) {
        if field.name() == "message" {
            if self.message.is_none() {
                self.message = Some(value.value);
            }
        } else {
            self.fields.push(value);
        }
    }
}

impl Visit for FieldCollector {
    fn record_debug(&mut self, field: &TracingField, value: &dyn fmt::Debug) {
        self.record_field(field, Field::string(field.name(), format!("{value:?}")));
    }

    fn record_str(&mut self, field: &TracingField, value: &str) {
        self.record_field(field, Field::string(field.name(), value));
    }

    fn record_bool(&mut self, field: &TracingField, value: bool) {
        self.record_field(field, Field::bool(field.name(), value));
    }

    fn record_i64(&mut self, field: &TracingField, value: i64) {
        self.record_field(field, Field::int(field.name(), value));
    }

    fn record_u64(&mut self, field: &TracingField, value: u64) {
        self.record_field(field, Field::uint(field.name(), value));
    }

    fn record_f64(&mut self, field: &TracingField, value: f64) {
        self.record_field(field, Field::float(field.name(), value));
    }

    fn record_error(&mut self, field: &TracingField, value: &(dyn std::error::Error + 'static)) {
        self.record_field(field, Field::string(field.name(), value.to_string()));
    }
}

impl<S> Layer<S> for AnchorLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut collector = FieldCollector::default();
        event.record(&mut collector);

        if let Some(scope) = ctx.event_scope(event) {
            let spans: Vec<&str> = scope.from_root().map(|span| span.name()).collect();
            if !spans.is_empty() {
                collector.fields.push(Field::string("span", spans.join("::")));
            }
        }
        if self.with_targets {
            collector.fields.push(Field::string("target", metadata.target()));
        }

        let message = collector
            .message
            .unwrap_or_else(|| metadata.name().to_string());
        self.logger
            .log(level_from_tracing(*metadata.level()), &message, &collector.fields);
    }
}

/// Builder for a tracing subscriber that forwards to a [`Logger`].
#[derive(Debug)]
pub struct AnchorSubscriberBuilder {
    with_targets: bool,
    level_filter: LevelFilter,
}

impl Default for AnchorSubscriberBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AnchorSubscriberBuilder {
    /// Create a new builder with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            with_targets: false,
            level_filter: LevelFilter::INFO,
        }
    }

    /// Toggle the `target` field.
    #[must_use]
    pub fn with_targets(mut self, show: bool) -> Self {
        self.with_targets = show;
        self
    }

    /// Set the minimum log level.
    #[must_use]
    pub fn with_level_filter(mut self, filter: LevelFilter) -> Self {
        self.level_filter = filter;
        self
    }

    /// Build the subscriber without installing it.
    #[must_use]
    pub fn build(self, logger: Arc<dyn Logger>) -> impl Subscriber + Send + Sync {
        tracing_subscriber::registry()
            .with(self.level_filter)
            .with(AnchorLayer::new(logger, self.with_targets))
    }

    /// Build and install as the global subscriber.
    pub fn init(self, logger: Arc<dyn Logger>) -> Result<(), LogError> {
        tracing::subscriber::set_global_default(self.build(logger))
            .map_err(|e| LogError::SetSubscriber(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decorators::recorder::Recorder;

    fn capture(builder: AnchorSubscriberBuilder, f: impl FnOnce()) -> Vec<crate::decorators::recorder::Call> {
        let root = Arc::new(Recorder::default());
        let subscriber = builder.build(root.clone());
        tracing::subscriber::with_default(subscriber, f);
        root.take()
    }

    #[test]
    fn test_builder_defaults() {
        let builder = AnchorSubscriberBuilder::default();
        assert!(!builder.with_targets);
        assert_eq!(builder.level_filter, LevelFilter::INFO);
    }

    #[test]
    fn test_event_fields_are_typed() {
        let calls = capture(AnchorSubscriberBuilder::new(), || {
            tracing::warn!(retries = 3u64, delta = -2i64, ok = false, host = "db1", "reconnecting");
        });

        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].level, Level::Warning);
        assert_eq!(calls[0].msg, "reconnecting");
        assert_eq!(
            calls[0].fields,
            [
                Field::uint("retries", 3u64),
                Field::int("delta", -2i64),
                Field::bool("ok", false),
                Field::string("host", "db1"),
            ]
        );
    }

    #[test]
    fn test_span_path_is_attached() {
        let calls = capture(AnchorSubscriberBuilder::new(), || {
            let outer = tracing::info_span!("sync");
            let _outer = outer.enter();
            let inner = tracing::info_span!("fetch");
            let _inner = inner.enter();
            tracing::info!("got it");
        });

        assert_eq!(calls[0].fields, [Field::string("span", "sync::fetch")]);
    }

    #[test]
    fn test_level_filter() {
        let calls = capture(
            AnchorSubscriberBuilder::new().with_level_filter(LevelFilter::WARN),
            || {
                tracing::info!("dropped");
                tracing::debug!("dropped");
                tracing::error!("kept");
            },
        );
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].level, Level::Error);
    }

    #[test]
    fn test_targets() {
        let calls = capture(AnchorSubscriberBuilder::new().with_targets(true), || {
            tracing::info!(target: "app::net", "up");
        });
        assert_eq!(calls[0].fields, [Field::string("target", "app::net")]);
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(level_from_tracing(tracing::Level::TRACE), Level::Verbose);
        assert_eq!(level_from_tracing(tracing::Level::DEBUG), Level::Verbose);
        assert_eq!(level_from_tracing(tracing::Level::INFO), Level::Info);
    }
}
