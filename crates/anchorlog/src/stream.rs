//! A plain root for sinks that are not terminals.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use anchorlog_core::{
    AtomicLevel, Field, Level, LogError, Logger, MergeContext, Printer, PrinterOption, RootLogger,
};

struct State {
    out: Option<Box<dyn Write + Send>>,
    error: Option<io::Error>,
}

/// Root that writes each accepted line straight to its sink.
///
/// There is no processing thread and no anchoring: anchored lines make no
/// sense in a file or a pipe, so transient calls are filtered like any other
/// level. The first write error stops further output and is returned from
/// every call to [`close`](StreamLogger::close).
pub struct StreamLogger {
    min_level: AtomicLevel,
    printer: Box<dyn Printer>,
    state: Mutex<State>,
}

impl StreamLogger {
    /// Root writing to `sink` with a minimum level of [`Level::Info`].
    pub fn new<W, P>(sink: W, printer: P) -> Self
    where
        W: Write + Send + 'static,
        P: Printer + 'static,
    {
        Self {
            min_level: AtomicLevel::new(Level::Info),
            printer: Box::new(printer),
            state: Mutex::new(State {
                out: Some(Box::new(sink)),
                error: None,
            }),
        }
    }

    /// Flushes and releases the sink. Later calls are dropped.
    pub fn close(&self) -> Result<(), LogError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(mut out) = state.out.take() {
            if let Err(e) = out.flush() {
                state.error.get_or_insert(e);
            }
        }
        match &state.error {
            Some(e) => Err(LogError::Io(io::Error::new(e.kind(), e.to_string()))),
            None => Ok(()),
        }
    }

    fn write_line(&self, text: &str, flush: bool) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(out) = state.out.as_mut() else {
            return;
        };
        let result = out
            .write_all(text.as_bytes())
            .and_then(|()| out.write_all(b"\n"))
            .and_then(|()| if flush { out.flush() } else { Ok(()) });
        if let Err(e) = result {
            state.out = None;
            state.error = Some(e);
        }
    }
}

impl Logger for StreamLogger {
    fn log_impl(
        &self,
        level: Level,
        msg: &str,
        fields: &[Field],
        opts: &[PrinterOption],
        mut ctx: MergeContext,
    ) {
        ctx.merge_min_level(self.min_level.get());
        if level < ctx.min_level {
            return;
        }

        let text = if ctx.fields.is_empty() {
            self.printer.render(level, opts, msg, fields)
        } else {
            let mut all = std::mem::take(&mut ctx.fields);
            all.extend_from_slice(fields);
            self.printer.render(level, opts, msg, &all)
        };
        self.write_line(&text, level == Level::Fatal);
    }

    fn min_level(&self) -> Level {
        self.min_level.get()
    }

    fn set_min_level(&self, level: Level) {
        self.min_level.set(level);
    }
}

impl RootLogger for StreamLogger {
    fn close(&self) -> Result<(), LogError> {
        StreamLogger::close(self)
    }

    fn into_logger(self: Arc<Self>) -> Arc<dyn Logger> {
        self
    }
}

impl Drop for StreamLogger {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

impl std::fmt::Debug for StreamLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamLogger")
            .field("min_level", &self.min_level.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CaptureSink;
    use anchorlog_core::{JsonPrinter, TextPrinter};
    use time::macros::datetime;

    fn text_root(sink: &CaptureSink) -> StreamLogger {
        StreamLogger::new(sink.clone(), TextPrinter::new())
    }

    #[test]
    fn writes_one_line_per_message() {
        let sink = CaptureSink::new();
        let log = text_root(&sink);
        log.info("first", &[]);
        log.error("second", &[]);
        log.close().unwrap();
        assert_eq!(sink.raw(), "[nfo] first\n[ERR] second\n");
    }

    #[test]
    fn transient_is_filtered_even_when_anchored() {
        let sink = CaptureSink::new();
        let log = text_root(&sink);
        let mut ctx = MergeContext::new();
        ctx.anchored_line = 1;
        log.log_impl(Level::Transient, "bar", &[], &[], ctx);
        assert_eq!(sink.raw(), "");

        log.set_min_level(Level::Transient);
        log.transient("bar", &[]);
        assert_eq!(sink.raw(), "[==>] bar\n");
    }

    #[test]
    fn json_lines() {
        let sink = CaptureSink::new();
        let at = datetime!(2019-09-10 21:44:00 UTC);
        let log = StreamLogger::new(sink.clone(), JsonPrinter::new().with_time_override(at));
        log.warning("disk", &[Field::uint("free", 3u8), Field::string("mount", "/")]);

        let line = sink.raw();
        let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(value["level"], "warning");
        assert_eq!(value["msg"], "disk");
        assert_eq!(value["free"], 3);
        assert_eq!(value["mount"], "/");
    }

    #[test]
    fn close_is_idempotent_and_drops_later_calls() {
        let sink = CaptureSink::new();
        let log = text_root(&sink);
        log.close().unwrap();
        log.close().unwrap();
        log.info("late", &[]);
        assert_eq!(sink.raw(), "");
    }

    #[test]
    fn first_write_error_is_reported_by_every_close() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let log = StreamLogger::new(Broken, TextPrinter::new());
        log.info("lost", &[]);
        log.info("also lost", &[]);
        for _ in 0..2 {
            match log.close() {
                Err(LogError::Io(e)) => assert_eq!(e.to_string(), "full"),
                other => panic!("expected an io error, got {other:?}"),
            }
        }
    }
}
