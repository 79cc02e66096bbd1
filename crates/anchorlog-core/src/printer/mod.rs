//! Rendering a message and its fields into a single output line.
//!
//! Loggers never look inside the rendered string: colors, quoting and JSON
//! escaping are entirely the printer's business.

mod json;
mod text;

pub use json::JsonPrinter;
pub use text::TextPrinter;

use time::OffsetDateTime;

use crate::field::Field;
use crate::level::Level;
use crate::options::PrinterOption;

/// Turns a level, message and fields into one line of text (no trailing
/// newline).
pub trait Printer: Send + Sync {
    /// Renders a line. `opts` apply to this line only, after the printer's
    /// own settings.
    fn render(&self, level: Level, opts: &[PrinterOption], msg: &str, fields: &[Field]) -> String;

    /// Applies `opts` permanently, in order.
    fn set_options(&mut self, opts: &[PrinterOption]);
}

impl<P: Printer + ?Sized> Printer for Box<P> {
    fn render(&self, level: Level, opts: &[PrinterOption], msg: &str, fields: &[Field]) -> String {
        (**self).render(level, opts, msg, fields)
    }

    fn set_options(&mut self, opts: &[PrinterOption]) {
        (**self).set_options(opts);
    }
}

/// Local wall-clock time, falling back to UTC when the local offset is
/// unknown.
pub(crate) fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Strips leading and trailing line feeds.
pub(crate) fn trim_newlines(s: &str) -> &str {
    s.trim_matches('\n')
}

/// Escapes control characters so a message stays on one terminal line.
pub(crate) fn escape_message(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    out
}

/// Like [`escape_message`], also escaping double quotes.
pub(crate) fn escape_field_value(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    out
}
