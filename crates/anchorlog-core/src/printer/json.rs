//! One JSON object per line.

use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::{Printer, now, trim_newlines};
use crate::field::Field;
use crate::level::Level;
use crate::options::PrinterOption;

/// Renders `{"timestamp":..,"level":..,"msg":..,<fields>}`.
///
/// Printer options are ignored; JSON output has no layout to tweak.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonPrinter {
    time_override: Option<OffsetDateTime>,
}

impl JsonPrinter {
    /// Creates a printer stamping lines with the current time.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps every line with `at` instead of the current time.
    #[must_use]
    pub fn with_time_override(mut self, at: OffsetDateTime) -> Self {
        self.time_override = Some(at);
        self
    }
}

fn push_json_string(out: &mut String, s: &str) {
    out.push_str(&Value::from(s).to_string());
}

impl Printer for JsonPrinter {
    fn render(&self, level: Level, _opts: &[PrinterOption], msg: &str, fields: &[Field]) -> String {
        let stamp = self.time_override.unwrap_or_else(now);
        let mut out = String::with_capacity(70 + msg.len() + fields.len() * 50);

        out.push_str("{\"timestamp\":");
        push_json_string(&mut out, &stamp.format(&Rfc3339).unwrap_or_default());
        out.push_str(",\"level\":\"");
        out.push_str(level.as_str());
        out.push_str("\",\"msg\":");
        push_json_string(&mut out, trim_newlines(msg));

        for field in fields {
            out.push(',');
            push_json_string(&mut out, &field.name);
            out.push(':');
            if !field.is_json_string {
                out.push_str(&field.value);
            } else if field.is_json_safe {
                out.push('"');
                out.push_str(&field.value);
                out.push('"');
            } else {
                push_json_string(&mut out, &field.value);
            }
        }

        out.push('}');
        out
    }

    fn set_options(&mut self, _opts: &[PrinterOption]) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use time::macros::datetime;

    fn printer() -> JsonPrinter {
        JsonPrinter::new().with_time_override(datetime!(2019-09-10 21:44:00 UTC))
    }

    #[test]
    fn renders_a_fixed_line() {
        let line = printer().render(Level::Info, &[], "hello", &[Field::int("n", 3i32)]);
        assert_eq!(
            line,
            r#"{"timestamp":"2019-09-10T21:44:00Z","level":"info","msg":"hello","n":3}"#
        );
    }

    #[test]
    fn every_line_is_valid_json() {
        let fields = [
            Field::string("quote", "she said \"hi\"\n<tag>&"),
            Field::duration("elapsed", Duration::from_millis(250)),
            Field::error(None::<String>),
            Field::bool("ok", true),
            Field::float("ratio", 0.5),
        ];
        let line = printer().render(Level::Warning, &[], "\nmulti\nline\tmsg\n", &fields);
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["level"], "warning");
        assert_eq!(value["msg"], "multi\nline\tmsg");
        assert_eq!(value["quote"], "she said \"hi\"\n<tag>&");
        assert_eq!(value["elapsed"], "250ms");
        assert!(value["error"].is_null());
        assert_eq!(value["ok"], true);
        assert_eq!(value["ratio"], 0.5);
    }

    #[test]
    fn non_finite_floats_stay_valid_json() {
        let fields = [
            Field::float("ratio", f64::NAN),
            Field::float("big", f64::INFINITY),
            Field::float("small", f64::NEG_INFINITY),
        ];
        let line = printer().render(Level::Info, &[], "m", &fields);
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["ratio"], "NaN");
        assert_eq!(value["big"], "inf");
        assert_eq!(value["small"], "-inf");
    }

    #[test]
    fn options_are_ignored() {
        let plain = printer().render(Level::Info, &[], "x", &[]);
        let with_opts = printer().render(Level::Info, &[PrinterOption::ShowLevel(false)], "x", &[]);
        assert_eq!(plain, with_opts);
    }
}
