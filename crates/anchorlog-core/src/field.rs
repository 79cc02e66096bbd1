//! Structured fields attached to log calls.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// A name/value pair rendered alongside a message.
///
/// Values are pre-rendered to strings when the field is built; printers only
/// decide how to quote and escape them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Rendered value.
    pub value: String,
    /// The value must be wrapped in double quotes to be valid JSON.
    pub is_json_string: bool,
    /// The value contains only characters that never need escaping.
    pub is_json_safe: bool,
}

impl Field {
    fn raw(name: impl Into<String>, value: String) -> Self {
        Self {
            name: name.into(),
            value,
            is_json_string: false,
            is_json_safe: false,
        }
    }

    fn quoted(name: impl Into<String>, value: String, is_json_safe: bool) -> Self {
        Self {
            name: name.into(),
            value,
            is_json_string: true,
            is_json_safe,
        }
    }

    /// `true` or `false`.
    pub fn bool(name: impl Into<String>, value: bool) -> Self {
        Self::raw(name, value.to_string())
    }

    /// Any signed integer.
    pub fn int(name: impl Into<String>, value: impl Into<i64>) -> Self {
        Self::raw(name, value.into().to_string())
    }

    /// Any unsigned integer.
    pub fn uint(name: impl Into<String>, value: impl Into<u64>) -> Self {
        Self::raw(name, value.into().to_string())
    }

    /// A floating point number in its shortest round-trip form.
    ///
    /// JSON has no literal for NaN or infinities, so those become strings.
    pub fn float(name: impl Into<String>, value: f64) -> Self {
        if value.is_finite() {
            Self::raw(name, value.to_string())
        } else {
            Self::quoted(name, value.to_string(), true)
        }
    }

    /// An arbitrary string; escaped by the printer.
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::quoted(name, value.into(), false)
    }

    /// A duration such as `1.5s` or `250ms`.
    pub fn duration(name: impl Into<String>, value: Duration) -> Self {
        Self::quoted(name, format!("{value:?}"), true)
    }

    /// An error named `error`, or `null` when there is none.
    pub fn error<E: fmt::Display>(err: Option<E>) -> Self {
        match err {
            Some(e) => Self::quoted("error", e.to_string(), false),
            None => Self::raw("error", "null".to_string()),
        }
    }

    /// A timestamp formatted as RFC 3339.
    pub fn time(name: impl Into<String>, value: OffsetDateTime) -> Self {
        let rendered = value
            .format(&Rfc3339)
            .unwrap_or_else(|_| value.unix_timestamp().to_string());
        Self::quoted(name, rendered, true)
    }

    /// A timestamp as whole seconds since the unix epoch.
    pub fn time_unix(name: impl Into<String>, value: OffsetDateTime) -> Self {
        Self::raw(name, value.unix_timestamp().to_string())
    }

    /// A timestamp as nanoseconds since the unix epoch.
    pub fn time_unix_nano(name: impl Into<String>, value: OffsetDateTime) -> Self {
        Self::raw(name, value.unix_timestamp_nanos().to_string())
    }
}
