//! Centralized configuration for building a root logger.
//!
//! `LoggerConfig` can be built programmatically, read from the environment,
//! or deserialized from any serde format. [`LoggerConfig::build`] turns it
//! into the right root for the sink at hand.

use std::env;
use std::io::{self, Write};
use std::sync::Arc;

use serde::Deserialize;

use anchorlog_core::{
    JsonPrinter, Level, LogError, Logger, Palette, Printer, PrinterOption, RootLogger, TextPrinter,
};

use crate::detection::{OutputFormat, Resolved, has_terminal, resolve};
use crate::engine::TerminalLogger;
use crate::stream::StreamLogger;
use crate::targets;

/// Everything needed to build a root logger.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Output format (auto-detected by default)
    pub format: OutputFormat,
    /// Minimum level of the root
    pub min_level: Level,
    /// Disable colors even on a terminal
    pub no_color: bool,
    /// Prefix lines with a timestamp
    pub show_time: bool,
    /// Prefix lines with a level tag
    pub show_level: bool,
    /// Minimum column for the right-hand side of a text line
    pub field_indent: usize,
    /// Put fields before the message
    pub fields_first: bool,
    /// Crop transient lines to this many visible characters (0 = never)
    pub transient_line_length: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Auto,
            min_level: Level::Info,
            no_color: false,
            show_time: false,
            show_level: true,
            field_indent: 20,
            fields_first: false,
            transient_line_length: 0,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl LoggerConfig {
    /// Create config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create config from environment variables
    ///
    /// # Environment Variables
    ///
    /// | Variable | Values | Description |
    /// |----------|--------|-------------|
    /// | `NO_COLOR` | (non-empty) | Disable colors (standard) |
    /// | `ANCHORLOG_FORMAT` | auto/basic/json | Output format |
    /// | `ANCHORLOG_LEVEL` | transient/verbose/info/warning/error/fatal | Minimum level |
    /// | `ANCHORLOG_TIME` | 0/1 | Show timestamps |
    /// | `ANCHORLOG_LINE_LENGTH` | integer | Crop transient lines |
    ///
    /// Unrecognized values are ignored with a warning.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            config.no_color = true;
        }

        if let Some(val) = lookup("ANCHORLOG_FORMAT") {
            match val.parse() {
                Ok(format) => config.format = format,
                Err(e) => log::warn!(target: targets::CONFIG, "ignoring ANCHORLOG_FORMAT: {e}"),
            }
        }

        if let Some(val) = lookup("ANCHORLOG_LEVEL") {
            match val.parse() {
                Ok(level) => config.min_level = level,
                Err(e) => log::warn!(target: targets::CONFIG, "ignoring ANCHORLOG_LEVEL: {e}"),
            }
        }

        if let Some(val) = lookup("ANCHORLOG_TIME") {
            match parse_flag(&val) {
                Some(show) => config.show_time = show,
                None => log::warn!(target: targets::CONFIG, "ignoring ANCHORLOG_TIME: {val:?} is not a flag"),
            }
        }

        if let Some(val) = lookup("ANCHORLOG_LINE_LENGTH") {
            match val.trim().parse() {
                Ok(cols) => config.transient_line_length = cols,
                Err(e) => log::warn!(target: targets::CONFIG, "ignoring ANCHORLOG_LINE_LENGTH {val:?}: {e}"),
            }
        }

        config
    }

    // ─────────────────────────────────────────────────
    // Builder Methods
    // ─────────────────────────────────────────────────

    /// Set the output format
    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the minimum level
    #[must_use]
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Disable colors
    #[must_use]
    pub fn without_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    /// Show or hide timestamps
    #[must_use]
    pub fn with_time(mut self, show: bool) -> Self {
        self.show_time = show;
        self
    }

    /// Show or hide level tags
    #[must_use]
    pub fn with_level(mut self, show: bool) -> Self {
        self.show_level = show;
        self
    }

    /// Set the field indent
    #[must_use]
    pub fn with_field_indent(mut self, indent: usize) -> Self {
        self.field_indent = indent;
        self
    }

    /// Put fields before the message
    #[must_use]
    pub fn with_fields_first(mut self, fields_first: bool) -> Self {
        self.fields_first = fields_first;
        self
    }

    /// Crop transient lines
    #[must_use]
    pub fn with_transient_line_length(mut self, cols: usize) -> Self {
        self.transient_line_length = cols;
        self
    }

    // ─────────────────────────────────────────────────
    // Building
    // ─────────────────────────────────────────────────

    /// Text printer options for this config. Colors are used only when
    /// `colored` is set and colors are not disabled.
    #[must_use]
    pub fn printer_options(&self, colored: bool) -> Vec<PrinterOption> {
        let palette = if colored && !self.no_color {
            Palette::COLOR
        } else {
            Palette::NONE
        };
        vec![
            PrinterOption::Palette(palette),
            PrinterOption::ShowTime(self.show_time),
            PrinterOption::ShowLevel(self.show_level),
            PrinterOption::FieldIndent(self.field_indent),
            if self.fields_first {
                PrinterOption::FieldsFirst
            } else {
                PrinterOption::MessageFirst
            },
            PrinterOption::TransientLineLength(self.transient_line_length),
        ]
    }

    fn text_printer(&self, colored: bool) -> TextPrinter {
        let mut printer = TextPrinter::new();
        printer.set_options(&self.printer_options(colored));
        printer
    }

    /// Builds a root writing to `writer`.
    ///
    /// `is_terminal` says whether `writer` is an interactive terminal; only
    /// then does [`OutputFormat::Auto`] pick the anchoring
    /// [`TerminalLogger`].
    pub fn build<W>(&self, writer: W, is_terminal: bool) -> Result<Arc<dyn RootLogger>, LogError>
    where
        W: Write + Send + 'static,
    {
        let resolved = resolve(self.format, is_terminal);
        log::debug!(target: targets::CONFIG, "building {resolved:?} root for format {}", self.format);

        let root: Arc<dyn RootLogger> = match resolved {
            Resolved::Terminal => Arc::new(TerminalLogger::new(writer, self.text_printer(true))?),
            Resolved::Plain => Arc::new(StreamLogger::new(writer, self.text_printer(false))),
            Resolved::Json => Arc::new(StreamLogger::new(writer, JsonPrinter::new())),
        };
        root.set_min_level(self.min_level);
        Ok(root)
    }

    /// Builds a root writing to standard output.
    pub fn build_stdout(&self) -> Result<Arc<dyn RootLogger>, LogError> {
        self.build(io::stdout(), has_terminal())
    }
}
