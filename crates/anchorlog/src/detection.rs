//! Output format selection.
//!
//! Anchoring only works on an interactive terminal. Everywhere else
//! (files, pipes, CI logs) output falls back to plain lines.

use std::fmt;
use std::io::IsTerminal;
use std::str::FromStr;

use serde::Deserialize;

use anchorlog_core::LogError;

/// Requested output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Anchored, colored output on a terminal; plain lines otherwise.
    #[default]
    Auto,
    /// Plain text lines, no colors, no anchoring.
    Basic,
    /// One JSON object per line.
    Json,
}

impl OutputFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Auto => "auto",
            OutputFormat::Basic => "basic",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "" => Ok(OutputFormat::Auto),
            "basic" | "plain" | "text" => Ok(OutputFormat::Basic),
            "json" => Ok(OutputFormat::Json),
            _ => Err(LogError::InvalidFormat(s.to_string())),
        }
    }
}

/// The format actually used once the sink is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    /// [`TerminalLogger`](crate::TerminalLogger) with colors.
    Terminal,
    /// [`StreamLogger`](crate::StreamLogger) with plain text.
    Plain,
    /// [`StreamLogger`](crate::StreamLogger) with JSON lines.
    Json,
}

/// Whether standard output is an interactive terminal.
#[must_use]
pub fn has_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Decides the concrete output for `format` on a sink that is (or is not)
/// a terminal.
#[must_use]
pub fn resolve(format: OutputFormat, is_terminal: bool) -> Resolved {
    match format {
        OutputFormat::Auto if is_terminal => Resolved::Terminal,
        OutputFormat::Auto | OutputFormat::Basic => Resolved::Plain,
        OutputFormat::Json => Resolved::Json,
    }
}
