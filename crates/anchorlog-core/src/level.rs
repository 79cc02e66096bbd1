//! Log levels.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::LogError;

/// Severity of a log line, ordered from least to most important.
///
/// `Transient` is special: it is the only level an anchored line accepts
/// regardless of the effective minimum level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Level {
    /// Strictly unimportant: progress bars, byte counts, time remaining.
    #[default]
    Transient = 0,
    /// Debugging detail.
    Verbose = 1,
    /// Normal message.
    Info = 2,
    /// Something unusual happened.
    Warning = 3,
    /// Something bad happened.
    Error = 4,
    /// Stop everything right now.
    Fatal = 5,
}

impl Level {
    /// Every level, in ascending order.
    pub const ALL: [Level; 6] = [
        Level::Transient,
        Level::Verbose,
        Level::Info,
        Level::Warning,
        Level::Error,
        Level::Fatal,
    ];

    /// Number of levels.
    pub const COUNT: usize = Self::ALL.len();

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Transient => "transient",
            Level::Verbose => "verbose",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }

    /// Position of this level in [`Level::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Level::Transient,
            1 => Level::Verbose,
            2 => Level::Info,
            3 => Level::Warning,
            4 => Level::Error,
            _ => Level::Fatal,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "transient" => Ok(Level::Transient),
            "verbose" | "debug" => Ok(Level::Verbose),
            "info" => Ok(Level::Info),
            "warning" | "warn" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            _ => Err(LogError::InvalidLevel(s.to_string())),
        }
    }
}

/// A [`Level`] that can be read and replaced from any thread.
///
/// Every logger keeps its local minimum level in one of these so that
/// `set_min_level` works through a shared `Arc`.
#[derive(Debug)]
pub struct AtomicLevel(AtomicU8);

impl AtomicLevel {
    /// Creates a new atomic level.
    #[must_use]
    pub const fn new(level: Level) -> Self {
        Self(AtomicU8::new(level as u8))
    }

    /// Returns the current level.
    #[must_use]
    pub fn get(&self) -> Level {
        Level::from_u8(self.0.load(Ordering::Relaxed))
    }

    /// Replaces the current level.
    pub fn set(&self, level: Level) {
        self.0.store(level as u8, Ordering::Relaxed);
    }
}

impl Default for AtomicLevel {
    fn default() -> Self {
        Self::new(Level::Transient)
    }
}
