//! Error types.

use std::fmt;
use std::io;

/// Errors surfaced by anchorlog.
///
/// Filtered messages are never errors, and broken anchor bookkeeping is a
/// panic rather than a variant here.
#[derive(Debug)]
pub enum LogError {
    /// The output sink failed while the processing loop was writing.
    Io(io::Error),
    /// A level name could not be parsed.
    InvalidLevel(String),
    /// An output format name could not be parsed.
    InvalidFormat(String),
    /// A global `log` logger was already installed.
    SetLogger(log::SetLoggerError),
    /// A global tracing subscriber was already installed.
    SetSubscriber(String),
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogError::Io(e) => write!(f, "output sink error: {e}"),
            LogError::InvalidLevel(s) => write!(f, "invalid log level: {s:?}"),
            LogError::InvalidFormat(s) => write!(f, "invalid output format: {s:?}"),
            LogError::SetLogger(e) => write!(f, "cannot install logger: {e}"),
            LogError::SetSubscriber(s) => write!(f, "cannot install subscriber: {s}"),
        }
    }
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LogError::Io(e) => Some(e),
            LogError::SetLogger(e) => Some(e),
            LogError::InvalidLevel(_) | LogError::InvalidFormat(_) | LogError::SetSubscriber(_) => {
                None
            }
        }
    }
}

impl From<io::Error> for LogError {
    fn from(err: io::Error) -> Self {
        LogError::Io(err)
    }
}

impl From<log::SetLoggerError> for LogError {
    fn from(err: log::SetLoggerError) -> Self {
        LogError::SetLogger(err)
    }
}
