//! CaptureSink for capturing root output in tests
//!
//! A cloneable [`Write`] sink: hand one clone to a root, keep another to
//! assert on what was written.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use strip_ansi_escapes::strip;

/// An in-memory sink shared between clones.
#[derive(Clone, Default)]
pub struct CaptureSink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CaptureSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, escape sequences included.
    #[must_use]
    pub fn raw(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Everything written so far, with escape sequences stripped.
    #[must_use]
    pub fn output(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&strip(&*buffer)).into_owned()
    }

    /// Stripped output split into lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.output().lines().map(String::from).collect()
    }

    /// Check if the stripped output contains a string (case-insensitive)
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.output().to_lowercase().contains(&needle.to_lowercase())
    }

    /// Check if the stripped output matches a regex pattern
    #[must_use]
    pub fn matches(&self, pattern: &str) -> bool {
        match regex::Regex::new(pattern) {
            Ok(re) => re.is_match(&self.output()),
            Err(_) => false,
        }
    }

    /// Assert that output contains a string
    ///
    /// # Panics
    ///
    /// Panics if the output does not contain the needle string.
    pub fn assert_contains(&self, needle: &str) {
        assert!(
            self.contains(needle),
            "Output did not contain '{}'. Actual output:\n{}",
            needle,
            self.output()
        );
    }

    /// Assert that output does NOT contain a string
    ///
    /// # Panics
    ///
    /// Panics if the output contains the needle string.
    pub fn assert_not_contains(&self, needle: &str) {
        assert!(
            !self.contains(needle),
            "Output unexpectedly contained '{}'. Actual output:\n{}",
            needle,
            self.output()
        );
    }

    pub fn clear(&self) {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Write for CaptureSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl std::fmt::Debug for CaptureSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSink")
            .field("bytes", &self.raw().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_buffer() {
        let sink = CaptureSink::new();
        let mut writer = sink.clone();
        writer.write_all(b"hello\n").unwrap();
        assert_eq!(sink.raw(), "hello\n");
    }

    #[test]
    fn output_strips_escapes() {
        let sink = CaptureSink::new();
        let mut writer = sink.clone();
        writer.write_all(b"\x1b[91mred\x1b[0m text\n").unwrap();
        assert_eq!(sink.output(), "red text\n");
        assert!(sink.raw().contains("\x1b[91m"));
        assert_eq!(sink.lines(), ["red text"]);
    }

    #[test]
    fn contains_is_case_insensitive() {
        let sink = CaptureSink::new();
        sink.clone().write_all(b"Hello World").unwrap();
        assert!(sink.contains("hello"));
        assert!(sink.contains("WORLD"));
        sink.assert_not_contains("goodbye");
    }

    #[test]
    fn matches_regex() {
        let sink = CaptureSink::new();
        sink.clone().write_all(b"percent=42").unwrap();
        assert!(sink.matches(r"percent=\d+"));
        assert!(!sink.matches(r"percent=[a-z]+"));
        assert!(!sink.matches(r"(unclosed"));
    }

    #[test]
    fn clear_empties_the_buffer() {
        let sink = CaptureSink::new();
        sink.clone().write_all(b"something").unwrap();
        sink.clear();
        assert_eq!(sink.raw(), "");
    }
}
