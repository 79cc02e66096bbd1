//! Testing utilities for anchorlog output
//!
//! Provides [`CaptureSink`] for capturing what a root writes and
//! [`TerminalModel`] for replaying it onto a virtual screen.

mod capture;
mod terminal;

pub use capture::CaptureSink;
pub use terminal::TerminalModel;
