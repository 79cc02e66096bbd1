//! Core types and traits for anchorlog.
//!
//! This crate provides the building blocks shared by every logger in the
//! workspace:
//! - [`Level`] and [`Field`], the data attached to each call
//! - [`MergeContext`], threaded from a call site up to the root
//! - [`Printer`] with the [`TextPrinter`] and [`JsonPrinter`] renderers
//! - [`ansi`] cursor-control primitives
//! - The capability traits ([`Logger`], [`AnchorAdder`], [`AnchorRemover`],
//!   [`RootLogger`]) that decorators and roots implement
//!
//! The root engine and the decorators live in the `anchorlog` crate.

#![forbid(unsafe_code)]

pub mod ansi;
mod context;
mod error;
mod field;
mod level;
mod logger;
mod options;
pub mod printer;

pub use context::MergeContext;
pub use error::LogError;
pub use field::Field;
pub use level::{AtomicLevel, Level};
pub use logger::{AnchorAdder, AnchorRemover, FATAL_EXIT_CODE, Logger, RootLogger, exit_fatal};
pub use options::{Color, Palette, PrinterOption};
pub use printer::{JsonPrinter, Printer, TextPrinter};
