//! Structured, level-filtered logging with lines anchored to the bottom of
//! the terminal.
//!
//! Ordinary messages scroll as usual. Anchored lines (progress bars, live
//! status) stay pinned below them and are redrawn in place by transient
//! messages. Any number of threads can log at once: a single processing
//! thread owned by the [`TerminalLogger`] performs every write.
//!
//! # Building blocks
//!
//! - Roots own the output: [`TerminalLogger`] (anchoring), [`StreamLogger`]
//!   (files, pipes, JSON) and [`NullLogger`].
//! - Decorators wrap a parent: [`with_fields`], [`with_options`],
//!   [`tee`] and the handles returned by [`add_anchor`].
//! - [`LoggerConfig`] picks a root and printer from the environment.
//! - [`bridge`] routes `log` records and `tracing` events into a logger.
//!
//! # Example
//!
//! ```no_run
//! use anchorlog::{Field, LoggerConfig, add_anchor, remove_anchor};
//!
//! let root = LoggerConfig::from_env().build_stdout()?;
//! let log = root.clone().into_logger();
//!
//! let status = add_anchor(&log);
//! for file in ["a.txt", "b.txt"] {
//!     status.transient("copying", &[Field::string("file", file)]);
//!     log.info("copied", &[Field::string("file", file)]);
//! }
//! remove_anchor(&status);
//! root.close()?;
//! # Ok::<(), anchorlog::LogError>(())
//! ```
//!
//! # Log Targets
//!
//! anchorlog reports its own diagnostics through the `log` facade under the
//! targets in [`targets`]. Nothing is ever logged from the processing
//! thread, so installing a [`bridge::LogBridge`] over a `TerminalLogger` is
//! safe.

#![forbid(unsafe_code)]

pub mod anchors;
pub mod bridge;
pub mod config;
pub mod decorators;
pub mod detection;
pub mod engine;
pub mod null;
pub mod stream;
pub mod testing;

pub use anchorlog_core::{
    AnchorAdder, AnchorRemover, AtomicLevel, Color, FATAL_EXIT_CODE, Field, JsonPrinter, Level,
    LogError, Logger, MergeContext, Palette, Printer, PrinterOption, RootLogger, TextPrinter, ansi,
    exit_fatal,
};

pub use anchors::{add_anchor, parent, remove_anchor};
pub use config::LoggerConfig;
pub use decorators::{
    AnchoredLogger, CustomLogger, NoAnchorLogger, RootTee, TeeLogger, root_tee, tee, with_fields,
    with_options, with_options_and_fields,
};
pub use detection::{OutputFormat, has_terminal};
pub use engine::TerminalLogger;
pub use null::NullLogger;
pub use stream::StreamLogger;

/// Log targets used by anchorlog's own diagnostics.
///
/// Use these with `RUST_LOG`-style filters, e.g. `anchorlog::config=warn`.
pub mod targets {
    /// Root target for all anchorlog logs.
    pub const ANCHORLOG: &str = "anchorlog";

    /// Root engine lifecycle (startup, shutdown).
    pub const ENGINE: &str = "anchorlog::engine";

    /// Anchor lookup along decorator chains.
    pub const ANCHORS: &str = "anchorlog::anchors";

    /// Environment and configuration parsing.
    pub const CONFIG: &str = "anchorlog::config";

    /// `log` and `tracing` bridges.
    pub const BRIDGE: &str = "anchorlog::bridge";
}
