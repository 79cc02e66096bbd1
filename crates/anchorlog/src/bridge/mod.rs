//! Routing other logging ecosystems into an anchorlog [`Logger`].
//!
//! - [`LogBridge`] - a `log` crate logger implementation
//! - [`AnchorLayer`] - a `tracing_subscriber` layer
//! - [`AnchorSubscriberBuilder`] - a ready-made subscriber around the layer
//!
//! Both bridges only ever call `log` on the target logger, so records
//! emitted by libraries show up above any anchored lines like ordinary
//! messages.
//!
//! # Example
//!
//! ```no_run
//! use anchorlog::LoggerConfig;
//! use anchorlog::bridge::LogBridge;
//!
//! let root = LoggerConfig::from_env().build_stdout()?;
//! LogBridge::builder()
//!     .level(log::LevelFilter::Debug)
//!     .init(root.clone().into_logger())?;
//!
//! log::info!("routed through anchorlog");
//! # Ok::<(), anchorlog::LogError>(())
//! ```
//!
//! [`Logger`]: anchorlog_core::Logger

mod facade;
mod layer;

pub use facade::{LogBridge, LogBridgeBuilder};
pub use layer::{AnchorLayer, AnchorSubscriberBuilder};
