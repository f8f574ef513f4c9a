//! vow-log - structured logging for the vow runtime
//!
//! - **Explicit passing**: there is no global logger; an `Arc<Logger>` travels
//!   with the runtime context.
//! - **Turn stamping**: the event loop publishes the current turn number and
//!   every record carries it, so a log shows which turn a reaction ran on.
//! - **Capture**: a ring buffer sink keeps the last N records for inspection.
//!
//! ```
//! use vow_log::{LogConfig, Level, debug};
//!
//! let (logger, ring) = LogConfig::new(Level::Debug).with_ring_buffer(64).init();
//! logger.set_turn(3);
//! debug!(logger, "reaction ran for promise #{}", 7);
//! assert_eq!(ring.unwrap().dump_records()[0].turn, Some(3));
//! ```

mod config;
mod logger;
mod macros;
mod record;
mod ring_buffer;

pub use config::LogConfig;
pub use logger::{LogSink, Logger};
pub use record::{Level, Record};
pub use ring_buffer::{LogRingBuffer, RingBufferStats};

/// Errors raised while parsing log settings
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown log level: {0}")]
    UnknownLevel(String),
}
