//! Logger construction
//!
//! Builds a logger with an optional in-memory capture buffer. Other outputs
//! are attached by the embedding binary through [`Logger::add_sink`].

use crate::{Level, LogRingBuffer, Logger};
use std::sync::Arc;

/// Logger settings
///
/// ```
/// use vow_log::{LogConfig, Level};
///
/// let (logger, ring) = LogConfig::new(Level::Debug).with_ring_buffer(10_000).init();
/// assert!(ring.is_some());
/// assert_eq!(logger.level(), Level::Debug);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
    /// Capacity of the capture buffer; `None` attaches no buffer
    pub ring_capacity: Option<usize>,
}

impl LogConfig {
    pub fn new(level: Level) -> Self {
        LogConfig {
            level,
            ring_capacity: None,
        }
    }

    /// Only errors, nothing captured
    pub fn quiet() -> Self {
        Self::new(Level::Error)
    }

    /// Capture the most recent `capacity` records; a later call replaces the
    /// capacity
    pub fn with_ring_buffer(mut self, capacity: usize) -> Self {
        self.ring_capacity = Some(capacity);
        self
    }

    pub fn init(self) -> (Arc<Logger>, Option<Arc<LogRingBuffer>>) {
        let logger = Logger::new(self.level);
        let ring = self.ring_capacity.map(|capacity| {
            let ring = LogRingBuffer::new(capacity);
            logger.add_sink(Arc::clone(&ring));
            ring
        });
        (logger, ring)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new(Level::Warn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = LogConfig::new(Level::Debug);
        assert_eq!(config.level, Level::Debug);
        assert_eq!(config.ring_capacity, None);
    }

    #[test]
    fn test_quiet_config_has_no_buffer() {
        let (logger, ring) = LogConfig::quiet().init();
        assert_eq!(logger.level(), Level::Error);
        assert!(ring.is_none());
    }

    #[test]
    fn test_last_capacity_wins() {
        let config = LogConfig::default().with_ring_buffer(8).with_ring_buffer(2);
        assert_eq!(config.ring_capacity, Some(2));
        let (_, ring) = config.init();
        assert_eq!(ring.unwrap().capacity(), 2);
    }

    #[test]
    fn test_config_init_captures() {
        let (logger, ring) = LogConfig::new(Level::Debug).with_ring_buffer(100).init();

        crate::debug!(logger, "test message");
        crate::trace!(logger, "filtered out");
        let records = ring.unwrap().dump_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message, "test message");
    }
}
