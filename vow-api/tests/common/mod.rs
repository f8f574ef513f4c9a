//! Test helpers

#![allow(dead_code)]

use std::sync::Arc;

use vow_api::{RunConfig, Runtime};
use vow_log::{Level, LogConfig, LogRingBuffer};

pub fn runtime() -> Runtime {
    Runtime::new(RunConfig::default())
}

/// Runtime whose log records land in a ring buffer
pub fn traced_runtime(level: Level) -> (Runtime, Arc<LogRingBuffer>) {
    let (logger, ring) = LogConfig::new(level).with_ring_buffer(1024).init();
    let ring = ring.expect("ring buffer output configured");
    (Runtime::new(RunConfig::with_logger(logger)), ring)
}
