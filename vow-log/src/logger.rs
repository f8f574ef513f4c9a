//! Logger and the sink trait

use crate::record::{Level, Record};
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

/// Sentinel stored in `Logger::turn` while no event loop is running
const NO_TURN: u64 = u64::MAX;

/// Destination for records that pass the level filter
pub trait LogSink: Send + Sync {
    fn write(&self, record: &Record);
}

/// Level filter plus a fan-out to sinks
pub struct Logger {
    level: AtomicU8,
    sinks: Mutex<Vec<Box<dyn LogSink>>>,
    /// Current event loop turn, or `NO_TURN`
    turn: AtomicU64,
}

impl Logger {
    pub fn new(level: Level) -> Arc<Self> {
        Arc::new(Logger {
            level: AtomicU8::new(level as u8),
            sinks: Mutex::new(Vec::new()),
            turn: AtomicU64::new(NO_TURN),
        })
    }

    pub fn with_sink<S: LogSink + 'static>(self: Arc<Self>, sink: S) -> Arc<Self> {
        self.add_sink(sink);
        self
    }

    pub fn add_sink<S: LogSink + 'static>(&self, sink: S) {
        if let Ok(mut sinks) = self.sinks.lock() {
            sinks.push(Box::new(sink));
        }
    }

    /// Change the level at runtime
    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed)).unwrap_or(Level::Info)
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        level >= self.level()
    }

    /// Publish the event loop turn that subsequent records belong to
    pub fn set_turn(&self, turn: u64) {
        self.turn.store(turn, Ordering::Relaxed);
    }

    pub fn clear_turn(&self) {
        self.turn.store(NO_TURN, Ordering::Relaxed);
    }

    pub fn turn(&self) -> Option<u64> {
        match self.turn.load(Ordering::Relaxed) {
            NO_TURN => None,
            turn => Some(turn),
        }
    }

    /// Emit a record; the level macros call this after their own filter check
    #[inline(never)]
    pub fn log(&self, level: Level, target: &'static str, message: impl Into<String>) {
        if !self.is_enabled(level) {
            return;
        }

        let mut record = Record::new(level, target, message);
        if let Some(turn) = self.turn() {
            record = record.with_turn(turn);
        }

        if let Ok(sinks) = self.sinks.lock() {
            for sink in sinks.iter() {
                sink.write(&record);
            }
        }
    }

    /// Logger with no sinks that only lets errors through the filter
    pub fn noop() -> Arc<Self> {
        Self::new(Level::Error)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("turn", &self.turn())
            .finish()
    }
}

// Lets one logger forward into another
impl LogSink for Arc<Logger> {
    fn write(&self, record: &Record) {
        self.log(record.level, record.target, record.message.clone());
    }
}
