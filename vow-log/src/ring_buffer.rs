//! Bounded in-memory sink
//!
//! Keeps the most recent records so a test or a failed run can look at what
//! the event loop did just before. When full, each new record overwrites the
//! oldest slot.

use crate::logger::LogSink;
use crate::record::Record;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RingBufferStats {
    pub retained: usize,
    /// Records overwritten since creation
    pub evicted: u64,
    pub capacity: usize,
}

#[derive(Default)]
struct Slots {
    records: Vec<Record>,
    /// Oldest slot once `records` reached capacity, zero before that
    head: usize,
    evicted: u64,
}

pub struct LogRingBuffer {
    slots: Mutex<Slots>,
    capacity: usize,
}

impl LogRingBuffer {
    pub fn new(capacity: usize) -> Arc<Self> {
        Arc::new(LogRingBuffer {
            slots: Mutex::default(),
            capacity,
        })
    }

    fn slots(&self) -> MutexGuard<'_, Slots> {
        // A sink that panicked mid-write must not hide the records before it
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn retain(&self, record: &Record) {
        let mut slots = self.slots();
        if self.capacity == 0 {
            slots.evicted += 1;
        } else if slots.records.len() < self.capacity {
            slots.records.push(record.clone());
        } else {
            let head = slots.head;
            slots.records[head] = record.clone();
            slots.head = (head + 1) % self.capacity;
            slots.evicted += 1;
        }
    }

    /// Retained records, oldest first
    pub fn dump_records(&self) -> Vec<Record> {
        let slots = self.slots();
        let (newer, older) = slots.records.split_at(slots.head);
        older.iter().chain(newer).cloned().collect()
    }

    /// Retained records stamped with event loop turn `turn`
    pub fn records_for_turn(&self, turn: u64) -> Vec<Record> {
        let mut records = self.dump_records();
        records.retain(|record| record.turn == Some(turn));
        records
    }

    /// Formatted records, one per line
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for record in self.dump_records() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&record.format());
        }
        out
    }

    pub fn stats(&self) -> RingBufferStats {
        let slots = self.slots();
        RingBufferStats {
            retained: slots.records.len(),
            evicted: slots.evicted,
            capacity: self.capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.slots().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl LogSink for LogRingBuffer {
    fn write(&self, record: &Record) {
        self.retain(record);
    }
}

impl LogSink for Arc<LogRingBuffer> {
    fn write(&self, record: &Record) {
        self.retain(record);
    }
}
