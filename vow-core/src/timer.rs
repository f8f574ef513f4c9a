//! Timer queue on a virtual clock
//!
//! Timers never sleep. The clock only moves when the event loop fires the
//! next due timer, so delays of minutes run instantly and deterministically.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

use vow_config::TimerConfig;
use vow_log::{debug, trace, Logger};

use crate::scheduler::Task;

/// Virtual clock in milliseconds
#[derive(Debug, Default)]
pub struct VirtualClock {
    now_ms: Cell<u64>,
}

impl VirtualClock {
    pub fn new(start_ms: u64) -> Self {
        VirtualClock {
            now_ms: Cell::new(start_ms),
        }
    }

    pub fn now(&self) -> u64 {
        self.now_ms.get()
    }

    /// Move the clock forward; earlier instants are ignored
    pub fn advance_to(&self, at_ms: u64) {
        if at_ms > self.now_ms.get() {
            self.now_ms.set(at_ms);
        }
    }
}

/// Handle for cancelling a scheduled timer
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId {
    due_ms: u64,
    seq: u64,
}

impl TimerId {
    pub fn due_ms(&self) -> u64 {
        self.due_ms
    }
}

/// Timers ordered by due time, then by registration order
pub struct TimerQueue {
    clock: VirtualClock,
    timers: RefCell<BTreeMap<TimerId, Task>>,
    next_seq: Cell<u64>,
    max_delay_ms: u64,
    logger: Arc<Logger>,
}

impl TimerQueue {
    pub fn new(config: &TimerConfig, logger: Arc<Logger>) -> Rc<Self> {
        Rc::new(TimerQueue {
            clock: VirtualClock::new(config.start_ms),
            timers: RefCell::new(BTreeMap::new()),
            next_seq: Cell::new(0),
            max_delay_ms: config.max_delay_ms,
            logger,
        })
    }

    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    pub fn len(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.borrow().is_empty()
    }

    /// Run `task` once `delay_ms` of virtual time has passed
    pub fn set_timeout(&self, delay_ms: u64, task: Task) -> TimerId {
        let delay_ms = delay_ms.min(self.max_delay_ms);
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);

        let id = TimerId {
            due_ms: self.now().saturating_add(delay_ms),
            seq,
        };
        self.timers.borrow_mut().insert(id, task);
        trace!(self.logger, "timer {} due at {}ms", seq, id.due_ms);
        id
    }

    /// Cancel a timer that has not fired yet
    pub fn clear_timeout(&self, id: TimerId) -> bool {
        self.timers.borrow_mut().remove(&id).is_some()
    }

    /// Due time of the earliest timer
    pub fn next_due(&self) -> Option<u64> {
        self.timers.borrow().keys().next().map(TimerId::due_ms)
    }

    /// Fire the earliest timer, advancing the clock to its due time.
    ///
    /// Returns the due time of the fired timer, or `None` if nothing was
    /// scheduled.
    pub fn fire_next(&self) -> Option<u64> {
        let (id, task) = self.timers.borrow_mut().pop_first()?;
        if id.due_ms > self.now() {
            debug!(self.logger, "clock advanced {}ms -> {}ms", self.now(), id.due_ms);
        }
        self.clock.advance_to(id.due_ms);
        task();
        Some(id.due_ms)
    }
}

impl std::fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerQueue")
            .field("now_ms", &self.now())
            .field("pending", &self.len())
            .finish()
    }
}
