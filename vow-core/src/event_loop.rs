//! Event loop
//!
//! Owns the microtask queue and the timer queue. One turn drains the
//! microtasks, fires at most one timer (advancing the virtual clock to its
//! due time), then drains the microtasks that timer produced. Microtasks
//! therefore always run before the next timer.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use vow_config::{LimitConfig, SchedulerConfig, TimerConfig};
use vow_log::{debug, trace, warn, Logger};

use crate::context::Context;
use crate::error::LoopError;
use crate::promise::Promise;
use crate::scheduler::{Scheduler, TaskQueue};
use crate::timer::{TimerId, TimerQueue};

/// What a single turn did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    pub turn: u64,
    pub microtasks: usize,
    /// Due time of the timer fired this turn
    pub timer_fired: Option<u64>,
}

/// Totals over one `run`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub turns: u64,
    pub microtasks: usize,
    pub timers_fired: usize,
    pub now_ms: u64,
}

impl RunSummary {
    fn record(&mut self, report: &TurnReport) {
        self.turns += 1;
        self.microtasks += report.microtasks;
        if report.timer_fired.is_some() {
            self.timers_fired += 1;
        }
    }
}

pub struct EventLoop {
    queue: Rc<TaskQueue>,
    timers: Rc<TimerQueue>,
    limits: LimitConfig,
    logger: Arc<Logger>,
    turn: Cell<u64>,
    context: Context,
}

impl EventLoop {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self::with_config(
            &SchedulerConfig::default(),
            &TimerConfig::default(),
            LimitConfig::default(),
            logger,
        )
    }

    pub fn with_config(
        scheduler: &SchedulerConfig,
        timer: &TimerConfig,
        limits: LimitConfig,
        logger: Arc<Logger>,
    ) -> Self {
        let queue = TaskQueue::with_config(scheduler, Arc::clone(&logger));
        let timers = TimerQueue::new(timer, Arc::clone(&logger));
        let dyn_queue: Rc<dyn Scheduler> = queue.clone();
        let context = Context::with_config(dyn_queue, Arc::clone(&logger), scheduler);
        EventLoop {
            queue,
            timers,
            limits,
            logger,
            turn: Cell::new(0),
            context,
        }
    }

    /// Context for creating promises on this loop
    pub fn context(&self) -> Context {
        self.context.clone()
    }

    pub fn queue(&self) -> &Rc<TaskQueue> {
        &self.queue
    }

    pub fn timers(&self) -> &Rc<TimerQueue> {
        &self.timers
    }

    pub fn limits(&self) -> &LimitConfig {
        &self.limits
    }

    /// Number of turns run so far
    pub fn turn(&self) -> u64 {
        self.turn.get()
    }

    /// Current virtual time in milliseconds
    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    pub fn has_pending_work(&self) -> bool {
        !self.queue.is_empty() || !self.timers.is_empty()
    }

    /// Run `task` after `delay_ms` of virtual time
    pub fn set_timeout(&self, delay_ms: u64, task: impl FnOnce() + 'static) -> TimerId {
        self.timers.set_timeout(delay_ms, Box::new(task))
    }

    pub fn clear_timeout(&self, id: TimerId) -> bool {
        self.timers.clear_timeout(id)
    }

    /// Drain the microtask queue within the per-drain budget
    pub fn run_microtasks(&self) -> Result<usize, LoopError> {
        self.queue.run_until_stalled(self.limits.max_microtasks_per_drain)
    }

    /// Run one turn
    pub fn turn_once(&self) -> Result<TurnReport, LoopError> {
        let turn = self.turn.get() + 1;
        self.turn.set(turn);
        self.logger.set_turn(turn);

        let mut microtasks = self.run_microtasks()?;
        let timer_fired = self.timers.fire_next();
        if timer_fired.is_some() {
            microtasks += self.run_microtasks()?;
        }

        let report = TurnReport {
            turn,
            microtasks,
            timer_fired,
        };
        trace!(self.logger, "turn finished: {:?}", report);
        Ok(report)
    }

    /// Run turns until neither queue has work
    pub fn run(&self) -> Result<RunSummary, LoopError> {
        self.run_while(|| true)
    }

    /// Run turns until `promise` settles or the loop goes idle.
    ///
    /// Returning `Ok` does not mean the promise settled; check its state.
    pub fn run_until_settled(&self, promise: &Promise) -> Result<RunSummary, LoopError> {
        self.run_while(|| promise.is_pending())
    }

    fn run_while(&self, mut keep_going: impl FnMut() -> bool) -> Result<RunSummary, LoopError> {
        let mut summary = RunSummary::default();
        let outcome = loop {
            if !self.has_pending_work() || !keep_going() {
                break Ok(());
            }
            if summary.turns >= self.limits.max_turns as u64 {
                warn!(
                    self.logger,
                    "turn limit of {} reached, {} microtasks and {} timers pending",
                    self.limits.max_turns,
                    self.queue.len(),
                    self.timers.len()
                );
                break Err(LoopError::TurnLimit {
                    limit: self.limits.max_turns,
                });
            }
            match self.turn_once() {
                Ok(report) => summary.record(&report),
                Err(error) => break Err(error),
            }
        };
        self.logger.clear_turn();
        summary.now_ms = self.now();
        outcome?;

        debug!(
            self.logger,
            "loop idle after {} turns, {} microtasks, {} timers, t={}ms",
            summary.turns,
            summary.microtasks,
            summary.timers_fired,
            summary.now_ms
        );
        Ok(summary)
    }
}

impl std::fmt::Debug for EventLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLoop")
            .field("turn", &self.turn.get())
            .field("queue", &self.queue)
            .field("timers", &self.timers)
            .finish()
    }
}
