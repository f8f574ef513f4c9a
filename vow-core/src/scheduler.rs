//! Deferred-task queue
//!
//! A strict FIFO of zero-argument tasks. Scheduling never runs anything; the
//! owner of the queue decides when to step it, which keeps reaction delivery
//! asynchronous and lets tests drive the queue one task at a time.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

use vow_config::SchedulerConfig;
use vow_log::{trace, warn, Logger};

use crate::error::LoopError;

/// Deferred unit of work
pub type Task = Box<dyn FnOnce()>;

/// Accepts tasks that must run on a later turn
pub trait Scheduler {
    fn schedule(&self, task: Task);
}

/// Microtask queue
pub struct TaskQueue {
    tasks: RefCell<VecDeque<Task>>,
    executed: Cell<u64>,
    logger: Arc<Logger>,
}

impl TaskQueue {
    pub fn new(logger: Arc<Logger>) -> Rc<Self> {
        Self::with_config(&SchedulerConfig::default(), logger)
    }

    pub fn with_config(config: &SchedulerConfig, logger: Arc<Logger>) -> Rc<Self> {
        Rc::new(TaskQueue {
            tasks: RefCell::new(VecDeque::with_capacity(config.initial_capacity)),
            executed: Cell::new(0),
            logger,
        })
    }

    pub fn len(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.borrow().is_empty()
    }

    /// Total number of tasks run since creation
    pub fn executed(&self) -> u64 {
        self.executed.get()
    }

    /// Run the oldest task. Returns `false` when the queue was empty.
    pub fn run_next(&self) -> bool {
        // The borrow ends with this statement: the task may schedule more work
        let task = self.tasks.borrow_mut().pop_front();
        match task {
            Some(task) => {
                task();
                self.executed.set(self.executed.get() + 1);
                true
            }
            None => false,
        }
    }

    /// Run up to `steps` tasks, returning how many ran
    pub fn run_steps(&self, steps: usize) -> usize {
        let mut ran = 0;
        while ran < steps && self.run_next() {
            ran += 1;
        }
        ran
    }

    /// Run tasks until the queue is empty, including tasks scheduled while
    /// draining.
    ///
    /// Fails once `limit` tasks have run and the queue still is not empty,
    /// which is how a reaction that keeps re-scheduling itself shows up.
    pub fn run_until_stalled(&self, limit: usize) -> Result<usize, LoopError> {
        let mut ran = 0;
        while !self.is_empty() {
            if ran >= limit {
                warn!(
                    self.logger,
                    "microtask budget of {} exhausted, {} tasks still queued",
                    limit,
                    self.len()
                );
                return Err(LoopError::MicrotaskBudget { limit });
            }
            self.run_next();
            ran += 1;
        }
        if ran > 0 {
            trace!(self.logger, "drained {} microtasks", ran);
        }
        Ok(ran)
    }
}

impl Scheduler for TaskQueue {
    fn schedule(&self, task: Task) {
        self.tasks.borrow_mut().push_back(task);
    }
}

impl std::fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskQueue")
            .field("queued", &self.len())
            .field("executed", &self.executed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<u32>>>, Rc<TaskQueue>) {
        (Rc::new(RefCell::new(Vec::new())), TaskQueue::new(Logger::noop()))
    }

    #[test]
    fn test_fifo_order() {
        let (log, queue) = recorder();
        for i in 0..3 {
            let log = log.clone();
            queue.schedule(Box::new(move || log.borrow_mut().push(i)));
        }
        assert_eq!(queue.len(), 3);
        assert!(log.borrow().is_empty());

        assert_eq!(queue.run_until_stalled(100), Ok(3));
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
        assert_eq!(queue.executed(), 3);
    }

    #[test]
    fn test_tasks_scheduled_while_draining_run_after_queued_ones() {
        let (log, queue) = recorder();
        {
            let log = log.clone();
            let inner_queue = queue.clone();
            queue.schedule(Box::new(move || {
                log.borrow_mut().push(1);
                let log = log.clone();
                inner_queue.schedule(Box::new(move || log.borrow_mut().push(3)));
            }));
        }
        {
            let log = log.clone();
            queue.schedule(Box::new(move || log.borrow_mut().push(2)));
        }

        queue.run_until_stalled(100).unwrap();
        assert_eq!(*log.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn test_run_steps_stops_early() {
        let (log, queue) = recorder();
        for i in 0..5 {
            let log = log.clone();
            queue.schedule(Box::new(move || log.borrow_mut().push(i)));
        }
        assert_eq!(queue.run_steps(2), 2);
        assert_eq!(*log.borrow(), vec![0, 1]);
        assert_eq!(queue.run_steps(10), 3);
        assert!(!queue.run_next());
    }

    #[test]
    fn test_budget_exhaustion() {
        fn respawn(queue: Rc<TaskQueue>) {
            let next = queue.clone();
            queue.schedule(Box::new(move || respawn(next)));
        }

        let queue = TaskQueue::new(Logger::noop());
        respawn(queue.clone());
        assert_eq!(
            queue.run_until_stalled(50),
            Err(LoopError::MicrotaskBudget { limit: 50 })
        );
        assert_eq!(queue.len(), 1);
    }
}
