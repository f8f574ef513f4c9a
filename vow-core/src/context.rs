//! Runtime context shared by every promise
//!
//! The deferred-task queue is injected here rather than reached through a
//! global, so a test can hand promises a bare [`TaskQueue`] and step it.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use vow_config::SchedulerConfig;
use vow_log::Logger;

use crate::promise::PromiseId;
use crate::scheduler::{Scheduler, TaskQueue};

#[derive(Clone)]
pub struct Context {
    scheduler: Rc<dyn Scheduler>,
    logger: Arc<Logger>,
    next_id: Rc<Cell<u64>>,
    report_unobserved: bool,
}

impl Context {
    pub fn new(scheduler: Rc<dyn Scheduler>, logger: Arc<Logger>) -> Self {
        Self::with_config(scheduler, logger, &SchedulerConfig::default())
    }

    pub fn with_config(
        scheduler: Rc<dyn Scheduler>,
        logger: Arc<Logger>,
        config: &SchedulerConfig,
    ) -> Self {
        Context {
            scheduler,
            logger,
            next_id: Rc::new(Cell::new(1)),
            report_unobserved: config.report_unobserved_rejections,
        }
    }

    /// Context over a fresh task queue, returned alongside so the caller can
    /// drive it
    pub fn with_queue(logger: Arc<Logger>) -> (Self, Rc<TaskQueue>) {
        let queue = TaskQueue::new(Arc::clone(&logger));
        let scheduler: Rc<dyn Scheduler> = queue.clone();
        (Self::new(scheduler, logger), queue)
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    pub fn scheduler(&self) -> &Rc<dyn Scheduler> {
        &self.scheduler
    }

    pub fn schedule(&self, task: impl FnOnce() + 'static) {
        self.scheduler.schedule(Box::new(task));
    }

    pub(crate) fn next_promise_id(&self) -> PromiseId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        PromiseId(id)
    }

    pub(crate) fn report_unobserved(&self) -> bool {
        self.report_unobserved
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("next_id", &self.next_id.get())
            .field("report_unobserved", &self.report_unobserved)
            .finish()
    }
}
