//! Vow API - runtime facade
//!
//! Provides a unified entry point over the core crate, including:
//! - A `Runtime` owning one event loop and its promise context
//! - Configuration abstraction (RunConfig)
//! - Unified error handling (VowError)
//!
//! For CLI convenience, this crate provides a global configuration
//! singleton. For library use, prefer `Runtime::new(config)`.

use std::sync::Arc;

use vow_core::{Context, EventLoop, Promise, RunSummary, Settlement, Value};
use vow_log::{debug, info, Logger};

pub mod config;
pub mod error;
pub mod types;

pub use config::{config as get_config, init as init_config, is_initialized, RunConfig};
pub use error::VowError;
pub use types::Outcome;

// Re-export config and core types
pub use vow_config::{Component, LimitConfig, SchedulerConfig, TimerConfig};
pub use vow_core::{PromiseError, PromiseState, Resolver};

/// A single-threaded promise runtime driven on a virtual clock
pub struct Runtime {
    event_loop: EventLoop,
    logger: Arc<Logger>,
}

impl Runtime {
    pub fn new(config: RunConfig) -> Self {
        let RunConfig {
            scheduler,
            timer,
            limits,
            logger,
        } = config;
        let event_loop = EventLoop::with_config(&scheduler, &timer, limits, Arc::clone(&logger));
        Runtime { event_loop, logger }
    }

    /// Runtime built from the global configuration
    pub fn from_global() -> Self {
        Self::new(config::config().clone())
    }

    pub fn context(&self) -> Context {
        self.event_loop.context()
    }

    pub fn event_loop(&self) -> &EventLoop {
        &self.event_loop
    }

    /// Current virtual time in milliseconds
    pub fn now(&self) -> u64 {
        self.event_loop.now()
    }

    // ==================== Construction ====================

    pub fn promise<F>(&self, setup: F) -> Promise
    where
        F: FnOnce(Resolver) -> Result<(), Value>,
    {
        Promise::new(&self.context(), setup)
    }

    pub fn resolve(&self, value: impl Into<Value>) -> Promise {
        Promise::resolve(&self.context(), value)
    }

    pub fn reject(&self, reason: impl Into<Value>) -> Promise {
        Promise::reject(&self.context(), reason)
    }

    /// Promise fulfilled with `value` once `delay_ms` of virtual time passed
    pub fn delay_fulfill(&self, value: impl Into<Value>, delay_ms: u64) -> Promise {
        let value = value.into();
        self.delayed(delay_ms, move |resolver| resolver.resolve(value))
    }

    /// Promise rejected with `reason` once `delay_ms` of virtual time passed
    pub fn delay_reject(&self, reason: impl Into<Value>, delay_ms: u64) -> Promise {
        let reason = reason.into();
        self.delayed(delay_ms, move |resolver| resolver.reject(reason))
    }

    fn delayed(&self, delay_ms: u64, settle: impl FnOnce(Resolver) + 'static) -> Promise {
        let (promise, resolver) = Promise::with_resolvers(&self.context());
        let timer = self.event_loop.set_timeout(delay_ms, move || settle(resolver));
        debug!(
            self.logger,
            "promise {} settles at {}ms",
            promise.id(),
            timer.due_ms()
        );
        promise
    }

    pub fn all(&self, inputs: impl IntoIterator<Item = Value>) -> Promise {
        Promise::all(&self.context(), inputs)
    }

    pub fn race(&self, inputs: impl IntoIterator<Item = Value>) -> Promise {
        Promise::race(&self.context(), inputs)
    }

    pub fn any(&self, inputs: impl IntoIterator<Item = Value>) -> Promise {
        Promise::any(&self.context(), inputs)
    }

    pub fn all_settled(&self, inputs: impl IntoIterator<Item = Value>) -> Promise {
        Promise::all_settled(&self.context(), inputs)
    }

    // ==================== Execution ====================

    /// Run the loop until it has no work left
    pub fn run(&self) -> Result<RunSummary, VowError> {
        let summary = self.event_loop.run()?;
        info!(
            self.logger,
            "run finished after {} turns at t={}ms", summary.turns, summary.now_ms
        );
        Ok(summary)
    }

    /// Run until `promise` settles and report how it ended.
    ///
    /// Fails with `Stalled` when the loop goes idle first.
    pub fn settle(&self, promise: &Promise) -> Result<Outcome, VowError> {
        let summary = self.event_loop.run_until_settled(promise)?;
        let settlement = match promise.state() {
            PromiseState::Pending => {
                debug!(self.logger, "promise {} never settled", promise.id());
                return Err(VowError::Stalled);
            }
            PromiseState::Fulfilled(value) => Settlement::Fulfilled(value),
            PromiseState::Rejected(reason) => Settlement::Rejected(reason),
        };
        Ok(Outcome {
            promise: promise.id(),
            settlement,
            summary,
        })
    }

    /// Run until `promise` settles; its rejection becomes `VowError::Rejected`
    pub fn block_on(&self, promise: &Promise) -> Result<Value, VowError> {
        match self.settle(promise)?.settlement {
            Settlement::Fulfilled(value) => Ok(value),
            Settlement::Rejected(reason) => Err(VowError::Rejected(reason)),
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(RunConfig::default())
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("event_loop", &self.event_loop)
            .finish()
    }
}
