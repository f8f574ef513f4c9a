//! Vow - deferred values on a single-threaded, virtual-clock event loop
//!
//! # Architecture
//!
//! ```text
//! vow-config/  - Pure configuration data
//! vow-log/     - Structured logging stamped with event loop turns
//! vow-core/    - Promise state machine, combinators, task queue, timers
//! vow-api/     - Runtime facade, RunConfig, VowError
//! vow-cli/     - `vow` binary running combinator scenarios
//! ```
//!
//! # Quick Start
//!
//! ```
//! use vow::{RunConfig, Runtime, Value};
//!
//! let rt = Runtime::new(RunConfig::default());
//! let slow = rt.delay_fulfill("slow", 100);
//! let fast = rt.delay_reject("fast", 10);
//! let race = rt.race(vec![Value::Promise(slow), Value::Promise(fast)]);
//!
//! assert!(rt.block_on(&race).is_err());
//! assert_eq!(rt.now(), 10);
//! ```

// Common types
pub use vow_api::{
    get_config, init_config, is_initialized, Outcome, RunConfig, Runtime, VowError,
};
pub use vow_api::{Component, LimitConfig, SchedulerConfig, TimerConfig};
pub use vow_core::{
    Callback, Context, EventLoop, Handler, LoopError, Promise, PromiseError, PromiseId,
    PromiseState, Resolver, RunSummary, Settlement, Thenable, Value,
};
pub use vow_log::{Level, LogConfig, Logger};
