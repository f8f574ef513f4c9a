//! Vow Core - deferred values for a single-threaded runtime
//!
//! Contains the value model, the deferred-task queue, the timer queue on a
//! virtual clock, the event loop, and the promise state machine with its
//! chaining operators and combinators.
//!
//! Nothing here touches real time or threads: every callback runs when the
//! owner of the [`EventLoop`] (or of a bare [`TaskQueue`]) decides to step it.
//!
//! ```
//! use vow_core::{EventLoop, Promise, Value};
//! use vow_log::Logger;
//!
//! let event_loop = EventLoop::new(Logger::noop());
//! let cx = event_loop.context();
//!
//! let doubled = Promise::resolve(&cx, Value::Int(21))
//!     .then(|v| Ok(Value::Int(v.as_int().unwrap_or(0) * 2)));
//! assert!(doubled.is_pending());
//!
//! event_loop.run().unwrap();
//! assert_eq!(doubled.value(), Some(Value::Int(42)));
//! ```

pub mod context;
pub mod error;
pub mod event_loop;
pub mod promise;
pub mod scheduler;
pub mod thenable;
pub mod timer;
pub mod value;

// Re-export common types
pub use context::Context;
pub use error::{LoopError, PromiseError};
pub use event_loop::{EventLoop, RunSummary, TurnReport};
pub use promise::{Handler, Promise, PromiseId, PromiseState, Resolver};
pub use scheduler::{Scheduler, Task, TaskQueue};
pub use thenable::{Callback, Thenable};
pub use timer::{TimerId, TimerQueue, VirtualClock};
pub use value::{Settlement, Value};

// Re-export config types from vow-config
pub use vow_config::{Component, LimitConfig, SchedulerConfig, TimerConfig};
