//! Test helpers
//!
//! Event loop helpers shared by the integration suites

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use vow_core::{EventLoop, Promise, Value};
use vow_log::Logger;

pub fn new_loop() -> EventLoop {
    EventLoop::new(Logger::noop())
}

/// Promise fulfilled with `value` after `delay_ms` of virtual time
pub fn delayed_fulfill(event_loop: &EventLoop, value: impl Into<Value>, delay_ms: u64) -> Promise {
    let (promise, resolver) = Promise::with_resolvers(&event_loop.context());
    let value = value.into();
    event_loop.set_timeout(delay_ms, move || resolver.resolve(value));
    promise
}

/// Promise rejected with `reason` after `delay_ms` of virtual time
pub fn delayed_reject(event_loop: &EventLoop, reason: impl Into<Value>, delay_ms: u64) -> Promise {
    let (promise, resolver) = Promise::with_resolvers(&event_loop.context());
    let reason = reason.into();
    event_loop.set_timeout(delay_ms, move || resolver.reject(reason));
    promise
}

/// Ordered log of labels pushed from callbacks
#[derive(Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    /// Handler that records `label` and passes the value through
    pub fn tap(&self, label: &str) -> impl FnOnce(Value) -> Result<Value, Value> + 'static {
        let journal = self.clone();
        let label = label.to_string();
        move |value| {
            journal.push(format!("{label}:{value}"));
            Ok(value)
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

pub fn ints(values: &[i64]) -> Value {
    Value::list(values.iter().copied().map(Value::Int))
}
