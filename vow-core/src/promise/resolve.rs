//! Resolving capabilities and the resolution unwrapper

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use vow_log::debug;

use super::Promise;
use crate::error::PromiseError;
use crate::thenable::{Callback, Thenable};
use crate::value::Value;

/// One-shot capability to settle a promise.
///
/// Clones share the claimed flag: whichever of `resolve`/`reject` is called
/// first wins, including through a clone, and every later call is ignored.
/// Resolving with a thenable claims the capability even though the promise
/// stays pending until the thenable settles.
#[derive(Clone)]
pub struct Resolver {
    promise: Promise,
    claimed: Rc<Cell<bool>>,
}

impl Resolver {
    pub(crate) fn new(promise: Promise) -> Self {
        Resolver {
            promise,
            claimed: Rc::new(Cell::new(false)),
        }
    }

    pub fn resolve(&self, value: impl Into<Value>) {
        if self.claim() {
            resolve_promise(&self.promise, value.into());
        }
    }

    pub fn reject(&self, reason: impl Into<Value>) {
        if self.claim() {
            self.promise.reject_now(reason.into());
        }
    }

    /// Whether `resolve` or `reject` was already called
    pub fn is_claimed(&self) -> bool {
        self.claimed.get()
    }

    /// The promise this capability settles
    pub fn promise(&self) -> &Promise {
        &self.promise
    }

    fn claim(&self) -> bool {
        !self.claimed.replace(true)
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("promise", &self.promise.id())
            .field("claimed", &self.claimed.get())
            .finish()
    }
}

/// Settle `promise` with `value`, adopting the state of thenables.
///
/// A foreign thenable's `then` runs as a queued task, so adoption chains that
/// never reach a plain value consume the microtask budget instead of the
/// stack.
pub(crate) fn resolve_promise(promise: &Promise, value: Value) {
    let logger = promise.context().logger();
    match value {
        Value::Promise(other) if other.ptr_eq(promise) => {
            debug!(logger, "promise {} resolved with itself", promise.id());
            let error = PromiseError::ChainingCycle { id: promise.id() };
            promise.reject_now(Value::from(error));
        }
        Value::Promise(other) => {
            debug!(logger, "promise {} adopting promise {}", promise.id(), other.id());
            // A native promise never settles to a thenable, so its outcome
            // can settle this one directly
            let on_fulfilled = promise.clone();
            let on_rejected = promise.clone();
            other.subscribe(
                Box::new(move |value| on_fulfilled.fulfill_now(value)),
                Box::new(move |reason| on_rejected.reject_now(reason)),
            );
        }
        Value::Thenable(thenable) => {
            debug!(logger, "promise {} adopting a foreign thenable", promise.id());
            let target = promise.clone();
            promise
                .context()
                .schedule(move || adopt_thenable(&target, thenable));
        }
        value => promise.fulfill_now(value),
    }
}

/// Call the thenable's `then` with a fresh capability for `promise`
fn adopt_thenable(promise: &Promise, thenable: Rc<dyn Thenable>) {
    let logger = promise.context().logger();
    let resolver = Resolver::new(promise.clone());
    let adopted = Rc::downgrade(&thenable);
    let on_fulfilled: Callback = {
        let resolver = resolver.clone();
        Box::new(move |value| {
            let is_self = matches!(
                &value,
                Value::Thenable(next) if std::ptr::addr_eq(Rc::as_ptr(next), adopted.as_ptr())
            );
            if is_self {
                let id = resolver.promise().id();
                resolver.reject(PromiseError::ChainingCycle { id });
            } else {
                resolver.resolve(value);
            }
        })
    };
    let on_rejected: Callback = {
        let resolver = resolver.clone();
        Box::new(move |reason| resolver.reject(reason))
    };
    if let Err(reason) = thenable.then(on_fulfilled, on_rejected) {
        if resolver.is_claimed() {
            debug!(
                logger,
                "thenable failed after settling promise {}, ignored: {}",
                promise.id(),
                reason
            );
        } else {
            resolver.reject(reason);
        }
    }
}
