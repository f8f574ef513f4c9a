//! Deferred values
//!
//! A [`Promise`] is a single-assignment cell: it starts `Pending` and settles
//! at most once, to `Fulfilled` or `Rejected`. Reactions registered through
//! `then` never run synchronously; they are queued on the context's
//! scheduler, both when the promise settles later and when it had already
//! settled at subscription time.
//!
//! - `state`: the state machine and subscriber lists
//! - `resolve`: resolving capabilities and thenable adoption
//! - `chain`: `then` / `catch` / `finally`
//! - `combinators`: `all` / `race` / `any` / `all_settled`

mod chain;
mod combinators;
mod resolve;
mod state;

use std::fmt;
use std::rc::Rc;

use vow_log::trace;

use crate::context::Context;
use crate::thenable::{Callback, Thenable};
use crate::value::Value;

pub use chain::Handler;
pub use resolve::Resolver;
pub use state::PromiseState;

use state::PromiseCell;

/// Creation-ordered promise identifier, unique within a context
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PromiseId(pub u64);

impl fmt::Display for PromiseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to a deferred value; clones share the same cell
#[derive(Clone)]
pub struct Promise(Rc<PromiseCell>);

impl Promise {
    /// Create a promise and run `setup` synchronously with its resolving
    /// capability.
    ///
    /// Only the first resolve/reject through the capability has an effect.
    /// Returning `Err(reason)` from `setup` rejects the promise unless it was
    /// already resolved.
    pub fn new<F>(cx: &Context, setup: F) -> Promise
    where
        F: FnOnce(Resolver) -> Result<(), Value>,
    {
        let (promise, resolver) = Self::with_resolvers(cx);
        if let Err(reason) = setup(resolver.clone()) {
            resolver.reject(reason);
        }
        promise
    }

    /// A pending promise plus the capability that settles it
    pub fn with_resolvers(cx: &Context) -> (Promise, Resolver) {
        let id = cx.next_promise_id();
        trace!(cx.logger(), "promise {} created", id);
        let promise = Promise(Rc::new(PromiseCell::new(id, cx.clone())));
        let resolver = Resolver::new(promise.clone());
        (promise, resolver)
    }

    /// A promise nothing can settle
    pub fn pending(cx: &Context) -> Promise {
        Self::with_resolvers(cx).0
    }

    /// Promise for `value`.
    ///
    /// A native promise is returned as is, so `resolve(resolve(v))` is the
    /// same promise as `resolve(v)`. Foreign thenables are adopted.
    pub fn resolve(cx: &Context, value: impl Into<Value>) -> Promise {
        match value.into() {
            Value::Promise(promise) => promise,
            value => {
                let (promise, resolver) = Self::with_resolvers(cx);
                resolver.resolve(value);
                promise
            }
        }
    }

    /// Already rejected promise; the reason is stored as is
    pub fn reject(cx: &Context, reason: impl Into<Value>) -> Promise {
        let (promise, resolver) = Self::with_resolvers(cx);
        resolver.reject(reason);
        promise
    }

    // ==================== Inspection ====================

    pub fn id(&self) -> PromiseId {
        self.0.id
    }

    pub fn context(&self) -> &Context {
        &self.0.cx
    }

    /// Snapshot of the current state
    pub fn state(&self) -> PromiseState {
        self.0.core.borrow().state.clone()
    }

    pub fn is_pending(&self) -> bool {
        !self.0.core.borrow().state.is_settled()
    }

    pub fn is_fulfilled(&self) -> bool {
        self.0.core.borrow().state.is_fulfilled()
    }

    pub fn is_rejected(&self) -> bool {
        self.0.core.borrow().state.is_rejected()
    }

    /// Fulfillment value, if fulfilled
    pub fn value(&self) -> Option<Value> {
        match self.state() {
            PromiseState::Fulfilled(value) => Some(value),
            _ => None,
        }
    }

    /// Rejection reason, if rejected
    pub fn reason(&self) -> Option<Value> {
        match self.state() {
            PromiseState::Rejected(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn ptr_eq(&self, other: &Promise) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Thenable for Promise {
    fn then(&self, on_fulfilled: Callback, on_rejected: Callback) -> Result<(), Value> {
        self.subscribe(on_fulfilled, on_rejected);
        Ok(())
    }
}

impl PartialEq for Promise {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Promise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Promise{}({:?})", self.id(), self.state())
    }
}
