//! Chaining operators: `then`, `catch`, `finally`

use std::cell::Cell;
use std::rc::Rc;

use super::{Promise, Resolver};
use crate::context::Context;
use crate::thenable::Callback;
use crate::value::Value;

/// Reaction callback. `Err` plays the role of a thrown error and rejects the
/// derived promise.
pub type Handler = Box<dyn FnOnce(Value) -> Result<Value, Value>>;

impl Promise {
    /// Derive a promise from this one's outcome.
    ///
    /// A missing fulfillment handler passes the value through; a missing
    /// rejection handler re-raises the reason. Handlers always run on a later
    /// turn of the task queue, even when this promise has already settled.
    pub fn then_with(&self, on_fulfilled: Option<Handler>, on_rejected: Option<Handler>) -> Promise {
        let (next, resolver) = Promise::with_resolvers(self.context());

        let fulfilled: Callback = {
            let resolver = resolver.clone();
            Box::new(move |value| {
                let outcome = match on_fulfilled {
                    Some(handler) => handler(value),
                    None => Ok(value),
                };
                settle(&resolver, outcome);
            })
        };
        let rejected: Callback = Box::new(move |reason| {
            let outcome = match on_rejected {
                Some(handler) => handler(reason),
                None => Err(reason),
            };
            settle(&resolver, outcome);
        });

        self.subscribe(fulfilled, rejected);
        next
    }

    /// `then` with only a fulfillment handler
    pub fn then<F>(&self, on_fulfilled: F) -> Promise
    where
        F: FnOnce(Value) -> Result<Value, Value> + 'static,
    {
        self.then_with(Some(Box::new(on_fulfilled)), None)
    }

    /// `then` with both handlers
    pub fn then_or<F, R>(&self, on_fulfilled: F, on_rejected: R) -> Promise
    where
        F: FnOnce(Value) -> Result<Value, Value> + 'static,
        R: FnOnce(Value) -> Result<Value, Value> + 'static,
    {
        self.then_with(Some(Box::new(on_fulfilled)), Some(Box::new(on_rejected)))
    }

    pub fn catch<R>(&self, on_rejected: R) -> Promise
    where
        R: FnOnce(Value) -> Result<Value, Value> + 'static,
    {
        self.then_with(None, Some(Box::new(on_rejected)))
    }

    /// Run `on_finally` on either outcome, wait for whatever it returns, then
    /// restore the original outcome.
    ///
    /// Only a failure from `on_finally` (an `Err` or a rejecting thenable)
    /// changes the outcome; its fulfillment value is discarded.
    pub fn finally<F>(&self, on_finally: F) -> Promise
    where
        F: FnOnce() -> Result<Value, Value> + 'static,
    {
        // Exactly one of the two reactions ever runs
        let slot = Rc::new(Cell::new(Some(on_finally)));
        let cx = self.context().clone();
        let fulfilled = {
            let slot = Rc::clone(&slot);
            let cx = cx.clone();
            move |value| run_finally(&cx, &*slot, Ok(value))
        };
        let rejected = move |reason| run_finally(&cx, &*slot, Err(reason));
        self.then_or(fulfilled, rejected)
    }
}

fn settle(resolver: &Resolver, outcome: Result<Value, Value>) {
    match outcome {
        Ok(value) => resolver.resolve(value),
        Err(reason) => resolver.reject(reason),
    }
}

fn run_finally<F>(cx: &Context, slot: &Cell<Option<F>>, original: Result<Value, Value>) -> Result<Value, Value>
where
    F: FnOnce() -> Result<Value, Value>,
{
    let produced = match slot.take() {
        Some(on_finally) => on_finally()?,
        None => Value::Null,
    };
    let restored = Promise::resolve(cx, produced).then(move |_| original);
    Ok(Value::Promise(restored))
}
