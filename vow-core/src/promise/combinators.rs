//! Combinators over ordered collections of values
//!
//! Every input goes through `Promise::resolve` first, so plain values count
//! as already fulfilled and foreign thenables are adopted. Each combinator
//! settles its result through one shared capability; whichever input decides
//! the outcome first wins and later ones are ignored.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use vow_log::debug;

use super::Promise;
use crate::context::Context;
use crate::error::PromiseError;
use crate::value::{Settlement, Value};

/// Positional result slots filled as inputs settle
struct Slots {
    values: RefCell<Vec<Value>>,
    remaining: Cell<usize>,
}

impl Slots {
    fn new(len: usize) -> Rc<Self> {
        Rc::new(Slots {
            values: RefCell::new(vec![Value::Null; len]),
            remaining: Cell::new(len),
        })
    }

    /// Store `value` at `index`; returns all values once every slot is filled
    fn fill(&self, index: usize, value: Value) -> Option<Vec<Value>> {
        self.values.borrow_mut()[index] = value;
        let remaining = self.remaining.get() - 1;
        self.remaining.set(remaining);
        (remaining == 0).then(|| self.values.take())
    }
}

fn contenders<I>(cx: &Context, inputs: I) -> Vec<Promise>
where
    I: IntoIterator<Item = Value>,
{
    inputs.into_iter().map(|value| Promise::resolve(cx, value)).collect()
}

impl Promise {
    /// Fulfills with every result in input order, or rejects with the first
    /// rejection. An empty input fulfills with an empty list.
    pub fn all<I>(cx: &Context, inputs: I) -> Promise
    where
        I: IntoIterator<Item = Value>,
    {
        let inputs = contenders(cx, inputs);
        let (result, resolver) = Promise::with_resolvers(cx);
        debug!(cx.logger(), "all {} over {} inputs", result.id(), inputs.len());
        if inputs.is_empty() {
            resolver.resolve(Value::list([]));
            return result;
        }

        let slots = Slots::new(inputs.len());
        for (index, input) in inputs.iter().enumerate() {
            let slots = Rc::clone(&slots);
            let on_fulfilled = resolver.clone();
            let on_rejected = resolver.clone();
            input.subscribe(
                Box::new(move |value| {
                    if let Some(values) = slots.fill(index, value) {
                        on_fulfilled.resolve(Value::from(values));
                    }
                }),
                Box::new(move |reason| on_rejected.reject(reason)),
            );
        }
        result
    }

    /// Settles like whichever input settles first.
    ///
    /// An empty input never settles.
    pub fn race<I>(cx: &Context, inputs: I) -> Promise
    where
        I: IntoIterator<Item = Value>,
    {
        let inputs = contenders(cx, inputs);
        let (result, resolver) = Promise::with_resolvers(cx);
        if inputs.is_empty() {
            debug!(cx.logger(), "race {} has no contenders and stays pending", result.id());
            return result;
        }
        debug!(cx.logger(), "race {} over {} inputs", result.id(), inputs.len());

        for input in &inputs {
            let on_fulfilled = resolver.clone();
            let on_rejected = resolver.clone();
            input.subscribe(
                Box::new(move |value| on_fulfilled.resolve(value)),
                Box::new(move |reason| on_rejected.reject(reason)),
            );
        }
        result
    }

    /// Fulfills with the first fulfillment. If every input rejects, rejects
    /// with an aggregate failure holding the reasons in input order; an
    /// empty input rejects right away with no reasons.
    pub fn any<I>(cx: &Context, inputs: I) -> Promise
    where
        I: IntoIterator<Item = Value>,
    {
        let inputs = contenders(cx, inputs);
        let (result, resolver) = Promise::with_resolvers(cx);
        debug!(cx.logger(), "any {} over {} inputs", result.id(), inputs.len());
        if inputs.is_empty() {
            resolver.reject(PromiseError::Aggregate { reasons: Vec::new() });
            return result;
        }

        let reasons = Slots::new(inputs.len());
        for (index, input) in inputs.iter().enumerate() {
            let reasons = Rc::clone(&reasons);
            let on_fulfilled = resolver.clone();
            let on_rejected = resolver.clone();
            input.subscribe(
                Box::new(move |value| on_fulfilled.resolve(value)),
                Box::new(move |reason| {
                    if let Some(reasons) = reasons.fill(index, reason) {
                        on_rejected.reject(PromiseError::Aggregate { reasons });
                    }
                }),
            );
        }
        result
    }

    /// Fulfills once every input settled, with one [`Settlement`] per input
    /// in input order. Never rejects.
    pub fn all_settled<I>(cx: &Context, inputs: I) -> Promise
    where
        I: IntoIterator<Item = Value>,
    {
        let inputs = contenders(cx, inputs);
        let (result, resolver) = Promise::with_resolvers(cx);
        debug!(cx.logger(), "all_settled {} over {} inputs", result.id(), inputs.len());
        if inputs.is_empty() {
            resolver.resolve(Value::list([]));
            return result;
        }

        let slots = Slots::new(inputs.len());
        for (index, input) in inputs.iter().enumerate() {
            let fulfilled_slots = Rc::clone(&slots);
            let rejected_slots = Rc::clone(&slots);
            let on_fulfilled = resolver.clone();
            let on_rejected = resolver.clone();
            input.subscribe(
                Box::new(move |value| {
                    let record = Value::from(Settlement::Fulfilled(value));
                    if let Some(records) = fulfilled_slots.fill(index, record) {
                        on_fulfilled.resolve(Value::from(records));
                    }
                }),
                Box::new(move |reason| {
                    let record = Value::from(Settlement::Rejected(reason));
                    if let Some(records) = rejected_slots.fill(index, record) {
                        on_rejected.resolve(Value::from(records));
                    }
                }),
            );
        }
        result
    }
}
