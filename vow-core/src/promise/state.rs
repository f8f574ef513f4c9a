//! Promise state machine
//!
//! `Pending -> Fulfilled` or `Pending -> Rejected`; both are terminal.

use std::cell::RefCell;
use std::fmt;
use std::mem;

use vow_log::{debug, trace};

use super::{Promise, PromiseId};
use crate::context::Context;
use crate::thenable::Callback;
use crate::value::Value;

#[derive(Clone, Debug, PartialEq, Default)]
pub enum PromiseState {
    #[default]
    Pending,
    Fulfilled(Value),
    Rejected(Value),
}

impl PromiseState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, PromiseState::Pending)
    }

    pub fn is_fulfilled(&self) -> bool {
        matches!(self, PromiseState::Fulfilled(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, PromiseState::Rejected(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            PromiseState::Pending => "pending",
            PromiseState::Fulfilled(_) => "fulfilled",
            PromiseState::Rejected(_) => "rejected",
        }
    }
}

impl fmt::Display for PromiseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromiseState::Pending => write!(f, "pending"),
            PromiseState::Fulfilled(value) => write!(f, "fulfilled({value})"),
            PromiseState::Rejected(reason) => write!(f, "rejected({reason})"),
        }
    }
}

/// Shared cell behind a [`Promise`] handle
pub(crate) struct PromiseCell {
    pub(crate) id: PromiseId,
    pub(crate) cx: Context,
    pub(crate) core: RefCell<Core>,
}

#[derive(Default)]
pub(crate) struct Core {
    pub(crate) state: PromiseState,
    fulfill_subscribers: Vec<Callback>,
    reject_subscribers: Vec<Callback>,
}

impl PromiseCell {
    pub(crate) fn new(id: PromiseId, cx: Context) -> Self {
        PromiseCell {
            id,
            cx,
            core: RefCell::new(Core::default()),
        }
    }
}

impl Promise {
    /// Settle as fulfilled. `value` must not be thenable; thenables go
    /// through `resolve::resolve_promise`.
    pub(crate) fn fulfill_now(&self, value: Value) {
        debug_assert!(!value.is_thenable(), "fulfilled with a thenable");
        let subscribers = {
            let mut core = self.0.core.borrow_mut();
            if core.state.is_settled() {
                return;
            }
            core.state = PromiseState::Fulfilled(value.clone());
            core.reject_subscribers.clear();
            mem::take(&mut core.fulfill_subscribers)
        };
        trace!(
            self.0.cx.logger(),
            "promise {} fulfilled with {}, {} subscribers",
            self.0.id,
            value,
            subscribers.len()
        );
        self.dispatch(subscribers, value);
    }

    /// Settle as rejected. Reasons are stored as is, never unwrapped.
    pub(crate) fn reject_now(&self, reason: Value) {
        let subscribers = {
            let mut core = self.0.core.borrow_mut();
            if core.state.is_settled() {
                return;
            }
            core.state = PromiseState::Rejected(reason.clone());
            core.fulfill_subscribers.clear();
            mem::take(&mut core.reject_subscribers)
        };
        if subscribers.is_empty() && self.0.cx.report_unobserved() {
            debug!(
                self.0.cx.logger(),
                "promise {} rejected with no handlers attached: {}", self.0.id, reason
            );
        } else {
            trace!(
                self.0.cx.logger(),
                "promise {} rejected with {}, {} subscribers",
                self.0.id,
                reason,
                subscribers.len()
            );
        }
        self.dispatch(subscribers, reason);
    }

    /// Register one-shot callbacks for the eventual outcome.
    ///
    /// While pending they are queued in registration order. Once settled the
    /// matching callback is scheduled right away, still on a later turn.
    pub(crate) fn subscribe(&self, on_fulfilled: Callback, on_rejected: Callback) {
        match self.state() {
            PromiseState::Pending => {
                let mut core = self.0.core.borrow_mut();
                core.fulfill_subscribers.push(on_fulfilled);
                core.reject_subscribers.push(on_rejected);
            }
            PromiseState::Fulfilled(value) => self.0.cx.schedule(move || on_fulfilled(value)),
            PromiseState::Rejected(reason) => self.0.cx.schedule(move || on_rejected(reason)),
        }
    }

    /// Subscribers were moved out of the cell before this runs, so a callback
    /// that subscribes again never touches the list being fired
    fn dispatch(&self, subscribers: Vec<Callback>, outcome: Value) {
        for subscriber in subscribers {
            let outcome = outcome.clone();
            self.0.cx.schedule(move || subscriber(outcome));
        }
    }
}
