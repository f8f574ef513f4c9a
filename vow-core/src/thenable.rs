//! The `then` capability
//!
//! Anything that can deliver a value later implements [`Thenable`]. Native
//! promises implement it too, but resolution recognises them and takes a
//! direct path; the trait object path exists for foreign implementations.

use crate::value::Value;

/// One-shot callback receiving a value or a reason
pub type Callback = Box<dyn FnOnce(Value)>;

pub trait Thenable {
    /// Subscribe to the eventual outcome.
    ///
    /// Implementations call at most one of the callbacks, at most once; the
    /// resolving side tolerates violations by ignoring every call after the
    /// first. Returning `Err(reason)` before either callback ran rejects the
    /// adopting promise with `reason`.
    fn then(&self, on_fulfilled: Callback, on_rejected: Callback) -> Result<(), Value>;
}
