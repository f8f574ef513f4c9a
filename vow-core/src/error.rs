//! Promise and event loop errors

use serde_json::json;
use thiserror::Error;

use crate::promise::PromiseId;
use crate::value::Value;

/// Errors the runtime itself produces as rejection reasons
///
/// These travel inside [`Value::Error`]; callers can reject with any value,
/// this enum only covers the failures synthesized by the runtime.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PromiseError {
    /// A promise was resolved with itself
    #[error("TypeError: Chaining cycle detected for promise {id}")]
    ChainingCycle { id: PromiseId },

    /// Every input of `any` rejected; reasons are in input order
    #[error("AggregateError: All promises were rejected")]
    Aggregate { reasons: Vec<Value> },
}

impl PromiseError {
    pub fn name(&self) -> &'static str {
        match self {
            PromiseError::ChainingCycle { .. } => "TypeError",
            PromiseError::Aggregate { .. } => "AggregateError",
        }
    }

    /// Reasons carried by an aggregate failure
    pub fn reasons(&self) -> Option<&[Value]> {
        match self {
            PromiseError::Aggregate { reasons } => Some(reasons.as_slice()),
            PromiseError::ChainingCycle { .. } => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut object = json!({
            "name": self.name(),
            "message": self.to_string(),
        });
        if let PromiseError::Aggregate { reasons } = self {
            object["errors"] = serde_json::Value::Array(reasons.iter().map(Value::to_json).collect());
        }
        object
    }
}

/// Event loop failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoopError {
    /// A single drain ran this many microtasks and the queue was still not empty
    #[error("microtask budget exhausted: {limit} tasks ran without the queue draining")]
    MicrotaskBudget { limit: usize },

    #[error("turn limit of {limit} reached with work still pending")]
    TurnLimit { limit: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let cycle = PromiseError::ChainingCycle { id: PromiseId(4) };
        assert_eq!(cycle.to_string(), "TypeError: Chaining cycle detected for promise #4");

        let aggregate = PromiseError::Aggregate { reasons: vec![] };
        assert_eq!(aggregate.to_string(), "AggregateError: All promises were rejected");

        let budget = LoopError::MicrotaskBudget { limit: 10 };
        assert!(budget.to_string().contains("10 tasks"));
    }

    #[test]
    fn test_aggregate_json_lists_reasons() {
        let aggregate = PromiseError::Aggregate {
            reasons: vec![Value::str("a"), Value::str("b")],
        };
        assert_eq!(aggregate.reasons().map(<[Value]>::len), Some(2));
        assert_eq!(
            aggregate.to_json(),
            json!({
                "name": "AggregateError",
                "message": "AggregateError: All promises were rejected",
                "errors": ["a", "b"],
            })
        );
    }
}
