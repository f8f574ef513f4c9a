//! Runtime errors

use thiserror::Error;
use vow_core::{LoopError, Value};

/// Why a run did not produce a fulfilled value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VowError {
    /// The awaited promise rejected
    #[error("promise rejected: {0}")]
    Rejected(Value),

    /// The event loop ran out of work with the awaited promise still pending
    #[error("event loop went idle with the promise still pending")]
    Stalled,

    /// A microtask drain hit its budget
    #[error("microtask budget of {limit} exhausted")]
    BudgetExhausted { limit: usize },

    #[error("turn limit of {limit} reached")]
    TurnLimit { limit: usize },

    /// Invalid scenario input
    #[error("scenario error: {0}")]
    Scenario(String),

    #[error("configuration already initialized")]
    AlreadyInitialized,
}

impl VowError {
    /// Short machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            VowError::Rejected(_) => "rejected",
            VowError::Stalled => "stalled",
            VowError::BudgetExhausted { .. } => "budget",
            VowError::TurnLimit { .. } => "turn_limit",
            VowError::Scenario(_) => "scenario",
            VowError::AlreadyInitialized => "config",
        }
    }

    /// Rejection reason, if this error carries one
    pub fn reason(&self) -> Option<&Value> {
        match self {
            VowError::Rejected(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<LoopError> for VowError {
    fn from(error: LoopError) -> Self {
        match error {
            LoopError::MicrotaskBudget { limit } => VowError::BudgetExhausted { limit },
            LoopError::TurnLimit { limit } => VowError::TurnLimit { limit },
        }
    }
}
