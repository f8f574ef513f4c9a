//! Result types returned by the runtime

use vow_core::{PromiseId, RunSummary, Settlement};

/// How an awaited promise ended, plus what the loop did to get there
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub promise: PromiseId,
    pub settlement: Settlement,
    /// Turns run by this call only
    pub summary: RunSummary,
}

impl Outcome {
    pub fn is_fulfilled(&self) -> bool {
        matches!(self.settlement, Settlement::Fulfilled(_))
    }
}
