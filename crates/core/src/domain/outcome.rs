// Deterministic execution outcomes for persistence.
//
// No timestamps, no runtime state, no environment data - sufficient for
// replay verification, insufficient for resume.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeterministicErrorCode {
    None,
    InvalidInput,
    ProcessingFailed,
    ResourceUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionOutcome {
    Success,
    Failed(DeterministicErrorCode),
}

impl ExecutionOutcome {
    pub fn success() -> Self {
        ExecutionOutcome::Success
    }

    pub fn failed(code: DeterministicErrorCode) -> Self {
        ExecutionOutcome::Failed(code)
    }

    /// `success ⇒ Success`; `¬success ⇒ Failed(ProcessingFailed)` (spec §9 open question (b)).
    pub fn from_result_success(success: bool) -> Self {
        if success {
            ExecutionOutcome::Success
        } else {
            ExecutionOutcome::Failed(DeterministicErrorCode::ProcessingFailed)
        }
    }
}
