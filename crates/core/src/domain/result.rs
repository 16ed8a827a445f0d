// JobExecutionResult - what a single-job executor returns.
//
// Contains only execution result information, not identity: the executor
// operates on JobExecutionSpec (intent) and returns this result; SessionJobId
// (execution identity) stays owned by the execution engine.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobExecutionResult {
    pub success: bool,
    pub message: String,
    pub result_token: String,
}
