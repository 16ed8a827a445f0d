// ExecutionReplaySource port - yields the full ordered record sequence
// persisted from a prior run.

use crate::domain::ExecutionRecord;

pub trait ExecutionReplaySource {
    fn load_all(&self) -> Vec<ExecutionRecord>;
}

/// Reference in-memory replay source, typically populated from a prior
/// `InMemoryExecutionRecorder`.
pub struct InMemoryExecutionReplaySource {
    records: Vec<ExecutionRecord>,
}

impl InMemoryExecutionReplaySource {
    pub fn new(records: Vec<ExecutionRecord>) -> Self {
        Self { records }
    }

    /// Load a persisted record set from its JSON encoding (spec §6 "Persisted
    /// record layout"). The only fallible entry point into this port, so it
    /// is the one place the crate-level `BatchError` is actually constructed.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let records: Vec<ExecutionRecord> = serde_json::from_str(json)?;
        Ok(Self::new(records))
    }
}

impl ExecutionReplaySource for InMemoryExecutionReplaySource {
    fn load_all(&self) -> Vec<ExecutionRecord> {
        self.records.clone()
    }
}
