// ExecutionRecorder port - append-only sink for ExecutionRecords.
//
// No "read during execution" operation and no "latest state" query: the
// recorder is write-only from the engine's perspective.

use crate::domain::ExecutionRecord;

pub trait ExecutionRecorder {
    fn record(&self, record: ExecutionRecord);
}

/// Reference in-memory recorder. Keeps an ordered vector, append order
/// equal to call order, and exposes it for inspection in tests.
pub struct InMemoryExecutionRecorder {
    records: std::cell::RefCell<Vec<ExecutionRecord>>,
}

impl InMemoryExecutionRecorder {
    pub fn new() -> Self {
        Self {
            records: std::cell::RefCell::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<ExecutionRecord> {
        self.records.borrow().clone()
    }
}

impl Default for InMemoryExecutionRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionRecorder for InMemoryExecutionRecorder {
    fn record(&self, record: ExecutionRecord) {
        self.records.borrow_mut().push(record);
    }
}

/// Discards everything. Used for replay runs, which must never write to a
/// recorder.
pub struct NullExecutionRecorder;

impl ExecutionRecorder for NullExecutionRecorder {
    fn record(&self, _record: ExecutionRecord) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        DeterministicErrorCode, ExecutionOutcome, FailureStrategy, JobExecutionSpec, RetryPolicy,
        SessionId, SessionJobId, Target,
    };

    fn record(retry_index: u32) -> ExecutionRecord {
        ExecutionRecord {
            attempt_id: SessionJobId::initial(SessionId::new("s1"), "job-001"),
            parent_attempt_id: None,
            retry_index,
            intent: JobExecutionSpec::create(
                Target::Convert,
                "nx convert",
                vec![],
                RetryPolicy::default(),
                FailureStrategy::Halt,
                vec![],
            ),
            outcome: ExecutionOutcome::failed(DeterministicErrorCode::ProcessingFailed),
        }
    }

    #[test]
    fn append_order_equals_call_order() {
        let recorder = InMemoryExecutionRecorder::new();
        recorder.record(record(0));
        recorder.record(record(1));
        let records = recorder.records();
        assert_eq!(records[0].retry_index, 0);
        assert_eq!(records[1].retry_index, 1);
    }

    #[test]
    fn null_recorder_discards_everything() {
        let recorder = NullExecutionRecorder;
        recorder.record(record(0));
    }
}
