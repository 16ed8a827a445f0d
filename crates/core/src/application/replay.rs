// ReplayDriver - offline re-execution of persisted records to verify
// outcome-level determinism.
//
// Never short-circuits on recorded outcomes: every record is re-executed.
// Has no runtime dependency on a live engine, and must never write to a
// recorder (callers should pass a `NullExecutionRecorder` to the
// `RetryExecutor` used here).

use crate::application::retry::RetryExecutor;
use crate::domain::{ExecutionOutcome, ExecutionRecord, SessionId, SessionJobId};
use crate::domain::RetryAttempt;
use crate::port::ExecutionReplaySource;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayMismatch {
    pub retry_index: u32,
    pub expected: ExecutionOutcome,
    pub actual: ExecutionOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    pub deterministic_match: bool,
    pub mismatches: Vec<ReplayMismatch>,
}

impl ReplayReport {
    fn success() -> Self {
        Self {
            deterministic_match: true,
            mismatches: Vec::new(),
        }
    }

    fn divergence(mismatches: Vec<ReplayMismatch>) -> Self {
        Self {
            deterministic_match: false,
            mismatches,
        }
    }
}

/// Reorder records into `intent.hash`-keyed groups, each sorted by
/// `retry_index`, without resorting to a hash map: group boundaries are
/// found by sorting a vector of indices by hash value.
///
/// Kept for future retry-chain validation; the outcome check in
/// `replay_and_verify` re-executes records in load order regardless.
pub fn group_by_intent_hash(records: &[ExecutionRecord]) -> Vec<Vec<&ExecutionRecord>> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|&a, &b| {
        records[a]
            .intent
            .hash
            .cmp(&records[b].intent.hash)
            .then(records[a].retry_index.cmp(&records[b].retry_index))
    });

    let mut groups: Vec<Vec<&ExecutionRecord>> = Vec::new();
    for index in order {
        let record = &records[index];
        match groups.last_mut() {
            Some(group) if group[0].intent.hash == record.intent.hash => group.push(record),
            _ => groups.push(vec![record]),
        }
    }
    groups
}

pub struct ReplayDriver<'a> {
    retry_executor: RetryExecutor<'a>,
    replay_session_id: SessionId,
}

impl<'a> ReplayDriver<'a> {
    pub fn new(retry_executor: RetryExecutor<'a>, replay_session_id: SessionId) -> Self {
        Self {
            retry_executor,
            replay_session_id,
        }
    }

    /// Re-execute every record from `source` and compare the fresh outcome
    /// against the recorded one.
    pub fn replay_and_verify(&self, source: &dyn ExecutionReplaySource) -> ReplayReport {
        let records = source.load_all();
        if records.is_empty() {
            return ReplayReport::success();
        }

        let mut mismatches = Vec::new();

        for record in &records {
            let fresh_attempt = RetryAttempt {
                attempt_id: SessionJobId::initial(
                    self.replay_session_id.clone(),
                    format!("replay-{}", record.retry_index),
                ),
                parent_attempt_id: None,
                retry_index: record.retry_index,
            };

            let result = self.retry_executor.execute_retry(&record.intent, &fresh_attempt);
            let actual = ExecutionOutcome::from_result_success(result.success);

            if actual != record.outcome {
                mismatches.push(ReplayMismatch {
                    retry_index: record.retry_index,
                    expected: record.outcome,
                    actual,
                });
            }
        }

        info!(
            record_count = records.len(),
            mismatch_count = mismatches.len(),
            "replay complete"
        );

        if mismatches.is_empty() {
            ReplayReport::success()
        } else {
            ReplayReport::divergence(mismatches)
        }
    }
}
