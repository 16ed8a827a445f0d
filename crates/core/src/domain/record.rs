// Retry lineage and the append-only execution record.

use super::outcome::ExecutionOutcome;
use super::session::SessionJobId;
use super::spec::JobExecutionSpec;
use serde::{Deserialize, Serialize};

/// One attempt within a retry chain. Original: `parent_attempt_id = None`,
/// `retry_index = 0`. Retry: `parent_attempt_id = Some(prev.attempt_id)`,
/// `retry_index = prev.retry_index + 1`, `attempt_id = SessionJobId::retry(prev.attempt_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryAttempt {
    pub attempt_id: SessionJobId,
    pub parent_attempt_id: Option<SessionJobId>,
    pub retry_index: u32,
}

impl RetryAttempt {
    pub fn original(attempt_id: SessionJobId) -> Self {
        Self {
            attempt_id,
            parent_attempt_id: None,
            retry_index: 0,
        }
    }

    /// Create the next retry from `prev`. The retry executor never decides
    /// whether to retry - this is always called by an external caller.
    pub fn retry(prev: &RetryAttempt) -> Self {
        Self {
            attempt_id: SessionJobId::retry(&prev.attempt_id),
            parent_attempt_id: Some(prev.attempt_id.clone()),
            retry_index: prev.retry_index + 1,
        }
    }
}

/// A linear lineage of retry attempts against one unchanging intent.
///
/// Invariants: first attempt has `retry_index == 0` and no parent; each
/// subsequent attempt has a strictly increasing `retry_index` and a parent
/// equal to the preceding attempt's `attempt_id`; `intent` never mutates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryChain {
    pub intent: JobExecutionSpec,
    pub attempts: Vec<RetryAttempt>,
}

impl RetryChain {
    pub fn new(intent: JobExecutionSpec, first_attempt_id: SessionJobId) -> Self {
        Self {
            intent,
            attempts: vec![RetryAttempt::original(first_attempt_id)],
        }
    }

    /// Append the next retry, derived from the chain's current last attempt.
    pub fn add_retry(&mut self) {
        let next = RetryAttempt::retry(self.attempts.last().expect("chain always has ≥1 attempt"));
        self.attempts.push(next);
    }

    pub fn last_attempt(&self) -> &RetryAttempt {
        self.attempts.last().expect("chain always has ≥1 attempt")
    }
}

/// Append-only record of one completed execution attempt. Contains no
/// timestamps, progress, environment data, or resume pointers - sufficient
/// for replay, insufficient for resumption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub attempt_id: SessionJobId,
    pub parent_attempt_id: Option<SessionJobId>,
    pub retry_index: u32,
    pub intent: JobExecutionSpec,
    pub outcome: ExecutionOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::session::SessionId;
    use super::super::spec::{FailureStrategy, RetryPolicy, Target};

    fn intent() -> JobExecutionSpec {
        JobExecutionSpec::create(
            Target::Convert,
            "nx convert",
            vec![],
            RetryPolicy::default(),
            FailureStrategy::Halt,
            vec![],
        )
    }

    #[test]
    fn chain_starts_with_retry_index_zero_and_no_parent() {
        let id = SessionJobId::initial(SessionId::new("s1"), "job-001");
        let chain = RetryChain::new(intent(), id);
        assert_eq!(chain.attempts.len(), 1);
        assert_eq!(chain.attempts[0].retry_index, 0);
        assert!(chain.attempts[0].parent_attempt_id.is_none());
    }

    #[test]
    fn retries_increment_index_and_link_to_parent() {
        let id = SessionJobId::initial(SessionId::new("s1"), "job-001");
        let mut chain = RetryChain::new(intent(), id.clone());
        chain.add_retry();
        chain.add_retry();

        assert_eq!(chain.attempts[1].retry_index, 1);
        assert_eq!(chain.attempts[1].parent_attempt_id, Some(chain.attempts[0].attempt_id.clone()));
        assert_eq!(chain.attempts[2].retry_index, 2);
        assert_eq!(chain.attempts[2].parent_attempt_id, Some(chain.attempts[1].attempt_id.clone()));
    }

    #[test]
    fn intent_is_bit_identical_across_the_chain() {
        let id = SessionJobId::initial(SessionId::new("s1"), "job-001");
        let mut chain = RetryChain::new(intent(), id);
        chain.add_retry();
        assert_eq!(chain.intent, intent());
    }
}
