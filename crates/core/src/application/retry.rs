// RetryExecutor - executes one attempt and optionally records the outcome.
//
// Never decides whether to retry: retries are created externally via
// `RetryAttempt::retry` / `RetryChain::add_retry`. `intent` is passed through
// byte-identical on every attempt.

use crate::domain::{ExecutionOutcome, ExecutionRecord, JobExecutionResult, JobExecutionSpec, RetryAttempt};
use crate::port::{ExecutionRecorder, JobExecutor};
use tracing::info;

pub struct RetryExecutor<'a> {
    executor: &'a dyn JobExecutor,
    recorder: Option<&'a dyn ExecutionRecorder>,
}

impl<'a> RetryExecutor<'a> {
    pub fn new(executor: &'a dyn JobExecutor, recorder: Option<&'a dyn ExecutionRecorder>) -> Self {
        Self { executor, recorder }
    }

    /// Execute one attempt against an unchanging `intent`. If a recorder is
    /// configured, appends exactly one `ExecutionRecord` derived from
    /// `(attempt.attempt_id, attempt.parent_attempt_id, attempt.retry_index,
    /// intent, outcome)`.
    pub fn execute_retry(&self, intent: &JobExecutionSpec, attempt: &RetryAttempt) -> JobExecutionResult {
        let result = self.executor.execute_job(intent);

        info!(
            attempt_id = %attempt.attempt_id,
            retry_index = attempt.retry_index,
            success = result.success,
            "retry attempt executed"
        );

        if let Some(recorder) = self.recorder {
            let outcome = ExecutionOutcome::from_result_success(result.success);
            recorder.record(ExecutionRecord {
                attempt_id: attempt.attempt_id.clone(),
                parent_attempt_id: attempt.parent_attempt_id.clone(),
                retry_index: attempt.retry_index,
                intent: intent.clone(),
                outcome,
            });
        }

        result
    }
}
