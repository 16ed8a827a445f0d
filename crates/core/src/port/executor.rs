// JobExecutor port - the single-job execution boundary.
//
// Purely functional contract: the same spec must produce equal result
// fields across invocations; the executor must not observe sibling jobs or
// session state, and must not persist side state visible across calls.

use crate::domain::{JobExecutionResult, JobExecutionSpec};

pub trait JobExecutor {
    fn execute_job(&self, spec: &JobExecutionSpec) -> JobExecutionResult;
}

pub mod mocks {
    use super::*;
    use std::cell::Cell;

    /// Always returns the same fixed result, regardless of spec.
    pub struct FixedJobExecutor {
        pub result: JobExecutionResult,
    }

    impl FixedJobExecutor {
        pub fn success() -> Self {
            Self {
                result: JobExecutionResult {
                    success: true,
                    message: "ok".into(),
                    result_token: "fixed-token".into(),
                },
            }
        }

        pub fn failure(message: impl Into<String>) -> Self {
            Self {
                result: JobExecutionResult {
                    success: false,
                    message: message.into(),
                    result_token: String::new(),
                },
            }
        }
    }

    impl JobExecutor for FixedJobExecutor {
        fn execute_job(&self, _spec: &JobExecutionSpec) -> JobExecutionResult {
            self.result.clone()
        }
    }

    /// Fails on the Nth call (1-indexed), succeeds otherwise. Deterministic
    /// given a fixed call sequence; not safe to share across threads.
    pub struct FailingAtCallExecutor {
        fail_at: usize,
        calls: Cell<usize>,
    }

    impl FailingAtCallExecutor {
        pub fn new(fail_at: usize) -> Self {
            Self {
                fail_at,
                calls: Cell::new(0),
            }
        }
    }

    impl JobExecutor for FailingAtCallExecutor {
        fn execute_job(&self, spec: &JobExecutionSpec) -> JobExecutionResult {
            let call = self.calls.get() + 1;
            self.calls.set(call);
            if call == self.fail_at {
                JobExecutionResult {
                    success: false,
                    message: format!("forced failure at call {}", call),
                    result_token: String::new(),
                }
            } else {
                JobExecutionResult {
                    success: true,
                    message: format!("ok: {}", spec.command),
                    result_token: spec.hash.to_string(),
                }
            }
        }
    }
}
