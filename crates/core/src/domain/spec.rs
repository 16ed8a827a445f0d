// JobExecutionSpec - immutable, content-hashed execution intent
//
// Two specs are equal iff all fields are equal; the hash is computed from a
// fixed-field-order canonical serialization so it is bijective with the
// field values for serialization purposes.

use super::hash::sha256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Component target for job execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    Convert,
    AudioLab,
    VideoTrans,
    MetaFix,
}

impl Target {
    fn stable_int(self) -> u8 {
        match self {
            Target::Convert => 0,
            Target::AudioLab => 1,
            Target::VideoTrans => 2,
            Target::MetaFix => 3,
        }
    }
}

/// Failure handling strategy for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureStrategy {
    Halt,
    Continue,
    Skip,
}

impl FailureStrategy {
    fn stable_int(self) -> u8 {
        match self {
            FailureStrategy::Halt => 0,
            FailureStrategy::Continue => 1,
            FailureStrategy::Skip => 2,
        }
    }
}

/// Declarative retry policy; the core never acts on this autonomously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub halt_on_failure: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            halt_on_failure: true,
        }
    }
}

/// Content-derived hash identifying a `JobExecutionSpec`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobSpecHash(pub String);

impl fmt::Display for JobSpecHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable, content-hashed execution intent for a single job.
///
/// FORBIDDEN CONTENTS: execution state, timestamps, retry counters, progress,
/// runtime identities. Only declarative target/parameters/policy data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobExecutionSpec {
    pub hash: JobSpecHash,
    pub target: Target,
    pub command: String,
    pub arguments: Vec<String>,
    pub retry_policy: RetryPolicy,
    pub failure_strategy: FailureStrategy,
    pub dependencies: Vec<JobSpecHash>,
}

impl JobExecutionSpec {
    /// Create a spec with a freshly computed content hash.
    pub fn create(
        target: Target,
        command: impl Into<String>,
        arguments: Vec<String>,
        retry_policy: RetryPolicy,
        failure_strategy: FailureStrategy,
        dependencies: Vec<JobSpecHash>,
    ) -> Self {
        let command = command.into();
        let hash = Self::compute_hash(
            target,
            &command,
            &arguments,
            &retry_policy,
            failure_strategy,
            &dependencies,
        );
        Self {
            hash,
            target,
            command,
            arguments,
            retry_policy,
            failure_strategy,
            dependencies,
        }
    }

    /// Canonical serialization with fixed field order (spec §4.3).
    fn canonical(
        target: Target,
        command: &str,
        arguments: &[String],
        retry_policy: &RetryPolicy,
        failure_strategy: FailureStrategy,
        dependencies: &[JobSpecHash],
    ) -> String {
        let mut out = String::new();
        out.push_str(&format!("target:{};", target.stable_int()));
        out.push_str(&format!("command:{};", command));
        out.push_str("arguments:");
        for arg in arguments {
            out.push_str(arg);
            out.push(',');
        }
        out.push(';');
        out.push_str(&format!(
            "retry_policy:{},{};",
            retry_policy.max_attempts,
            if retry_policy.halt_on_failure { 1 } else { 0 }
        ));
        out.push_str(&format!("failure_strategy:{};", failure_strategy.stable_int()));
        out.push_str("dependencies:");
        for dep in dependencies {
            out.push_str(&dep.0);
            out.push(',');
        }
        out.push(';');
        out
    }

    fn compute_hash(
        target: Target,
        command: &str,
        arguments: &[String],
        retry_policy: &RetryPolicy,
        failure_strategy: FailureStrategy,
        dependencies: &[JobSpecHash],
    ) -> JobSpecHash {
        let canonical = Self::canonical(
            target,
            command,
            arguments,
            retry_policy,
            failure_strategy,
            dependencies,
        );
        JobSpecHash(sha256(canonical.as_bytes()).to_hex())
    }
}
