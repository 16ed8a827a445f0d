// Session - immutable planning artifact for a batch of commands.

use super::session::SessionId;
use super::session::SessionJobId;
use serde::{Deserialize, Serialize};

/// One surviving (valid) command within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionJobDescriptor {
    pub job_id: SessionJobId,
    pub command: String,
    pub arguments: Vec<String>,
    pub dependencies: Vec<SessionJobId>,
}

/// Immutable session: a `SessionId` plus an ordered sequence of job descriptors.
///
/// Invariants: positional order of descriptors matches the input command
/// order; every descriptor's `job_id.session` equals the session's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    session_id: SessionId,
    jobs: Vec<SessionJobDescriptor>,
}

impl Session {
    /// Construct a session. Panics in debug builds if any descriptor's
    /// session id disagrees with `session_id` - that would be a planning bug,
    /// not user input, so it is an invariant rather than a `Result`.
    pub fn new(session_id: SessionId, jobs: Vec<SessionJobDescriptor>) -> Self {
        debug_assert!(jobs.iter().all(|j| j.job_id.session == session_id));
        Self { session_id, jobs }
    }

    pub fn id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn jobs(&self) -> &[SessionJobDescriptor] {
        &self.jobs
    }

    pub fn job(&self, job_id: &SessionJobId) -> Option<&SessionJobDescriptor> {
        self.jobs.iter().find(|d| &d.job_id == job_id)
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }
}
