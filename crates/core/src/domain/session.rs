// Session identity types
//
// SessionId identifies a batch planning session; SessionJobId identifies one
// execution attempt of one job within that session.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Identity of a planning session. Ordered lexicographically on its string value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ephemeral execution identity for one job attempt.
///
/// Ordered lexicographically on `(session, job_value, attempt_index)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionJobId {
    pub session: SessionId,
    pub job_value: String,
    pub attempt_index: u32,
}

impl SessionJobId {
    /// First attempt: `attempt_index = 0`.
    pub fn initial(session: SessionId, job_value: impl Into<String>) -> Self {
        Self {
            session,
            job_value: job_value.into(),
            attempt_index: 0,
        }
    }

    /// Next retry attempt, copying session/job_value and incrementing the attempt index.
    pub fn retry(prev: &SessionJobId) -> Self {
        Self {
            session: prev.session.clone(),
            job_value: prev.job_value.clone(),
            attempt_index: prev.attempt_index + 1,
        }
    }
}

impl PartialOrd for SessionJobId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SessionJobId {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.session, &self.job_value, self.attempt_index).cmp(&(
            &other.session,
            &other.job_value,
            other.attempt_index,
        ))
    }
}

impl fmt::Display for SessionJobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.session, self.job_value, self.attempt_index)
    }
}
