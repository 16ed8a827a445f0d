// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: crate::domain::state::ExecutionState,
        to: crate::domain::state::ExecutionState,
    },

    #[error("job not found: {0:?}")]
    NotFound(crate::domain::session::SessionJobId),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("job execution spec not found for: {0:?}")]
    SpecNotFound(crate::domain::session::SessionJobId),
}

pub type Result<T> = std::result::Result<T, DomainError>;
