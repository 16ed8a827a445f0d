// Central Error Type for the Crate

use thiserror::Error;

/// Crate-level error type
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using BatchError
pub type Result<T> = std::result::Result<T, BatchError>;
