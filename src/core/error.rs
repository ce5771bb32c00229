use crate::services::StoreError;
use thiserror::Error;

/// Errors surfaced by the resolver and the confirmation engine
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// First upstream failure hit while resolving; partial results are dropped
    #[error("Failed to resolve matches: {0}")]
    Resolution(#[source] StoreError),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Store error: {0}")]
    Store(#[source] StoreError),
}

impl MatchError {
    /// Map a store failure outside of resolution, keeping `NotFound` distinct
    pub fn from_store(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => MatchError::NotFound(what),
            other => MatchError::Store(other),
        }
    }

    /// Short machine-readable label for error responses
    pub fn kind(&self) -> &'static str {
        match self {
            MatchError::NotFound(_) => "not_found",
            MatchError::Resolution(_) => "resolution_error",
            MatchError::Validation(_) => "validation_error",
            MatchError::Forbidden(_) => "forbidden",
            MatchError::Store(_) => "store_error",
        }
    }
}
