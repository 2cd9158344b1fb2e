//! Errors returned by the leaderboard service.

use podium_core::ValidationError;
use thiserror::Error;

use crate::storage::StorageError;

/// Failure of a leaderboard operation.
///
/// Every variant is terminal for the current operation. Nothing is retried
/// and a failed mutation leaves the persisted table unchanged.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The submission was rejected before any storage access.
    #[error("invalid record: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ServiceError {
    /// Short label for logs and spans.
    #[must_use]
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::Validation(_) => "rejected",
            Self::Storage(StorageError::Read(_)) => "read_error",
            Self::Storage(StorageError::Write(_)) => "write_error",
        }
    }
}
