//! Queue Error Types

use crate::host::error::HostError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("Data layer '{name}' has not been claimed")]
    NotClaimed { name: String },

    #[error(transparent)]
    Host(#[from] HostError),
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;
