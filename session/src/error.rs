//! Session error types.

use thiserror::Error;

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Search error.
    #[error("search error: {0}")]
    Search(#[from] sift_search::SearchError),

    /// Batch error.
    #[error("batch error: {0}")]
    Batch(#[from] sift_batch::BatchError),

    /// Schema error.
    #[error("schema error: {0}")]
    Schema(#[from] sift_schema::SchemaError),

    /// Store error.
    #[error("store error: {0}")]
    Store(#[from] sift_store::StoreError),

    /// Journal error.
    #[error("journal error: {0}")]
    Journal(#[from] sift_journal::JournalError),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
