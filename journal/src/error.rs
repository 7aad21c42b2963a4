//! Journal error types.

use thiserror::Error;

use sift_store::StoreError;

/// Result type for journal operations.
pub type JournalResult<T> = Result<T, JournalError>;

/// Errors raised while writing or reading the audit table.
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("malformed audit row: {message}")]
    MalformedRow { message: String },
}

impl JournalError {
    pub fn malformed_row(message: impl Into<String>) -> Self {
        Self::MalformedRow {
            message: message.into(),
        }
    }
}
