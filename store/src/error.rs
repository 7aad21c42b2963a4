//! Store error types.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while talking to a backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("statement failed: {message}")]
    Statement { message: String },

    #[error("transaction already active")]
    TransactionActive,

    #[error("no active transaction")]
    NoTransaction,
}

impl StoreError {
    pub fn statement(message: impl Into<String>) -> Self {
        Self::Statement {
            message: message.into(),
        }
    }
}
