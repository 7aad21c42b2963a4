//! Batch error types.

use thiserror::Error;

use sift_journal::JournalError;
use sift_schema::SchemaError;
use sift_store::StoreError;

/// Result type for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;

/// Errors that abort a batch. Every variant triggers a full rollback.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("unknown operation type '{kind}' in group '{group}'")]
    UnknownOperationType { group: String, kind: String },

    #[error("record in table {table} is missing identifier field {identifier}")]
    MissingIdentifier { table: String, identifier: String },

    #[error("record not found in {table}: {id}")]
    RecordNotFound { table: String, id: String },

    #[error("unknown column: {column} on table {table}")]
    UnknownColumn { table: String, column: String },

    #[error("malformed batch specification: {message}")]
    Malformed { message: String },

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("journal error: {0}")]
    Journal(#[from] JournalError),
}

impl BatchError {
    pub fn unknown_operation_type(group: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::UnknownOperationType {
            group: group.into(),
            kind: kind.into(),
        }
    }

    pub fn missing_identifier(table: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::MissingIdentifier {
            table: table.into(),
            identifier: identifier.into(),
        }
    }

    pub fn record_not_found(table: impl Into<String>, id: impl Into<String>) -> Self {
        Self::RecordNotFound {
            table: table.into(),
            id: id.into(),
        }
    }

    pub fn unknown_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}
