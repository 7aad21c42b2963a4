//! Schema error types.

use thiserror::Error;

use sift_store::StoreError;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised by schema lookups and validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("unknown table: {table}")]
    UnknownTable { table: String },

    #[error("unknown column: {column} on table {table}")]
    UnknownColumn { table: String, column: String },

    #[error("table {table} does not carry identifier column {identifier}")]
    MissingIdentifierColumn { table: String, identifier: String },

    #[error(
        "identifier column {identifier} is not part of the primary key of {table} (found: {found:?})"
    )]
    IdentifierNotPrimary {
        table: String,
        identifier: String,
        found: Vec<String>,
    },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl SchemaError {
    pub fn unknown_table(table: impl Into<String>) -> Self {
        Self::UnknownTable {
            table: table.into(),
        }
    }

    pub fn unknown_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn missing_identifier_column(
        table: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self::MissingIdentifierColumn {
            table: table.into(),
            identifier: identifier.into(),
        }
    }
}
