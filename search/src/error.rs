//! Search error types.

use thiserror::Error;

use sift_schema::SchemaError;
use sift_store::StoreError;

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur while parsing or executing a search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search specification must carry a top-level 'filters' list")]
    MissingFilters,

    #[error("filter #{index} is missing '{key}'")]
    MissingFilterKey { index: usize, key: &'static str },

    #[error("group combination #{index} is missing '{key}'")]
    MissingCombinationKey { index: usize, key: &'static str },

    #[error("unsupported operator: {operator}")]
    UnsupportedOperator { operator: String },

    #[error("unsupported logic: {logic}")]
    UnsupportedLogic { logic: String },

    #[error("filter #{index} has a non-scalar value")]
    InvalidValue { index: usize },

    #[error("group {group} is not covered by any group combination")]
    UncoveredGroup { group: i64 },

    #[error("malformed search specification: {message}")]
    Malformed { message: String },

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl SearchError {
    pub fn unsupported_operator(operator: impl Into<String>) -> Self {
        Self::UnsupportedOperator {
            operator: operator.into(),
        }
    }

    pub fn unsupported_logic(logic: impl Into<String>) -> Self {
        Self::UnsupportedLogic {
            logic: logic.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}
