//! Identity types for records and batches.
//!
//! Record identifiers are opaque text: the backend stores whatever the
//! designated identifier column holds. Freshly minted identifiers are
//! v4 UUIDs, but a backend populated by other writers may carry any
//! textual identifier.

use std::fmt;

use uuid::Uuid;

/// Identifier of a single record in the designated identifier column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Mint a fresh v4 UUID identifier.
    pub fn mint() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns true if the given text parses as a UUID.
    ///
    /// Batch group keys with this shape address existing records.
    pub fn is_uuid(text: &str) -> bool {
        Uuid::parse_str(text).is_ok()
    }

    /// The identifier as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier tagging every audit entry written by one batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BatchId(String);

impl BatchId {
    /// Mint a fresh v4 UUID batch identifier.
    pub fn mint() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The identifier as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BatchId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BatchId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
