//! Engine configuration.
//!
//! One explicit configuration value passed into each component at
//! construction. There is no global state: two sessions with different
//! identifier columns can coexist in one process.

use serde::Deserialize;

/// Default audit table name.
const DEFAULT_AUDIT_TABLE: &str = "field_log";

/// Engine configuration: the designated identifier column used uniformly
/// across tables, and the table audit entries are appended to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Name of the identifier column (e.g. the UUID column).
    pub identifier_column: String,
    /// Name of the append-only audit table. Excluded from search and
    /// mutation targets.
    #[serde(default = "default_audit_table")]
    pub audit_table: String,
}

fn default_audit_table() -> String {
    DEFAULT_AUDIT_TABLE.to_string()
}

impl Config {
    /// Create a configuration with the default audit table name.
    pub fn new(identifier_column: impl Into<String>) -> Self {
        Self {
            identifier_column: identifier_column.into(),
            audit_table: default_audit_table(),
        }
    }

    /// Override the audit table name.
    pub fn with_audit_table(mut self, table: impl Into<String>) -> Self {
        self.audit_table = table.into();
        self
    }
}
