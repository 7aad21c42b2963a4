//! The Catalog - per-call schema lookup.

use sift_core::Config;
use sift_store::Backend;

use crate::error::{SchemaError, SchemaResult};

/// Answers schema questions for one operation.
///
/// Borrowed by the search and batch executors for the duration of a
/// single search or batch; never cached across operations.
pub struct Catalog<'b> {
    backend: &'b dyn Backend,
    config: &'b Config,
}

impl<'b> Catalog<'b> {
    /// Create a catalog over a backend.
    pub fn new(backend: &'b dyn Backend, config: &'b Config) -> Self {
        Self { backend, config }
    }

    /// The configured identifier column name.
    pub fn identifier_column(&self) -> &str {
        &self.config.identifier_column
    }

    /// Names of tables participating in search and mutation.
    ///
    /// The audit table is never a target.
    pub fn tables(&self) -> SchemaResult<Vec<String>> {
        let mut tables = self.backend.table_names()?;
        tables.retain(|t| t != &self.config.audit_table);
        Ok(tables)
    }

    /// Ordered column names of a table.
    pub fn columns(&self, table: &str) -> SchemaResult<Vec<String>> {
        let columns = self.backend.column_names(table)?;
        if columns.is_empty() {
            return Err(SchemaError::unknown_table(table));
        }
        Ok(columns)
    }

    /// Whether the table carries the configured identifier column.
    pub fn has_identifier(&self, table: &str) -> SchemaResult<bool> {
        let columns = self.columns(table)?;
        Ok(columns.iter().any(|c| c == &self.config.identifier_column))
    }

    /// Require the identifier column on a table, failing otherwise.
    ///
    /// The strict path for explicitly named tables; wildcard expansion
    /// uses `identifier_tables` instead and skips silently.
    pub fn require_identifier(&self, table: &str) -> SchemaResult<()> {
        if self.has_identifier(table)? {
            Ok(())
        } else {
            Err(SchemaError::missing_identifier_column(
                table,
                &self.config.identifier_column,
            ))
        }
    }

    /// Tables eligible for wildcard targets: those carrying the
    /// identifier column. Non-conforming tables are excluded, not errors.
    pub fn identifier_tables(&self) -> SchemaResult<Vec<String>> {
        let mut eligible = Vec::new();
        for table in self.tables()? {
            if self.has_identifier(&table)? {
                eligible.push(table);
            }
        }
        Ok(eligible)
    }

    /// Columns currently forming the table's primary key.
    pub fn primary_key_columns(&self, table: &str) -> SchemaResult<Vec<String>> {
        // Force the unknown-table error before asking for keys.
        self.columns(table)?;
        Ok(self.backend.primary_key_columns(table)?)
    }

    /// Strict validation pass: every participating table's primary key
    /// must include the identifier column.
    pub fn validate_identifier_keys(&self) -> SchemaResult<()> {
        for table in self.tables()? {
            let keys = self.primary_key_columns(&table)?;
            if !keys.iter().any(|k| k == &self.config.identifier_column) {
                return Err(SchemaError::IdentifierNotPrimary {
                    table,
                    identifier: self.config.identifier_column.clone(),
                    found: keys,
                });
            }
        }
        Ok(())
    }
}
