//! Session facade.

use sift_batch::{BatchExecutor, BatchOutcome, BatchSpec};
use sift_core::{BatchId, Config, RecordId, Value};
use sift_journal::{AuditEntry, AuditLog};
use sift_schema::Catalog;
use sift_search::{SearchExecutor, SearchOutcome, SearchSpec};
use sift_store::{Backend, Row};

use crate::error::SessionResult;

/// A SIFT session over one backend connection.
pub struct Session<B: Backend> {
    backend: B,
    config: Config,
}

impl<B: Backend> Session<B> {
    /// Create a session.
    pub fn new(backend: B, config: Config) -> Self {
        Self { backend, config }
    }

    /// The session's configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Evaluate a search specification.
    pub fn search(&self, spec: &SearchSpec) -> SessionResult<SearchOutcome> {
        let executor = SearchExecutor::new(&self.backend, &self.config);
        Ok(executor.search(spec)?)
    }

    /// Parse and evaluate a search specification from JSON text.
    pub fn search_json(&self, text: &str) -> SessionResult<SearchOutcome> {
        let spec = SearchSpec::from_json(text)?;
        self.search(&spec)
    }

    /// Apply a batch specification atomically.
    pub fn apply(&self, spec: &BatchSpec) -> SessionResult<BatchOutcome> {
        let executor = BatchExecutor::new(&self.backend, &self.config);
        Ok(executor.apply(spec)?)
    }

    /// Parse and apply a batch specification from JSON text.
    pub fn apply_json(&self, text: &str) -> SessionResult<BatchOutcome> {
        let spec = BatchSpec::from_json(text)?;
        self.apply(&spec)
    }

    /// Fetch full records by identifier.
    ///
    /// The read step downstream of a search: feed it the matched
    /// identifiers and hand the rows to whatever formats them.
    pub fn read(&self, table: &str, ids: &[RecordId]) -> SessionResult<Vec<Row>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let catalog = Catalog::new(&self.backend, &self.config);
        catalog.require_identifier(table)?;

        let placeholders: Vec<String> = (1..=ids.len())
            .map(|n| self.backend.placeholder(n))
            .collect();
        let sql = format!(
            "SELECT * FROM {} WHERE {} IN ({})",
            self.backend.quote_ident(table),
            self.backend.quote_ident(&self.config.identifier_column),
            placeholders.join(", "),
        );
        let params: Vec<Value> = ids
            .iter()
            .map(|id| Value::Text(id.as_str().to_string()))
            .collect();
        Ok(self.backend.query_rows(&sql, &params)?)
    }

    /// Read back the audit entries one batch produced.
    pub fn audit_entries(&self, batch_id: &BatchId) -> SessionResult<Vec<AuditEntry>> {
        let journal = AuditLog::new(&self.backend, &self.config);
        Ok(journal.entries_for_batch(batch_id)?)
    }

    /// Strict validation pass: every participating table's primary key
    /// must include the identifier column.
    pub fn validate_schema(&self) -> SessionResult<()> {
        let catalog = Catalog::new(&self.backend, &self.config);
        Ok(catalog.validate_identifier_keys()?)
    }
}
