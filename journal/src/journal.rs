//! Append-only audit log over the configured audit table.

use sift_core::{BatchId, Config, Value};
use sift_store::{Backend, Row};

use crate::entry::AuditEntry;
use crate::error::{JournalError, JournalResult};

/// Storage layout of the audit table, in insert order.
const COLUMNS: [&str; 6] = [
    "batch_id",
    "record_uuid",
    "table_name",
    "field_name",
    "old_value",
    "new_value",
];

/// Writes and reads audit entries.
///
/// The audit table is assumed pre-existing; the journal performs no
/// migrations.
pub struct AuditLog<'b> {
    backend: &'b dyn Backend,
    config: &'b Config,
}

impl<'b> AuditLog<'b> {
    /// Create an audit log over a backend.
    pub fn new(backend: &'b dyn Backend, config: &'b Config) -> Self {
        Self { backend, config }
    }

    /// Append one entry. Every distinct field touch produces one row.
    pub fn append(&self, entry: &AuditEntry) -> JournalResult<()> {
        let columns = COLUMNS
            .iter()
            .map(|c| self.backend.quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=COLUMNS.len())
            .map(|n| self.backend.placeholder(n))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.backend.quote_ident(&self.config.audit_table),
            columns,
            placeholders,
        );

        let params = [
            Value::Text(entry.batch_id.as_str().to_string()),
            Value::Text(entry.record_id.as_str().to_string()),
            Value::Text(entry.table.clone()),
            Value::Text(entry.field.clone()),
            text_or_null(&entry.old_value),
            text_or_null(&entry.new_value),
        ];
        self.backend.execute(&sql, &params)?;
        Ok(())
    }

    /// Read back every entry written by one batch.
    pub fn entries_for_batch(&self, batch_id: &BatchId) -> JournalResult<Vec<AuditEntry>> {
        let columns = COLUMNS
            .iter()
            .map(|c| self.backend.quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = {}",
            columns,
            self.backend.quote_ident(&self.config.audit_table),
            self.backend.quote_ident("batch_id"),
            self.backend.placeholder(1),
        );

        let rows = self
            .backend
            .query_rows(&sql, &[Value::Text(batch_id.as_str().to_string())])?;
        rows.into_iter().map(decode).collect()
    }
}

fn text_or_null(value: &Option<String>) -> Value {
    match value {
        Some(text) => Value::Text(text.clone()),
        None => Value::Null,
    }
}

fn decode(row: Row) -> JournalResult<AuditEntry> {
    let mut values = row.into_iter().map(|(_, v)| v);
    let mut required = |name: &str| -> JournalResult<String> {
        match values.next() {
            Some(value) => value
                .render()
                .ok_or_else(|| JournalError::malformed_row(format!("{} is null", name))),
            None => Err(JournalError::malformed_row(format!("{} is absent", name))),
        }
    };

    let batch_id = BatchId::from(required("batch_id")?);
    let record_id = required("record_uuid")?.into();
    let table = required("table_name")?;
    let field = required("field_name")?;
    let old_value = values.next().and_then(|v| v.render());
    let new_value = values.next().and_then(|v| v.render());

    Ok(AuditEntry {
        batch_id,
        record_id,
        table,
        field,
        old_value,
        new_value,
    })
}
