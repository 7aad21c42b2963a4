//! Audit entry types.

use sift_core::{BatchId, RecordId, Value};

/// One immutable record of a single field's before/after value.
///
/// `None` is the sentinel for "field did not previously exist" (create)
/// or "field no longer exists" (delete).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    /// Batch that produced this entry.
    pub batch_id: BatchId,
    /// Record whose field was touched.
    pub record_id: RecordId,
    /// Table the record lives in.
    pub table: String,
    /// Field that was touched.
    pub field: String,
    /// Rendered previous value.
    pub old_value: Option<String>,
    /// Rendered new value.
    pub new_value: Option<String>,
}

impl AuditEntry {
    /// Entry for a field written by a create.
    pub fn created(
        batch_id: &BatchId,
        record_id: &RecordId,
        table: &str,
        field: &str,
        new: &Value,
    ) -> Self {
        Self {
            batch_id: batch_id.clone(),
            record_id: record_id.clone(),
            table: table.to_string(),
            field: field.to_string(),
            old_value: None,
            new_value: new.render(),
        }
    }

    /// Entry for a field changed by an update.
    pub fn updated(
        batch_id: &BatchId,
        record_id: &RecordId,
        table: &str,
        field: &str,
        old: &Value,
        new: &Value,
    ) -> Self {
        Self {
            batch_id: batch_id.clone(),
            record_id: record_id.clone(),
            table: table.to_string(),
            field: field.to_string(),
            old_value: old.render(),
            new_value: new.render(),
        }
    }

    /// Entry for a field removed by a delete.
    pub fn deleted(
        batch_id: &BatchId,
        record_id: &RecordId,
        table: &str,
        field: &str,
        old: &Value,
    ) -> Self {
        Self {
            batch_id: batch_id.clone(),
            record_id: record_id.clone(),
            table: table.to_string(),
            field: field.to_string(),
            old_value: old.render(),
            new_value: None,
        }
    }
}
