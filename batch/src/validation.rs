//! Shared field validation helpers for batch operations.

use sift_core::RecordId;
use sift_schema::Catalog;

use crate::error::{BatchError, BatchResult};
use crate::spec::FieldMap;

/// Columns of the target table, requiring the identifier column.
pub(crate) fn known_columns(catalog: &Catalog<'_>, table: &str) -> BatchResult<Vec<String>> {
    let columns = catalog.columns(table)?;
    catalog.require_identifier(table)?;
    Ok(columns)
}

/// Every field of a record must be a known column of its table.
pub(crate) fn validate_fields(
    table: &str,
    columns: &[String],
    fields: &FieldMap,
) -> BatchResult<()> {
    for field in fields.keys() {
        if !columns.iter().any(|c| c == field) {
            return Err(BatchError::unknown_column(table, field));
        }
    }
    Ok(())
}

/// Extract the record's identifier; a missing or null identifier field
/// fails the batch.
pub(crate) fn identifier_of(
    table: &str,
    identifier: &str,
    fields: &FieldMap,
) -> BatchResult<RecordId> {
    fields
        .get(identifier)
        .and_then(|v| v.render())
        .map(RecordId::from)
        .ok_or_else(|| BatchError::missing_identifier(table, identifier))
}
