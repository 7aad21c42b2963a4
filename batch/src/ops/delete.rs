//! Delete operation - removes records, journaling every original field.

use sift_core::{RecordId, Value};
use sift_journal::AuditEntry;

use crate::error::BatchResult;
use crate::ops::{fetch_row, OpContext};
use crate::result::BatchWarning;
use crate::spec::FieldMap;
use crate::validation;

/// Delete the given records from one table.
///
/// A missing target is a warning, not a failure: it is collected and the
/// remaining records are still processed.
pub(crate) fn execute_delete(
    ctx: &OpContext<'_>,
    table: &str,
    records: &[FieldMap],
    warnings: &mut Vec<BatchWarning>,
) -> BatchResult<Vec<RecordId>> {
    validation::known_columns(ctx.catalog, table)?;
    let identifier = ctx.catalog.identifier_column();

    let mut deleted = Vec::with_capacity(records.len());
    for record in records {
        let id = validation::identifier_of(table, identifier, record)?;
        let Some(old_row) = fetch_row(ctx, table, id.as_str())? else {
            tracing::warn!(table, id = %id, "delete target not found");
            warnings.push(BatchWarning::DeleteTargetNotFound {
                table: table.to_string(),
                id,
            });
            continue;
        };

        let sql = format!(
            "DELETE FROM {} WHERE {} = {}",
            ctx.backend.quote_ident(table),
            ctx.backend.quote_ident(identifier),
            ctx.backend.placeholder(1),
        );
        ctx.backend
            .execute(&sql, &[Value::Text(id.as_str().to_string())])?;

        for (field, value) in &old_row {
            ctx.journal
                .append(&AuditEntry::deleted(ctx.batch_id, &id, table, field, value))?;
        }

        tracing::debug!(table, id = %id, "record deleted");
        deleted.push(id);
    }
    Ok(deleted)
}
