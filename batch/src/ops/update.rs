//! Update operation - applies listed fields to existing records.

use sift_core::{RecordId, Value};
use sift_journal::AuditEntry;

use crate::error::{BatchError, BatchResult};
use crate::ops::{fetch_row, OpContext};
use crate::spec::FieldMap;
use crate::validation;

/// Update the given records in one table.
///
/// Each record must carry the identifier field and target an existing
/// row. Only the listed fields are applied, and only fields whose
/// rendered text actually changed are journaled.
pub(crate) fn execute_update(
    ctx: &OpContext<'_>,
    table: &str,
    records: &[FieldMap],
) -> BatchResult<Vec<RecordId>> {
    let columns = validation::known_columns(ctx.catalog, table)?;
    let identifier = ctx.catalog.identifier_column();

    let mut updated = Vec::with_capacity(records.len());
    for record in records {
        let id = validation::identifier_of(table, identifier, record)?;
        let old_row = fetch_row(ctx, table, id.as_str())?
            .ok_or_else(|| BatchError::record_not_found(table, id.as_str()))?;
        validation::validate_fields(table, &columns, record)?;

        let fields: Vec<(&String, &Value)> = record
            .iter()
            .filter(|(name, _)| name.as_str() != identifier)
            .collect();
        if fields.is_empty() {
            updated.push(id);
            continue;
        }

        let assignments: Vec<String> = fields
            .iter()
            .enumerate()
            .map(|(idx, (name, _))| {
                format!(
                    "{} = {}",
                    ctx.backend.quote_ident(name),
                    ctx.backend.placeholder(idx + 1),
                )
            })
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = {}",
            ctx.backend.quote_ident(table),
            assignments.join(", "),
            ctx.backend.quote_ident(identifier),
            ctx.backend.placeholder(fields.len() + 1),
        );
        let mut params: Vec<Value> = fields.iter().map(|(_, value)| (*value).clone()).collect();
        params.push(Value::Text(id.as_str().to_string()));
        ctx.backend.execute(&sql, &params)?;

        for (field, new_value) in &fields {
            let old_value = old_row.get(*field).cloned().unwrap_or(Value::Null);
            if old_value.render() != new_value.render() {
                ctx.journal.append(&AuditEntry::updated(
                    ctx.batch_id,
                    &id,
                    table,
                    field,
                    &old_value,
                    new_value,
                ))?;
            }
        }

        tracing::debug!(table, id = %id, fields = fields.len(), "record updated");
        updated.push(id);
    }
    Ok(updated)
}
