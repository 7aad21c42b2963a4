//! Create operation - inserts new records.

use sift_core::{RecordId, Value};
use sift_journal::AuditEntry;

use crate::error::BatchResult;
use crate::ops::OpContext;
use crate::spec::FieldMap;
use crate::validation;

/// Insert the given records into one table.
///
/// Records without an identifier field get a freshly minted one. Every
/// written field produces one audit entry with no previous value.
pub(crate) fn execute_create(
    ctx: &OpContext<'_>,
    table: &str,
    records: &[FieldMap],
) -> BatchResult<Vec<RecordId>> {
    let columns = validation::known_columns(ctx.catalog, table)?;
    let identifier = ctx.catalog.identifier_column();

    let mut created = Vec::with_capacity(records.len());
    for record in records {
        let mut record = record.clone();
        let id = match record.get(identifier).and_then(|v| v.render()) {
            Some(text) => RecordId::from(text),
            None => {
                let id = RecordId::mint();
                record.insert(identifier.to_string(), Value::Text(id.as_str().to_string()));
                id
            }
        };
        validation::validate_fields(table, &columns, &record)?;

        let names: Vec<String> = record
            .keys()
            .map(|name| ctx.backend.quote_ident(name))
            .collect();
        let placeholders: Vec<String> = (1..=record.len())
            .map(|n| ctx.backend.placeholder(n))
            .collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            ctx.backend.quote_ident(table),
            names.join(", "),
            placeholders.join(", "),
        );
        let params: Vec<Value> = record.values().cloned().collect();
        ctx.backend.execute(&sql, &params)?;

        for (field, value) in &record {
            ctx.journal
                .append(&AuditEntry::created(ctx.batch_id, &id, table, field, value))?;
        }

        tracing::debug!(table, id = %id, "record created");
        created.push(id);
    }
    Ok(created)
}
