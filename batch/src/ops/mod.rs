//! Batch operation implementations.
//!
//! Each primitive (create, update, delete) is implemented in its own
//! module. All three validate against the live schema, write through the
//! shared backend, and journal every field they touch.

use std::collections::BTreeMap;

use sift_core::{BatchId, Value};
use sift_journal::AuditLog;
use sift_schema::Catalog;
use sift_store::Backend;

use crate::error::BatchResult;

mod create;
mod delete;
mod update;

pub(crate) use create::execute_create;
pub(crate) use delete::execute_delete;
pub(crate) use update::execute_update;

/// Shared context for one batch's operations.
pub(crate) struct OpContext<'a> {
    pub backend: &'a dyn Backend,
    pub catalog: &'a Catalog<'a>,
    pub journal: &'a AuditLog<'a>,
    pub batch_id: &'a BatchId,
}

/// Fetch a full row by identifier, or `None` when absent.
pub(crate) fn fetch_row(
    ctx: &OpContext<'_>,
    table: &str,
    id: &str,
) -> BatchResult<Option<BTreeMap<String, Value>>> {
    let sql = format!(
        "SELECT * FROM {} WHERE {} = {}",
        ctx.backend.quote_ident(table),
        ctx.backend.quote_ident(ctx.catalog.identifier_column()),
        ctx.backend.placeholder(1),
    );
    let mut rows = ctx
        .backend
        .query_rows(&sql, &[Value::Text(id.to_string())])?;
    if rows.is_empty() {
        return Ok(None);
    }
    Ok(Some(rows.remove(0).into_iter().collect()))
}
