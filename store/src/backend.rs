//! The backend capability trait.
//!
//! Engines never name a concrete driver: they build dialect-neutral SQL
//! through `placeholder`/`quote_ident` and hand it to `query_rows` or
//! `execute`. Each implementation owns introspection for its dialect.

use sift_core::Value;

use crate::error::StoreResult;

/// One result row: column names paired with values, in select order.
pub type Row = Vec<(String, Value)>;

/// Capability supplied by a connection/driver collaborator.
pub trait Backend {
    /// Names of user tables, excluding backend-internal tables.
    fn table_names(&self) -> StoreResult<Vec<String>>;

    /// Ordered column names of a table. Empty when the table is unknown;
    /// the schema catalog turns that into an error.
    fn column_names(&self, table: &str) -> StoreResult<Vec<String>>;

    /// Columns currently forming the table's primary key.
    fn primary_key_columns(&self, table: &str) -> StoreResult<Vec<String>>;

    /// Run a statement returning rows.
    fn query_rows(&self, sql: &str, params: &[Value]) -> StoreResult<Vec<Row>>;

    /// Run a statement returning the affected row count.
    fn execute(&self, sql: &str, params: &[Value]) -> StoreResult<usize>;

    /// Open a transaction on this connection.
    fn begin(&self) -> StoreResult<()>;

    /// Commit the open transaction.
    fn commit(&self) -> StoreResult<()>;

    /// Roll back the open transaction.
    fn rollback(&self) -> StoreResult<()>;

    /// Placeholder for the n-th parameter (1-based) in this dialect.
    fn placeholder(&self, _n: usize) -> String {
        "?".to_string()
    }

    /// Quote an identifier (table or column name) for this dialect.
    fn quote_ident(&self, ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }
}
