//! SQLite backend over rusqlite.

use std::cell::Cell;
use std::path::Path;

use rusqlite::Connection;
use sift_core::Value;

use crate::backend::{Backend, Row};
use crate::error::{StoreError, StoreResult};

/// SQLite implementation of the backend capability.
pub struct SqliteBackend {
    conn: Connection,
    /// Whether a transaction is active on this connection.
    in_txn: Cell<bool>,
}

impl SqliteBackend {
    /// Open a database file.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path).map_err(driver)?;
        Ok(Self {
            conn,
            in_txn: Cell::new(false),
        })
    }

    /// Open an in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(driver)?;
        Ok(Self {
            conn,
            in_txn: Cell::new(false),
        })
    }

    /// Run a raw statement batch (DDL, seeds). Test and setup helper.
    pub fn execute_batch(&self, sql: &str) -> StoreResult<()> {
        self.conn.execute_batch(sql).map_err(driver)
    }
}

impl Backend for SqliteBackend {
    fn table_names(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
                 ORDER BY name",
            )
            .map_err(driver)?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(driver)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(driver)?;
        Ok(names)
    }

    fn column_names(&self, table: &str) -> StoreResult<Vec<String>> {
        let sql = format!("PRAGMA table_info({})", self.quote_ident(table));
        let mut stmt = self.conn.prepare(&sql).map_err(driver)?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(1))
            .map_err(driver)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(driver)?;
        Ok(names)
    }

    fn primary_key_columns(&self, table: &str) -> StoreResult<Vec<String>> {
        let sql = format!("PRAGMA table_info({})", self.quote_ident(table));
        let mut stmt = self.conn.prepare(&sql).map_err(driver)?;
        // table_info column 5 is the 1-based primary key position, 0 when
        // the column is not part of the key.
        let mut keyed = stmt
            .query_map([], |row| {
                Ok((row.get::<_, i64>(5)?, row.get::<_, String>(1)?))
            })
            .map_err(driver)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(driver)?;
        keyed.retain(|(pk, _)| *pk > 0);
        keyed.sort_by_key(|(pk, _)| *pk);
        Ok(keyed.into_iter().map(|(_, name)| name).collect())
    }

    fn query_rows(&self, sql: &str, params: &[Value]) -> StoreResult<Vec<Row>> {
        tracing::debug!(sql, params = params.len(), "query");
        let mut stmt = self.conn.prepare(sql).map_err(driver)?;
        let column_names: Vec<String> =
            stmt.column_names().iter().map(|s| s.to_string()).collect();

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter().map(bind)))
            .map_err(driver)?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(driver)? {
            let mut record: Row = Vec::with_capacity(column_names.len());
            for (idx, name) in column_names.iter().enumerate() {
                let value = read_value(row.get_ref(idx).map_err(driver)?);
                record.push((name.clone(), value));
            }
            out.push(record);
        }
        Ok(out)
    }

    fn execute(&self, sql: &str, params: &[Value]) -> StoreResult<usize> {
        tracing::debug!(sql, params = params.len(), "execute");
        self.conn
            .execute(sql, rusqlite::params_from_iter(params.iter().map(bind)))
            .map_err(driver)
    }

    fn begin(&self) -> StoreResult<()> {
        if self.in_txn.get() {
            return Err(StoreError::TransactionActive);
        }
        self.conn.execute_batch("BEGIN").map_err(driver)?;
        self.in_txn.set(true);
        Ok(())
    }

    fn commit(&self) -> StoreResult<()> {
        if !self.in_txn.get() {
            return Err(StoreError::NoTransaction);
        }
        self.conn.execute_batch("COMMIT").map_err(driver)?;
        self.in_txn.set(false);
        Ok(())
    }

    fn rollback(&self) -> StoreResult<()> {
        if !self.in_txn.get() {
            return Err(StoreError::NoTransaction);
        }
        self.conn.execute_batch("ROLLBACK").map_err(driver)?;
        self.in_txn.set(false);
        Ok(())
    }
}

fn driver(err: rusqlite::Error) -> StoreError {
    StoreError::statement(err.to_string())
}

fn bind(value: &Value) -> rusqlite::types::Value {
    match value {
        Value::Null => rusqlite::types::Value::Null,
        Value::Bool(b) => rusqlite::types::Value::Integer(i64::from(*b)),
        Value::Int(i) => rusqlite::types::Value::Integer(*i),
        Value::Float(f) => rusqlite::types::Value::Real(*f),
        Value::Text(s) => rusqlite::types::Value::Text(s.clone()),
    }
}

fn read_value(value: rusqlite::types::ValueRef<'_>) -> Value {
    match value {
        rusqlite::types::ValueRef::Null => Value::Null,
        rusqlite::types::ValueRef::Integer(i) => Value::Int(i),
        rusqlite::types::ValueRef::Real(f) => Value::Float(f),
        rusqlite::types::ValueRef::Text(bytes) => {
            Value::Text(String::from_utf8_lossy(bytes).into_owned())
        }
        // Blobs surface through the textual comparison model.
        rusqlite::types::ValueRef::Blob(bytes) => {
            Value::Text(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}
