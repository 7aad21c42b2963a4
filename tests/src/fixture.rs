//! Test database fixture.

use sift_core::{Config, RecordId, Value};
use sift_session::Session;
use sift_store::{Backend, SqliteBackend};

/// An in-memory database with the audit table pre-created.
pub struct TestDb {
    session: Session<SqliteBackend>,
}

impl TestDb {
    /// Open a fixture with the default `record_uuid` identifier column.
    pub fn new() -> Self {
        Self::with_config(Config::new("record_uuid"))
    }

    /// Open a fixture with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        let backend = SqliteBackend::open_in_memory().expect("open in-memory database");
        backend
            .execute_batch(&format!(
                "CREATE TABLE {} (
                     batch_id TEXT, record_uuid TEXT, table_name TEXT,
                     field_name TEXT, old_value TEXT, new_value TEXT
                 )",
                config.audit_table
            ))
            .expect("create audit table");
        Self {
            session: Session::new(backend, config),
        }
    }

    /// Create a table: the identifier column as primary key plus the
    /// given TEXT columns.
    pub fn create_table(&self, name: &str, columns: &[&str]) -> &Self {
        let identifier = &self.session.config().identifier_column;
        let mut ddl = format!("CREATE TABLE {} ({} TEXT PRIMARY KEY", name, identifier);
        for column in columns {
            ddl.push_str(&format!(", {} TEXT", column));
        }
        ddl.push(')');
        self.session
            .backend()
            .execute_batch(&ddl)
            .expect("create table");
        self
    }

    /// Insert one row of (column, value) pairs.
    pub fn insert(&self, table: &str, pairs: &[(&str, &str)]) -> &Self {
        let names: Vec<&str> = pairs.iter().map(|(name, _)| *name).collect();
        let placeholders: Vec<&str> = pairs.iter().map(|_| "?").collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            names.join(", "),
            placeholders.join(", "),
        );
        let params: Vec<Value> = pairs.iter().map(|(_, value)| Value::from(*value)).collect();
        self.session
            .backend()
            .execute(&sql, &params)
            .expect("insert row");
        self
    }

    /// The fixture's session.
    pub fn session(&self) -> &Session<SqliteBackend> {
        &self.session
    }

    /// Rows currently in a table.
    pub fn row_count(&self, table: &str) -> i64 {
        let rows = self
            .session
            .backend()
            .query_rows(&format!("SELECT COUNT(*) FROM {}", table), &[])
            .expect("count rows");
        match rows[0][0].1 {
            Value::Int(n) => n,
            _ => panic!("count was not an integer"),
        }
    }

    /// Fetch one record's field as text, if the record exists.
    pub fn field_of(&self, table: &str, id: &str, field: &str) -> Option<String> {
        let rows = self
            .session
            .read(table, &[RecordId::from(id)])
            .expect("read record");
        rows.first().and_then(|row| {
            row.iter()
                .find(|(name, _)| name == field)
                .and_then(|(_, value)| value.render())
        })
    }
}

impl Default for TestDb {
    fn default() -> Self {
        Self::new()
    }
}
