//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use async_trait::async_trait;
use duckdb::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

const IN_MEMORY: &str = ":memory:";

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{}: {}", e, path.display())))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == IN_MEMORY {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    /// Drop the database and open a fresh, empty one at the same location.
    ///
    /// For a file database the file and its WAL are deleted first; an
    /// in-memory database is always fresh.
    pub fn recreate(path: &str) -> DbResult<Self> {
        if path != IN_MEMORY {
            let db_path = PathBuf::from(path);
            let wal_path = PathBuf::from(format!("{}.wal", path));
            for file in [&db_path, &wal_path] {
                if file.exists() {
                    log::info!("Removing database file {}", file.display());
                    std::fs::remove_file(file).map_err(|source| DbError::RemoveFailed {
                        path: file.display().to_string(),
                        source,
                    })?;
                }
            }
        }
        Self::new(path)
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Execute SQL synchronously
    fn execute_sync(&self, sql: &str) -> DbResult<usize> {
        let conn = self.lock()?;
        conn.execute(sql, [])
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))
    }

    /// Execute batch SQL synchronously
    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql).map_err(DbError::from)
    }

    /// Read the first column of a query synchronously
    fn query_column_sync(&self, sql: &str) -> DbResult<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let values = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(values)
    }

    /// Check if relation exists synchronously
    fn relation_exists_sync(&self, name: &str) -> DbResult<bool> {
        let conn = self.lock()?;

        let schema_filter = match name.rfind('.') {
            Some(pos) => format!("lower('{}')", escape_literal(&name[..pos])),
            None => "lower(current_schema())".to_string(),
        };
        let table = name.rsplit('.').next().unwrap_or(name);

        let sql = format!(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE lower(table_schema) = {} AND lower(table_name) = lower('{}')",
            schema_filter,
            escape_literal(table)
        );

        let count: i64 = conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;

        Ok(count > 0)
    }

    /// Check if schema exists synchronously
    fn schema_exists_sync(&self, schema: &str) -> DbResult<bool> {
        let conn = self.lock()?;
        let sql = format!(
            "SELECT COUNT(*) FROM information_schema.schemata \
             WHERE catalog_name = current_database() AND lower(schema_name) = lower('{}')",
            escape_literal(schema)
        );
        let count: i64 = conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;
        Ok(count > 0)
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn execute(&self, sql: &str) -> DbResult<usize> {
        self.execute_sync(sql)
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.execute_batch_sync(sql)
    }

    async fn relation_exists(&self, name: &str) -> DbResult<bool> {
        self.relation_exists_sync(name)
    }

    async fn schema_exists(&self, schema: &str) -> DbResult<bool> {
        self.schema_exists_sync(schema)
    }

    async fn query_column(&self, sql: &str) -> DbResult<Vec<String>> {
        self.query_column_sync(sql)
    }

    async fn create_schema_if_not_exists(&self, schema: &str) -> DbResult<()> {
        let sql = format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(schema));
        self.execute_batch_sync(&sql)
    }

    async fn use_schema(&self, schema: &str) -> DbResult<()> {
        let sql = format!("SET schema = '{}'", escape_literal(schema));
        self.execute_batch_sync(&sql)
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
