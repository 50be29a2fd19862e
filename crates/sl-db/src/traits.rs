//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// Connection that migration scripts and the changelog run against.
///
/// Implementations must be Send + Sync so a single connection can be shared
/// by reference for the lifetime of a task.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute a single statement, returns affected rows
    async fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute one or more statements separated by `;`
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Check if a table or view exists (unqualified names use the current schema)
    async fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Execute query and return the first column of every row as text
    async fn query_column(&self, sql: &str) -> DbResult<Vec<String>>;

    /// Check if a schema exists in the attached database
    async fn schema_exists(&self, schema: &str) -> DbResult<bool>;

    /// Create a schema if it does not exist
    async fn create_schema_if_not_exists(&self, schema: &str) -> DbResult<()>;

    /// Make `schema` the default for unqualified names on this connection
    async fn use_schema(&self, schema: &str) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
