//! Error types for sl-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Mutex poisoned (D003)
    #[error("[D003] Database mutex poisoned: {0}")]
    MutexPoisoned(String),

    /// Removing an existing database file failed (D004)
    #[error("[D004] Failed to remove database file '{path}': {source}")]
    RemoveFailed {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        DbError::ExecutionError(err.to_string())
    }
}
