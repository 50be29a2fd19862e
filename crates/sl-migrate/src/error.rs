//! Error types for sl-migrate

use sl_db::DbError;
use thiserror::Error;

/// Migration errors
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Module directory without a numeric `<index>-` prefix (M001)
    #[error("[M001] Invalid DB scripts directory name: {name}")]
    InvalidModuleDir { name: String },

    /// Script file could not be read (M002)
    #[error("[M002] Failed to read SQL script '{path}': {source}")]
    ScriptRead {
        path: String,
        source: std::io::Error,
    },

    /// A statement of a script failed (M003)
    #[error("[M003] Exception when executing SQL from '{script}': {sql}")]
    SqlExecution {
        script: String,
        sql: String,
        #[source]
        source: DbError,
    },

    /// Changelog table access failed (M004)
    #[error("[M004] Changelog operation failed: {message}")]
    Changelog {
        message: String,
        #[source]
        source: DbError,
    },

    /// Directory traversal failed (M005)
    #[error("[M005] Failed to list '{path}': {source}")]
    ListDir {
        path: String,
        source: std::io::Error,
    },

    /// Any other database error (M006)
    #[error("[M006] {0}")]
    Db(#[from] DbError),
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;
