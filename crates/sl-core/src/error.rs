//! Error types for sl-core

use thiserror::Error;

/// Core error type for Sluice
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config '{path}': {source}")]
    ConfigParseError {
        path: String,
        source: serde_yaml::Error,
    },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Store referenced on the command line is not configured
    #[error("[E004] Unknown data store '{name}'. Available stores: {available}")]
    UnknownStore { name: String, available: String },

    /// E005: Unsupported DBMS type
    #[error("[E005] DBMS '{name}' is not supported. Use one of: postgres, mssql, oracle, mysql, hsql, duckdb")]
    UnsupportedDbms { name: String },

    /// E006: IO error with file path context
    #[error("[E006] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
