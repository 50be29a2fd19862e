//! Error types for sl-libs

use thiserror::Error;

/// Library resolution errors
#[derive(Error, Debug)]
pub enum LibsError {
    /// L001: Jar file name does not follow `<name>[-<version>].jar`
    #[error("[L001] Unable to get library definition for {name}")]
    InvalidLibraryName { name: String },

    /// L002: Library directory could not be listed
    #[error("[L002] Failed to list library directory '{path}': {source}")]
    ListDir {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for LibsError
pub type LibsResult<T> = Result<T, LibsError>;
