//! sl-libs - Dependency jar deduplication for Sluice
//!
//! Parses jar file names into library definitions, orders version strings,
//! and removes the lower versions of libraries that were copied more than once.

pub mod error;
pub mod library;
pub mod resolver;
pub mod version;

pub use error::{LibsError, LibsResult};
pub use library::LibraryDefinition;
pub use resolver::DependencyResolver;
pub use version::{library_platform, lowest_version};
