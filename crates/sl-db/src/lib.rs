//! sl-db - Database abstraction layer for Sluice
//!
//! This crate provides the `Database` trait that migration scripts run
//! against, and its DuckDB implementation.

pub mod duckdb;
pub mod error;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::Database;
