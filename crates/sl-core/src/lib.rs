//! sl-core - Core library for Sluice
//!
//! This crate provides the project configuration (`sluice.yml`), resolved
//! per-store settings, the DBMS model, and active-profile handling shared by
//! all Sluice components.

pub mod config;
pub mod dbms;
pub mod error;
pub mod profiles;
pub mod store_name;

pub use config::{Config, DatabaseConfig, LibsConfig, StoreSettings};
pub use dbms::DbmsType;
pub use error::{CoreError, CoreResult};
pub use store_name::StoreName;
