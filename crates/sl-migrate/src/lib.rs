//! sl-migrate - Migration runner for Sluice
//!
//! Discovers init and update scripts under `db/<module>/{init,update}/<dbms>`,
//! splits them into statements, executes them against a [`sl_db::Database`],
//! and records every script in the `SYS_DB_CHANGELOG` table.

pub mod changelog;
pub mod error;
pub mod finder;
pub mod runner;
pub mod script;
pub mod splitter;

pub use changelog::CHANGELOG_TABLE;
pub use error::{MigrateError, MigrateResult};
pub use finder::ScriptFinder;
pub use runner::{CreateDbSummary, MigrationRunner, UpdateDbSummary, UPDATE_SCRIPT_EXTENSIONS};
pub use script::{MigrationScript, ScriptKind};
pub use splitter::ScriptSplitter;
