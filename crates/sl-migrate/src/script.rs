//! Discovered migration script record.

use serde::Serialize;
use sl_core::DbmsType;
use std::fmt;
use std::path::PathBuf;

/// Whether a script creates the schema or updates an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptKind {
    /// `init/<dbms>/*create-db.sql`, run once when the database is created
    Init,
    /// `update/<dbms>/**`, run once each by update-db
    Update,
}

impl fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptKind::Init => write!(f, "init"),
            ScriptKind::Update => write!(f, "update"),
        }
    }
}

/// A script found under the db directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationScript {
    /// Changelog key: path relative to the db directory, `/`-separated
    pub name: String,
    /// File on disk
    pub path: PathBuf,
    /// Module directory the script belongs to (e.g. `10-core`)
    pub module: String,
    /// DBMS flavour of the script directory
    pub dbms: DbmsType,
    /// Set when the script comes from a `<dbms>-<version>` override directory
    pub dbms_version: Option<String>,
    /// Init or update
    pub kind: ScriptKind,
}

impl MigrationScript {
    /// Whether the script is plain SQL (as opposed to e.g. a groovy script)
    pub fn is_sql(&self) -> bool {
        self.path.extension().is_some_and(|e| e == "sql")
    }
}
