//! DBMS flavours and connection parameter helpers.
//!
//! The DBMS type selects which script directory (`init/<dbms>`, `update/<dbms>`)
//! is used and which column types the changelog table gets. It is independent of
//! the backend that actually executes the SQL.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Connection parameter naming the schema scripts run against.
pub const CURRENT_SCHEMA_PARAM: &str = "currentSchema";

/// DBMS flavour of a data store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DbmsType {
    /// PostgreSQL
    Postgres,
    /// Microsoft SQL Server
    Mssql,
    /// Oracle
    Oracle,
    /// MySQL / MariaDB
    Mysql,
    /// HyperSQL
    Hsql,
    /// DuckDB (default)
    #[default]
    DuckDb,
}

impl DbmsType {
    /// Directory name used under `init/` and `update/`
    pub fn dir_name(self) -> &'static str {
        match self {
            DbmsType::Postgres => "postgres",
            DbmsType::Mssql => "mssql",
            DbmsType::Oracle => "oracle",
            DbmsType::Mysql => "mysql",
            DbmsType::Hsql => "hsql",
            DbmsType::DuckDb => "duckdb",
        }
    }

    /// Column type of `CREATE_TS` when the config does not override it
    pub fn default_timestamp_type(self) -> &'static str {
        match self {
            DbmsType::Mssql | DbmsType::Mysql => "datetime",
            _ => "timestamp",
        }
    }

    /// Length of the `SCRIPT_NAME` primary key column.
    ///
    /// MySQL caps index key size, so it gets a shorter column.
    pub fn changelog_key_length(self) -> usize {
        match self {
            DbmsType::Mysql => 190,
            _ => 300,
        }
    }
}

impl fmt::Display for DbmsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl TryFrom<String> for DbmsType {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        value.parse()
    }
}

impl FromStr for DbmsType {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(DbmsType::Postgres),
            "mssql" => Ok(DbmsType::Mssql),
            "oracle" => Ok(DbmsType::Oracle),
            "mysql" => Ok(DbmsType::Mysql),
            "hsql" => Ok(DbmsType::Hsql),
            "duckdb" => Ok(DbmsType::DuckDb),
            _ => Err(CoreError::UnsupportedDbms {
                name: s.to_string(),
            }),
        }
    }
}

/// Parse a JDBC-style parameter suffix such as `?currentSchema=app&ssl=false`.
///
/// Pairs may be separated by `&`, `,` or `;`. Keys and values are trimmed and
/// pairs with a blank key or value are dropped.
pub fn parse_connection_params(params: &str) -> BTreeMap<String, String> {
    let params = params.strip_prefix('?').unwrap_or(params);
    let mut result = BTreeMap::new();

    for param in params.split(['&', ',', ';']) {
        let Some(index) = param.find('=') else {
            continue;
        };
        if index == 0 {
            continue;
        }
        let key = param[..index].trim();
        let value = param[index + 1..].trim();
        if !key.is_empty() && !value.is_empty() {
            result.insert(key.to_string(), value.to_string());
        }
    }

    result
}

/// Strip double quotes from a schema name taken from connection params
pub fn clean_schema_name(schema: &str) -> String {
    schema.replace('"', "")
}
