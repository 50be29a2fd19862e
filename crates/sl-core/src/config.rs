//! Configuration types and parsing for sluice.yml

use crate::dbms::{clean_schema_name, parse_connection_params, DbmsType, CURRENT_SCHEMA_PARAM};
use crate::error::{CoreError, CoreResult};
use crate::profiles::derived_names;
use crate::store_name::{StoreName, MAIN_STORE};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Main project configuration from sluice.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Directory holding `<module>/{init,update}/<dbms>` script trees
    #[serde(default = "default_db_dir")]
    pub db_dir: String,

    /// Statement delimiter inside SQL scripts
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Main data store
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Additional data stores keyed by store name
    #[serde(default)]
    pub stores: BTreeMap<String, DatabaseConfig>,

    /// SQL script executed after the database has been created
    #[serde(default)]
    pub auxiliary_script: Option<String>,

    /// Dependency jar cleanup settings
    #[serde(default)]
    pub libs: LibsConfig,
}

/// Connection and flavour settings of one data store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// DuckDB database path (or `:memory:`)
    #[serde(default = "default_db_path")]
    pub path: String,

    /// DBMS flavour selecting the script directories
    #[serde(default)]
    pub dbms: DbmsType,

    /// Optional DBMS version; `<dbms>-<version>` directories override base scripts
    #[serde(default)]
    pub dbms_version: Option<String>,

    /// JDBC-style connection parameter suffix, e.g. `?currentSchema=app`
    #[serde(default)]
    pub connection_params: String,

    /// Column type of the changelog `CREATE_TS` column
    #[serde(default)]
    pub timestamp_type: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            dbms: DbmsType::default(),
            dbms_version: None,
            connection_params: String::new(),
            timestamp_type: None,
        }
    }
}

/// Settings for `sluice resolve-libs`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibsConfig {
    /// Directory containing the jars to deduplicate
    #[serde(default)]
    pub dir: Option<String>,

    /// Root used to shorten paths in log output
    #[serde(default)]
    pub root: Option<String>,

    /// Jars copied by the build; their library names restrict which jars are checked
    #[serde(default)]
    pub reserved: Vec<String>,
}

/// Fully resolved settings of a data store with DBMS defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    /// Store name
    pub store: StoreName,
    /// DuckDB database path as configured
    pub path: String,
    /// DBMS flavour
    pub dbms: DbmsType,
    /// Non-blank DBMS version
    pub dbms_version: Option<String>,
    /// Raw connection parameter suffix
    pub connection_params: String,
    /// Changelog timestamp column type
    pub timestamp_type: String,
}

impl StoreSettings {
    /// Length of the changelog primary key column
    pub fn changelog_key_length(&self) -> usize {
        self.dbms.changelog_key_length()
    }

    /// Schema named by the `currentSchema` connection parameter, quotes removed
    pub fn current_schema(&self) -> Option<String> {
        parse_connection_params(&self.connection_params)
            .get(CURRENT_SCHEMA_PARAM)
            .map(|s| clean_schema_name(s))
            .filter(|s| !s.is_empty())
    }

    /// Whether the store lives only in memory
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY_PATH
    }

    /// Database path resolved against the project root
    pub fn path_absolute(&self, root: &Path) -> PathBuf {
        if self.is_in_memory() {
            PathBuf::from(IN_MEMORY_PATH)
        } else {
            root.join(&self.path)
        }
    }
}

const IN_MEMORY_PATH: &str = ":memory:";

fn default_db_path() -> String {
    IN_MEMORY_PATH.to_string()
}

fn default_db_dir() -> String {
    "db".to_string()
}

fn default_delimiter() -> String {
    "^".to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        Self::load_with_profiles(path, &[])
    }

    /// Load configuration, deep-merging `<profile>-<file>` overlays for each active profile.
    ///
    /// Overlays that do not exist are skipped.
    pub fn load_with_profiles(path: &Path, profiles: &[String]) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let mut merged = read_yaml(path)?;
        let base_name = path.to_string_lossy();
        for overlay in derived_names(&base_name, profiles).iter().skip(1) {
            let overlay_path = Path::new(overlay);
            if !overlay_path.exists() {
                log::info!("Profile config '{}' was not found. Skip it.", overlay);
                continue;
            }
            log::info!("Loading profile config from {}", overlay);
            merge_yaml(&mut merged, read_yaml(overlay_path)?);
        }

        let config: Config =
            serde_yaml::from_value(merged).map_err(|source| CoreError::ConfigParseError {
                path: path.display().to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for sluice.yml or sluice.yaml
    pub fn load_from_dir(dir: &Path, profiles: &[String]) -> CoreResult<Self> {
        let yml_path = dir.join("sluice.yml");
        let yaml_path = dir.join("sluice.yaml");

        if yml_path.exists() {
            Self::load_with_profiles(&yml_path, profiles)
        } else if yaml_path.exists() {
            Self::load_with_profiles(&yaml_path, profiles)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Project name cannot be empty".to_string(),
            });
        }
        if self.delimiter.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Script delimiter cannot be empty".to_string(),
            });
        }
        if self.db_dir.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "db_dir cannot be empty".to_string(),
            });
        }
        if self.stores.contains_key(MAIN_STORE) {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "'{}' is reserved for the main store; configure it under 'database'",
                    MAIN_STORE
                ),
            });
        }
        Ok(())
    }

    /// Get absolute db script directory relative to a project root
    pub fn db_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.db_dir)
    }

    /// Get the absolute auxiliary script path, if configured
    pub fn auxiliary_script_absolute(&self, root: &Path) -> Option<PathBuf> {
        self.auxiliary_script.as_ref().map(|p| root.join(p))
    }

    /// Names of all configured stores, main store first
    pub fn store_names(&self) -> Vec<StoreName> {
        std::iter::once(StoreName::main())
            .chain(self.stores.keys().map(|k| StoreName::new(k.as_str())))
            .collect()
    }

    /// Resolve the settings of a store, applying DBMS defaults
    pub fn store_settings(&self, store: &StoreName) -> CoreResult<StoreSettings> {
        let database = if store.is_main() {
            &self.database
        } else {
            self.stores
                .get(store.as_str())
                .ok_or_else(|| CoreError::UnknownStore {
                    name: store.to_string(),
                    available: self
                        .store_names()
                        .iter()
                        .map(|s| s.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                })?
        };

        let timestamp_type = database
            .timestamp_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(database.dbms.default_timestamp_type())
            .to_string();

        Ok(StoreSettings {
            store: store.clone(),
            path: database.path.clone(),
            dbms: database.dbms,
            dbms_version: database
                .dbms_version
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from),
            connection_params: database.connection_params.clone(),
            timestamp_type,
        })
    }
}

fn read_yaml(path: &Path) -> CoreResult<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_yaml::from_str(&content).map_err(|source| CoreError::ConfigParseError {
        path: path.display().to_string(),
        source,
    })
}

/// Merge `overlay` into `base`: mappings merge key by key, anything else replaces.
fn merge_yaml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_yaml(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
