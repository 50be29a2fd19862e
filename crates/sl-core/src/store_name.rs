//! Strongly-typed data store name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Name of the main data store.
pub const MAIN_STORE: &str = "main";

/// Name of a data store (the main database or an additional one).
///
/// Additional stores keep their scripts in `init_<store>` / `update_<store>`
/// directories instead of `init` / `update`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreName(String);

impl StoreName {
    /// The main store
    pub fn main() -> Self {
        Self(MAIN_STORE.to_string())
    }

    /// Create a store name, treating an empty string as the main store
    pub fn new(name: impl Into<String>) -> Self {
        let s = name.into();
        if s.trim().is_empty() {
            Self::main()
        } else {
            Self(s)
        }
    }

    /// Return the underlying name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the main store
    pub fn is_main(&self) -> bool {
        self.0 == MAIN_STORE
    }

    /// Directory holding init scripts for this store
    pub fn init_dir_name(&self) -> String {
        self.dir_name("init")
    }

    /// Directory holding update scripts for this store
    pub fn update_dir_name(&self) -> String {
        self.dir_name("update")
    }

    fn dir_name(&self, base: &str) -> String {
        if self.is_main() {
            base.to_string()
        } else {
            format!("{}_{}", base, self.0.to_lowercase())
        }
    }
}

impl Default for StoreName {
    fn default() -> Self {
        Self::main()
    }
}

impl fmt::Display for StoreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StoreName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for StoreName {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StoreName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl PartialEq<&str> for StoreName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
