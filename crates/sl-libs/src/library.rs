//! Jar file name parsing.

use crate::error::{LibsError, LibsResult};
use std::fmt;

const JAR_SUFFIX: &str = ".jar";
const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// Version reported for snapshot jars without a numeric version
pub const SNAPSHOT_VERSION: &str = "SNAPSHOT";

/// Library name and optional version parsed from a jar file name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LibraryDefinition {
    /// Library name (`commons-lang3` in `commons-lang3-3.4.jar`)
    pub name: String,
    /// Version, absent for unversioned jars
    pub version: Option<String>,
}

impl LibraryDefinition {
    /// Definition with a version
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
        }
    }

    /// Definition of an unversioned library
    pub fn unversioned(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    /// Parse a jar file name.
    ///
    /// Three forms are recognised, tried in order:
    /// `<name>-<version>.jar` where the version contains a digit,
    /// `<name>-SNAPSHOT.jar`, and `<name>.jar`. The name never contains a dash
    /// directly followed by a digit, and no part may contain whitespace.
    pub fn parse(file_name: &str) -> LibsResult<Self> {
        let invalid = || LibsError::InvalidLibraryName {
            name: file_name.to_string(),
        };

        let stem = file_name.strip_suffix(JAR_SUFFIX).ok_or_else(invalid)?;
        if stem.is_empty() || stem.chars().any(is_whitespace) {
            return Err(invalid());
        }

        // The name is as long as possible, so the last qualifying dash wins
        let versioned = stem
            .match_indices('-')
            .map(|(pos, _)| pos)
            .rev()
            .find(|&pos| {
                let (name, version) = (&stem[..pos], &stem[pos + 1..]);
                is_library_name(name) && version.chars().any(|c| c.is_ascii_digit())
            });
        if let Some(pos) = versioned {
            return Ok(Self::new(&stem[..pos], &stem[pos + 1..]));
        }

        if let Some(name) = stem.strip_suffix(SNAPSHOT_SUFFIX) {
            if is_library_name(name) {
                return Ok(Self::new(name, SNAPSHOT_VERSION));
            }
        }

        if is_library_name(stem) {
            return Ok(Self::unversioned(stem));
        }

        Err(invalid())
    }

    /// Version, or `no version` for unversioned libraries
    pub fn version_or_default(&self) -> &str {
        self.version.as_deref().unwrap_or("no version")
    }

    /// Jar file name this definition was parsed from
    pub fn file_name(&self) -> String {
        match &self.version {
            Some(version) => format!("{}-{}{}", self.name, version, JAR_SUFFIX),
            None => format!("{}{}", self.name, JAR_SUFFIX),
        }
    }
}

impl fmt::Display for LibraryDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.version_or_default())
    }
}

/// Non-empty and free of any `-<digit>` sequence
fn is_library_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .as_bytes()
            .windows(2)
            .any(|w| w[0] == b'-' && w[1].is_ascii_digit())
}

/// Whitespace as understood by jar name patterns (`\s` without Unicode)
fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

#[cfg(test)]
#[path = "library_test.rs"]
mod tests;
