//! Removal of duplicate library jars from a directory.

use crate::error::{LibsError, LibsResult};
use crate::library::LibraryDefinition;
use crate::version::{library_platform, lowest_version};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Removes lower versions of libraries that appear more than once in a directory
#[derive(Debug, Clone, Default)]
pub struct DependencyResolver {
    library_root: Option<PathBuf>,
}

impl DependencyResolver {
    /// Create a resolver; paths in log output are shown relative to `library_root`
    pub fn new(library_root: Option<PathBuf>) -> Self {
        Self { library_root }
    }

    /// Remove duplicate versions of the `copied` libraries from `lib_dir`.
    ///
    /// Only jars whose file name starts with the library name of one of the
    /// `copied` jars are considered. For each pair of versions of one library
    /// with the same platform classifier, the lower version is deleted.
    /// Deletion failures are logged and do not abort the run.
    ///
    /// Returns the file names that were selected for removal, sorted.
    pub fn resolve_dependencies(&self, lib_dir: &Path, copied: &[String]) -> LibsResult<Vec<String>> {
        let copied_names = copied
            .iter()
            .map(|jar| LibraryDefinition::parse(jar).map(|def| def.name))
            .collect::<LibsResult<Vec<_>>>()?;

        let all_jars = list_jars(lib_dir)?;
        let mut library_files: Vec<&str> = Vec::new();
        for copied_name in &copied_names {
            for jar in all_jars.iter().filter(|j| j.starts_with(copied_name.as_str())) {
                if !library_files.contains(&jar.as_str()) {
                    library_files.push(jar);
                }
            }
        }
        log::debug!("Check libraries: {}", library_files.join(","));

        // library name -> versions in discovery order
        let mut versions: BTreeMap<String, Vec<Option<String>>> = BTreeMap::new();
        for file in &library_files {
            let def = LibraryDefinition::parse(file)?;
            versions.entry(def.name).or_default().push(def.version);
        }

        let relative_dir = self.relative_dir(lib_dir);
        let mut remove = BTreeSet::new();
        for (name, library_versions) in &versions {
            for (i, a) in library_versions.iter().enumerate() {
                for b in &library_versions[i + 1..] {
                    let (Some(a), Some(b)) = (a.as_deref(), b.as_deref()) else {
                        continue;
                    };
                    if library_platform(a) != library_platform(b) {
                        continue;
                    }

                    let a_file = LibraryDefinition::new(name.as_str(), a).file_name();
                    let b_file = LibraryDefinition::new(name.as_str(), b).file_name();
                    log::info!("Library {}/{} conflicts with {}", relative_dir, a_file, b_file);

                    let lowest = lowest_version(a, b);
                    remove.insert(LibraryDefinition::new(name.as_str(), lowest).file_name());
                }
            }
        }

        for file_name in &remove {
            let path = lib_dir.join(file_name);
            if let Err(e) = std::fs::remove_file(&path) {
                log::warn!("Failed to remove {}: {}", path.display(), e);
            }
            log::info!("Remove library {}/{}", relative_dir, file_name);
        }

        Ok(remove.into_iter().collect())
    }

    fn relative_dir(&self, lib_dir: &Path) -> String {
        self.library_root
            .as_deref()
            .and_then(|root| lib_dir.strip_prefix(root).ok())
            .unwrap_or(lib_dir)
            .display()
            .to_string()
    }
}

/// Names of the `.jar` files directly inside `dir`, sorted. A missing directory has none.
fn list_jars(dir: &Path) -> LibsResult<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let list_err = |source| LibsError::ListDir {
        path: dir.display().to_string(),
        source,
    };

    let mut jars = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.path().is_file() && name.ends_with(".jar") {
            jars.push(name);
        }
    }
    jars.sort();
    Ok(jars)
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
