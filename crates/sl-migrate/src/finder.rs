//! Discovery and ordering of init and update scripts.
//!
//! Layout: `<db_dir>/<index>-<module>/{init,update}/<dbms>[-<version>]/...`.
//! Modules run in ascending numeric index order, ties broken by name. Inside
//! a module, files from the `<dbms>-<version>` directory replace base files with
//! the same relative path.

use crate::error::{MigrateError, MigrateResult};
use crate::script::{MigrationScript, ScriptKind};
use sl_core::{DbmsType, StoreName, StoreSettings};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Init scripts are the files whose name ends with this suffix.
const INIT_SCRIPT_SUFFIX: &str = "create-db.sql";

/// Finds migration scripts for one store and DBMS flavour
#[derive(Debug, Clone)]
pub struct ScriptFinder {
    store: StoreName,
    dbms: DbmsType,
    dbms_version: Option<String>,
    db_dir: PathBuf,
    extensions: Vec<String>,
}

/// A file found under a script directory, before ordering
struct Candidate {
    path: PathBuf,
    /// Path relative to the (base or versioned) script directory it was found in
    relative: String,
    versioned: bool,
}

impl ScriptFinder {
    /// Create a finder for `settings`, looking for update scripts with the given extensions
    pub fn new(settings: &StoreSettings, db_dir: impl Into<PathBuf>, extensions: &[&str]) -> Self {
        Self {
            store: settings.store.clone(),
            dbms: settings.dbms,
            dbms_version: settings.dbms_version.clone(),
            db_dir: db_dir.into(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Module directory names in execution order
    pub fn module_dirs(&self) -> MigrateResult<Vec<String>> {
        if !self.db_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut modules = Vec::new();
        for entry in read_dir(&self.db_dir)? {
            let path = entry.path();
            if !path.is_dir() {
                log::debug!("Ignoring non-directory {} in db dir", path.display());
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let index = module_index(&name)?;
            modules.push((index, name));
        }

        modules.sort();
        Ok(modules.into_iter().map(|(_, name)| name).collect())
    }

    /// Init scripts (`*create-db.sql`) of all modules, or of `one_module` only
    pub fn init_scripts(&self, one_module: Option<&str>) -> MigrateResult<Vec<MigrationScript>> {
        if !self.db_dir.exists() {
            log::info!("{} doesn't exist", self.db_dir.display());
            return Ok(Vec::new());
        }

        let modules = self.module_dirs()?;
        log::info!("Modules: [{}]", modules.join(", "));

        let mut scripts = Vec::new();
        for module in modules.iter().filter(|m| selected(m, one_module)) {
            let init_dir = self.db_dir.join(module).join(self.store.init_dir_name());
            let script_dir = init_dir.join(self.dbms.dir_name());
            if !script_dir.exists() {
                log::info!("{} doesn't exist", script_dir.display());
                continue;
            }

            let mut files = BTreeMap::new();
            collect_init_files(&script_dir, false, &mut files)?;
            if let Some(version_dir) = self.version_dir(&init_dir) {
                collect_init_files(&version_dir, true, &mut files)?;
            }

            // BTreeMap keys are the file names, so values come out sorted by name
            let module_scripts: Vec<MigrationScript> = files
                .into_values()
                .map(|c| self.to_script(c, module, ScriptKind::Init))
                .collect();
            log::debug!(
                "Init scripts of {}: [{}]",
                module,
                module_scripts
                    .iter()
                    .map(|s| s.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            scripts.extend(module_scripts);
        }
        Ok(scripts)
    }

    /// Update scripts of all modules, or of `one_module` only, in execution order
    pub fn update_scripts(&self, one_module: Option<&str>) -> MigrateResult<Vec<MigrationScript>> {
        if !self.db_dir.exists() {
            return Ok(Vec::new());
        }

        let mut scripts = Vec::new();
        for module in self
            .module_dirs()?
            .iter()
            .filter(|m| selected(m, one_module))
        {
            let update_dir = self.db_dir.join(module).join(self.store.update_dir_name());
            let script_dir = update_dir.join(self.dbms.dir_name());
            if !script_dir.exists() {
                continue;
            }

            let mut files = BTreeMap::new();
            self.collect_update_files(&script_dir, &script_dir, false, &mut files)?;
            if let Some(version_dir) = self.version_dir(&update_dir) {
                self.collect_update_files(&version_dir, &version_dir, true, &mut files)?;
            }

            let mut candidates: Vec<Candidate> = files.into_values().collect();
            candidates.sort_by(|a, b| {
                update_sort_key(&a.relative)
                    .cmp(&update_sort_key(&b.relative))
                    .then_with(|| a.relative.cmp(&b.relative))
            });

            scripts.extend(
                candidates
                    .into_iter()
                    .map(|c| self.to_script(c, module, ScriptKind::Update)),
            );
        }
        Ok(scripts)
    }

    /// `<dbms>-<version>` directory next to the base script directory, if present
    fn version_dir(&self, parent: &Path) -> Option<PathBuf> {
        let version = self.dbms_version.as_deref()?;
        let dir = parent.join(format!("{}-{}", self.dbms.dir_name(), version));
        dir.exists().then_some(dir)
    }

    fn collect_update_files(
        &self,
        root: &Path,
        dir: &Path,
        versioned: bool,
        files: &mut BTreeMap<String, Candidate>,
    ) -> MigrateResult<()> {
        for entry in read_dir(dir)? {
            let path = entry.path();
            if path.is_dir() {
                self.collect_update_files(root, &path, versioned, files)?;
            } else if self.has_script_extension(&path) {
                let relative = relative_name(root, &path);
                files.insert(
                    relative.clone(),
                    Candidate {
                        path,
                        relative,
                        versioned,
                    },
                );
            }
        }
        Ok(())
    }

    fn has_script_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    fn to_script(&self, candidate: Candidate, module: &str, kind: ScriptKind) -> MigrationScript {
        MigrationScript {
            name: relative_name(&self.db_dir, &candidate.path),
            path: candidate.path,
            module: module.to_string(),
            dbms: self.dbms,
            dbms_version: if candidate.versioned {
                self.dbms_version.clone()
            } else {
                None
            },
            kind,
        }
    }
}

/// Numeric prefix of a module directory name (`10-core` -> 10)
pub fn module_index(name: &str) -> MigrateResult<u64> {
    let invalid = || MigrateError::InvalidModuleDir {
        name: name.to_string(),
    };
    match name.find('-') {
        Some(dash) if dash > 0 => name[..dash].parse::<u64>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

fn selected(module: &str, one_module: Option<&str>) -> bool {
    match one_module.map(str::trim) {
        Some(only) if !only.is_empty() => only == module,
        _ => true,
    }
}

fn collect_init_files(
    dir: &Path,
    versioned: bool,
    files: &mut BTreeMap<String, Candidate>,
) -> MigrateResult<()> {
    for entry in read_dir(dir)? {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        if path.is_file() && name.ends_with(INIT_SCRIPT_SUFFIX) {
            files.insert(
                name.clone(),
                Candidate {
                    path,
                    relative: name,
                    versioned,
                },
            );
        }
    }
    Ok(())
}

/// Ordering key for update scripts: the relative directory followed by the
/// file's base name, so files of one directory order by base name.
fn update_sort_key(relative: &str) -> String {
    let (dir, file) = match relative.rfind('/') {
        Some(pos) => (&relative[..=pos], &relative[pos + 1..]),
        None => ("", relative),
    };
    let base = match file.rfind('.') {
        Some(pos) => &file[..pos],
        None => file,
    };
    format!("{}{}", dir, base)
}

/// `/`-separated path of `path` relative to `root`
fn relative_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn read_dir(dir: &Path) -> MigrateResult<Vec<std::fs::DirEntry>> {
    let list_err = |source| MigrateError::ListDir {
        path: dir.display().to_string(),
        source,
    };
    std::fs::read_dir(dir)
        .map_err(list_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(list_err)
}

#[cfg(test)]
#[path = "finder_test.rs"]
mod tests;
