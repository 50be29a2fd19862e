//! Execution of init and update scripts with changelog bookkeeping.

use crate::changelog;
use crate::error::{MigrateError, MigrateResult};
use crate::finder::ScriptFinder;
use crate::script::MigrationScript;
use crate::splitter::{is_empty_statement, normalize_line_breaks, ScriptSplitter};
use sl_core::StoreSettings;
use sl_db::Database;
use std::path::{Path, PathBuf};

/// Update script extensions. `create_db` marks all of them as executed,
/// `update_db` only runs the SQL ones.
pub const UPDATE_SCRIPT_EXTENSIONS: &[&str] = &["sql", "groovy"];

/// Outcome of a successful `create_db` run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateDbSummary {
    /// Init scripts executed, in order
    pub init_scripts: Vec<String>,
    /// Update scripts recorded as already applied
    pub marked_updates: Vec<String>,
    /// Whether an auxiliary script was executed
    pub auxiliary_executed: bool,
}

/// Outcome of a successful `update_db` run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateDbSummary {
    /// Whether the changelog table had to be created
    pub changelog_created: bool,
    /// Update scripts executed, in order
    pub executed: Vec<String>,
}

/// Runs migration scripts of one store against a database connection
pub struct MigrationRunner<'a> {
    db: &'a dyn Database,
    settings: &'a StoreSettings,
    db_dir: PathBuf,
    splitter: ScriptSplitter,
}

impl<'a> MigrationRunner<'a> {
    /// Create a runner; `delimiter` separates statements inside scripts
    pub fn new(
        db: &'a dyn Database,
        settings: &'a StoreSettings,
        db_dir: impl Into<PathBuf>,
        delimiter: &str,
    ) -> Self {
        Self {
            db,
            settings,
            db_dir: db_dir.into(),
            splitter: ScriptSplitter::new(delimiter),
        }
    }

    /// Finder for this runner's store and db directory
    fn finder(&self) -> ScriptFinder {
        ScriptFinder::new(self.settings, &self.db_dir, UPDATE_SCRIPT_EXTENSIONS)
    }

    /// Apply connection-level settings, i.e. create and select the `currentSchema`
    pub async fn prepare_connection(&self) -> MigrateResult<()> {
        if let Some(schema) = self.settings.current_schema() {
            log::debug!("Using schema {}", schema);
            self.db.create_schema_if_not_exists(&schema).await?;
            self.db.use_schema(&schema).await?;
        }
        Ok(())
    }

    /// Select the `currentSchema` only if it already exists.
    ///
    /// Returns false when the schema is missing; nothing is created.
    pub async fn use_existing_schema(&self) -> MigrateResult<bool> {
        let Some(schema) = self.settings.current_schema() else {
            return Ok(true);
        };
        if !self.db.schema_exists(&schema).await? {
            log::debug!("Schema {} does not exist", schema);
            return Ok(false);
        }
        self.db.use_schema(&schema).await?;
        Ok(true)
    }

    /// Initialize a freshly created database.
    ///
    /// Creates the changelog, runs init scripts (recording each as init), then
    /// records every update script as applied even if an init script failed.
    /// The auxiliary script, if any, runs last.
    pub async fn create_db(
        &self,
        one_module: Option<&str>,
        auxiliary_script: Option<&Path>,
    ) -> MigrateResult<CreateDbSummary> {
        self.prepare_connection().await?;
        changelog::create_changelog_table(self.db, self.settings).await?;

        let mut summary = CreateDbSummary::default();
        let init_result = self.run_init_scripts(one_module, &mut summary).await;
        let mark_result = self.mark_update_scripts(one_module, &mut summary).await;
        init_result?;
        mark_result?;

        if let Some(script) = auxiliary_script {
            log::info!("Executing auxiliary script {}", script.display());
            self.execute_sql_script(script).await?;
            summary.auxiliary_executed = true;
        }
        Ok(summary)
    }

    async fn run_init_scripts(
        &self,
        one_module: Option<&str>,
        summary: &mut CreateDbSummary,
    ) -> MigrateResult<()> {
        let scripts = self.finder().init_scripts(one_module)?;
        for script in &scripts {
            self.execute_sql_script(&script.path).await?;
            changelog::mark_script(self.db, &script.name, true).await?;
            summary.init_scripts.push(script.name.clone());
        }
        Ok(())
    }

    async fn mark_update_scripts(
        &self,
        one_module: Option<&str>,
        summary: &mut CreateDbSummary,
    ) -> MigrateResult<()> {
        let scripts = self.finder().update_scripts(one_module)?;
        for script in &scripts {
            changelog::mark_script(self.db, &script.name, true).await?;
            summary.marked_updates.push(script.name.clone());
        }
        Ok(())
    }

    /// Apply SQL update scripts that are not recorded in the changelog yet.
    ///
    /// Every attempted script is recorded, including the one that failed; the
    /// first failure ends the run. A script error takes precedence over a
    /// failure to record it.
    pub async fn update_db(&self, one_module: Option<&str>) -> MigrateResult<UpdateDbSummary> {
        self.prepare_connection().await?;

        let changelog_created = changelog::ensure_changelog_table(self.db, self.settings).await?;
        let pending = self.pending_update_scripts(one_module).await?;
        if pending.is_empty() {
            log::info!("No updates available");
        }

        let mut summary = UpdateDbSummary {
            changelog_created,
            executed: Vec::new(),
        };
        for script in &pending {
            let result = self.execute_sql_script(&script.path).await;
            let marked = changelog::mark_script(self.db, &script.name, false).await;
            result?;
            marked?;
            summary.executed.push(script.name.clone());
        }
        Ok(summary)
    }

    /// SQL update scripts not yet present in the changelog, in execution order.
    ///
    /// A missing schema or changelog table means nothing has been applied.
    /// The database is only read.
    pub async fn pending_update_scripts(
        &self,
        one_module: Option<&str>,
    ) -> MigrateResult<Vec<MigrationScript>> {
        let executed = if self.use_existing_schema().await?
            && self.db.relation_exists(changelog::CHANGELOG_TABLE).await?
        {
            changelog::executed_scripts(self.db).await?
        } else {
            Default::default()
        };
        Ok(self
            .finder()
            .update_scripts(one_module)?
            .into_iter()
            .filter(|s| s.is_sql() && !executed.contains(&s.name))
            .collect())
    }

    /// Execute arbitrary script files in order without touching the changelog
    pub async fn run_scripts(&self, paths: &[PathBuf]) -> MigrateResult<usize> {
        self.prepare_connection().await?;
        for path in paths {
            self.execute_sql_script(path).await?;
        }
        Ok(paths.len())
    }

    /// Split a script file into statements and execute them one by one.
    ///
    /// Returns the number of statements executed.
    pub async fn execute_sql_script(&self, path: &Path) -> MigrateResult<usize> {
        log::info!("Executing SQL script {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| MigrateError::ScriptRead {
            path: path.display().to_string(),
            source,
        })?;

        let script = normalize_line_breaks(&content);
        let mut executed = 0;
        for sql in self.splitter.split(&script) {
            if is_empty_statement(&sql) {
                continue;
            }
            log::debug!("Executing SQL: {}", sql.trim());
            self.db
                .execute_batch(&sql)
                .await
                .map_err(|source| MigrateError::SqlExecution {
                    script: path.display().to_string(),
                    sql: sql.trim().to_string(),
                    source,
                })?;
            executed += 1;
        }
        Ok(executed)
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
