//! The `SYS_DB_CHANGELOG` table recording executed scripts.

use crate::error::{MigrateError, MigrateResult};
use sl_core::StoreSettings;
use sl_db::Database;
use std::collections::BTreeSet;

/// Name of the changelog table
pub const CHANGELOG_TABLE: &str = "SYS_DB_CHANGELOG";

/// DDL of the changelog table for a store's DBMS flavour
pub fn create_table_sql(settings: &StoreSettings) -> String {
    format!(
        "create table {} (SCRIPT_NAME varchar({}) not null primary key, \
         CREATE_TS {} default current_timestamp, IS_INIT integer default 0)",
        CHANGELOG_TABLE,
        settings.changelog_key_length(),
        settings.timestamp_type
    )
}

/// Create the changelog table unconditionally
pub async fn create_changelog_table(
    db: &dyn Database,
    settings: &StoreSettings,
) -> MigrateResult<()> {
    log::debug!("Creating {}", CHANGELOG_TABLE);
    db.execute_batch(&create_table_sql(settings))
        .await
        .map_err(|source| MigrateError::Changelog {
            message: format!("could not create {}", CHANGELOG_TABLE),
            source,
        })
}

/// Create the changelog table unless it already exists.
///
/// Returns true when the table was created.
pub async fn ensure_changelog_table(
    db: &dyn Database,
    settings: &StoreSettings,
) -> MigrateResult<bool> {
    let exists = db
        .relation_exists(CHANGELOG_TABLE)
        .await
        .map_err(|source| MigrateError::Changelog {
            message: format!("could not check for {}", CHANGELOG_TABLE),
            source,
        })?;
    if exists {
        return Ok(false);
    }
    log::info!("{} does not exist, creating", CHANGELOG_TABLE);
    create_changelog_table(db, settings).await?;
    Ok(true)
}

/// Record `script_name` as executed
pub async fn mark_script(db: &dyn Database, script_name: &str, is_init: bool) -> MigrateResult<()> {
    let sql = format!(
        "insert into {} (SCRIPT_NAME, IS_INIT) values ('{}', {})",
        CHANGELOG_TABLE,
        script_name.replace('\'', "''"),
        if is_init { 1 } else { 0 }
    );
    db.execute(&sql)
        .await
        .map_err(|source| MigrateError::Changelog {
            message: format!("could not mark script {}", script_name),
            source,
        })?;
    Ok(())
}

/// Names of all scripts already recorded in the changelog
pub async fn executed_scripts(db: &dyn Database) -> MigrateResult<BTreeSet<String>> {
    let names = db
        .query_column(&format!("select SCRIPT_NAME from {}", CHANGELOG_TABLE))
        .await
        .map_err(|source| MigrateError::Changelog {
            message: format!("could not read {}", CHANGELOG_TABLE),
            source,
        })?;
    Ok(names.into_iter().collect())
}

#[cfg(test)]
#[path = "changelog_test.rs"]
mod tests;
