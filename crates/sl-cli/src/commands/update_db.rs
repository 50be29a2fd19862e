//! Update-db command implementation

use anyhow::{Context, Result};
use sl_migrate::MigrationRunner;

use crate::cli::{GlobalArgs, UpdateDbArgs};
use crate::context::RuntimeContext;

/// Execute the update-db command
pub async fn execute(args: &UpdateDbArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let settings = ctx.store_settings(args.store.as_deref())?;
    let db = ctx.open_database(&settings)?;

    let runner = MigrationRunner::new(&db, &settings, ctx.db_dir(), &ctx.config.delimiter);
    let summary = runner
        .update_db(args.module.as_deref())
        .await
        .with_context(|| format!("Failed to update database for store '{}'", settings.store))?;

    if summary.executed.is_empty() {
        println!("{} database is up to date", settings.store);
        return Ok(());
    }
    println!(
        "Applied {} update scripts to {} database",
        summary.executed.len(),
        settings.store
    );
    for name in &summary.executed {
        println!("  {}", name);
    }
    Ok(())
}
