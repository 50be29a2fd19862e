//! Db-script command implementation

use anyhow::{Context, Result};
use sl_migrate::MigrationRunner;

use crate::cli::{DbScriptArgs, GlobalArgs};
use crate::context::RuntimeContext;

/// Execute the db-script command
pub async fn execute(args: &DbScriptArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let settings = ctx.store_settings(args.store.as_deref())?;
    let db = ctx.open_database(&settings)?;

    // Relative script paths are taken from the project directory
    let files: Vec<_> = args.files.iter().map(|f| ctx.root.join(f)).collect();

    let runner = MigrationRunner::new(&db, &settings, ctx.db_dir(), &ctx.config.delimiter);
    let count = runner
        .run_scripts(&files)
        .await
        .context("Failed to execute SQL scripts")?;

    println!("Executed {} scripts against {} database", count, settings.store);
    Ok(())
}
