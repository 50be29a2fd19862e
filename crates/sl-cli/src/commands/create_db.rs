//! Create-db command implementation

use anyhow::{Context, Result};
use sl_migrate::MigrationRunner;

use crate::cli::{CreateDbArgs, GlobalArgs};
use crate::context::RuntimeContext;

/// Execute the create-db command
pub async fn execute(args: &CreateDbArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let settings = ctx.store_settings(args.store.as_deref())?;
    let db = ctx.recreate_database(&settings)?;

    let runner = MigrationRunner::new(&db, &settings, ctx.db_dir(), &ctx.config.delimiter);
    let auxiliary = ctx.config.auxiliary_script_absolute(&ctx.root);
    let summary = runner
        .create_db(args.module.as_deref(), auxiliary.as_deref())
        .await
        .with_context(|| format!("Failed to create database for store '{}'", settings.store))?;

    println!(
        "Created {} database ({}): {} init scripts executed, {} update scripts marked",
        settings.store,
        settings.dbms,
        summary.init_scripts.len(),
        summary.marked_updates.len()
    );
    if ctx.verbose {
        for name in &summary.init_scripts {
            println!("  init    {}", name);
        }
        for name in &summary.marked_updates {
            println!("  marked  {}", name);
        }
    }
    if summary.auxiliary_executed {
        println!("Auxiliary script executed");
    }
    Ok(())
}
