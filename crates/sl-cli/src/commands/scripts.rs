//! Scripts command implementation

use anyhow::{bail, Context, Result};
use serde::Serialize;
use sl_core::StoreSettings;
use sl_migrate::{MigrationRunner, MigrationScript, ScriptFinder, UPDATE_SCRIPT_EXTENSIONS};

use crate::cli::{GlobalArgs, ScriptKindArg, ScriptsArgs, ScriptsOutput};
use crate::context::RuntimeContext;

/// Script information for display
#[derive(Debug, Serialize)]
struct ScriptInfo {
    name: String,
    module: String,
    kind: String,
    dbms: String,
    dbms_version: Option<String>,
    path: String,
}

impl From<&MigrationScript> for ScriptInfo {
    fn from(script: &MigrationScript) -> Self {
        Self {
            name: script.name.clone(),
            module: script.module.clone(),
            kind: script.kind.to_string(),
            dbms: script.dbms.to_string(),
            dbms_version: script.dbms_version.clone(),
            path: script.path.display().to_string(),
        }
    }
}

/// Execute the scripts command
pub async fn execute(args: &ScriptsArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let settings = ctx.store_settings(args.store.as_deref())?;
    let module = args.module.as_deref();

    if args.pending && args.kind == Some(ScriptKindArg::Init) {
        bail!("--pending only applies to update scripts");
    }

    let scripts = if args.pending {
        pending_scripts(&ctx, &settings, module).await?
    } else {
        let finder = ScriptFinder::new(&settings, ctx.db_dir(), UPDATE_SCRIPT_EXTENSIONS);
        let mut scripts = Vec::new();
        if args.kind != Some(ScriptKindArg::Update) {
            scripts.extend(finder.init_scripts(module).context("Failed to find init scripts")?);
        }
        if args.kind != Some(ScriptKindArg::Init) {
            scripts.extend(
                finder
                    .update_scripts(module)
                    .context("Failed to find update scripts")?,
            );
        }
        scripts
    };

    let infos: Vec<ScriptInfo> = scripts.iter().map(ScriptInfo::from).collect();
    match args.output {
        ScriptsOutput::Table => print_table(&infos),
        ScriptsOutput::Json => print_json(&infos)?,
    }
    Ok(())
}

/// Update scripts not yet applied. Never creates the database file or schema.
async fn pending_scripts(
    ctx: &RuntimeContext,
    settings: &StoreSettings,
    module: Option<&str>,
) -> Result<Vec<MigrationScript>> {
    let path = settings.path_absolute(&ctx.root);
    if !settings.is_in_memory() && !path.exists() {
        log::info!("{} does not exist, all update scripts are pending", path.display());
        let scripts = ScriptFinder::new(settings, ctx.db_dir(), UPDATE_SCRIPT_EXTENSIONS)
            .update_scripts(module)
            .context("Failed to find update scripts")?;
        return Ok(scripts.into_iter().filter(|s| s.is_sql()).collect());
    }

    let db = ctx.open_database(settings)?;
    let runner = MigrationRunner::new(&db, settings, ctx.db_dir(), &ctx.config.delimiter);
    runner
        .pending_update_scripts(module)
        .await
        .context("Failed to read pending update scripts")
}

/// Print scripts in table format
fn print_table(scripts: &[ScriptInfo]) {
    let name_width = scripts
        .iter()
        .map(|s| s.name.len())
        .max()
        .unwrap_or(4)
        .max(4);
    let module_width = scripts
        .iter()
        .map(|s| s.module.len())
        .max()
        .unwrap_or(6)
        .max(6);
    let kind_width = 6;

    println!(
        "{:<name_width$}  {:<module_width$}  {:<kind_width$}  VERSION",
        "NAME", "MODULE", "KIND",
    );
    println!(
        "{:-<name_width$}  {:-<module_width$}  {:-<kind_width$}  {}",
        "",
        "",
        "",
        "-".repeat(7),
    );

    for script in scripts {
        println!(
            "{:<name_width$}  {:<module_width$}  {:<kind_width$}  {}",
            script.name,
            script.module,
            script.kind,
            script.dbms_version.as_deref().unwrap_or("-"),
        );
    }

    println!();
    println!("{} scripts found", scripts.len());
}

/// Print scripts in JSON format
fn print_json(scripts: &[ScriptInfo]) -> Result<()> {
    let json = serde_json::to_string_pretty(scripts).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}
