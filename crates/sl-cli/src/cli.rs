//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use sl_core::profiles::PROFILES_ENV_VAR;
use std::path::PathBuf;

/// Sluice - database migrations and dependency jar cleanup for application builds
#[derive(Parser, Debug)]
#[command(name = "sluice")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Active profiles (comma-separated); `<profile>-sluice.yml` overlays the base config
    #[arg(long, global = true, env = PROFILES_ENV_VAR)]
    pub profile: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recreate the database, run init scripts and mark updates as applied
    CreateDb(CreateDbArgs),

    /// Apply pending update scripts
    UpdateDb(UpdateDbArgs),

    /// Execute arbitrary SQL script files
    DbScript(DbScriptArgs),

    /// List discovered init and update scripts in execution order
    Scripts(ScriptsArgs),

    /// Remove lower versions of duplicated library jars
    ResolveLibs(ResolveLibsArgs),
}

/// Arguments for the create-db command
#[derive(Args, Debug)]
pub struct CreateDbArgs {
    /// Data store to create (default: main)
    #[arg(short, long)]
    pub store: Option<String>,

    /// Only use scripts of this module directory (e.g. 10-core)
    #[arg(short, long)]
    pub module: Option<String>,
}

/// Arguments for the update-db command
#[derive(Args, Debug)]
pub struct UpdateDbArgs {
    /// Data store to update (default: main)
    #[arg(short, long)]
    pub store: Option<String>,

    /// Only use scripts of this module directory (e.g. 10-core)
    #[arg(short, long)]
    pub module: Option<String>,
}

/// Arguments for the db-script command
#[derive(Args, Debug)]
pub struct DbScriptArgs {
    /// Data store to run against (default: main)
    #[arg(short, long)]
    pub store: Option<String>,

    /// Script files, executed in the given order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Arguments for the scripts command
#[derive(Args, Debug)]
pub struct ScriptsArgs {
    /// Data store whose scripts are listed (default: main)
    #[arg(short, long)]
    pub store: Option<String>,

    /// Only list scripts of this module directory
    #[arg(short, long)]
    pub module: Option<String>,

    /// Only list scripts of one kind
    #[arg(short, long, value_enum)]
    pub kind: Option<ScriptKindArg>,

    /// Only list update scripts not yet recorded in the database changelog
    #[arg(long)]
    pub pending: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: ScriptsOutput,
}

/// Script kind filter
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKindArg {
    /// Init scripts (`*create-db.sql`)
    Init,
    /// Update scripts
    Update,
}

/// Scripts output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptsOutput {
    /// Human-readable table
    Table,
    /// JSON array
    Json,
}

/// Arguments for the resolve-libs command
#[derive(Args, Debug)]
pub struct ResolveLibsArgs {
    /// Directory containing the jars (default: `libs.dir` from config)
    #[arg(short, long)]
    pub lib_dir: Option<PathBuf>,

    /// Root that log output paths are shown relative to (default: `libs.root`)
    #[arg(short = 'r', long)]
    pub library_root: Option<PathBuf>,

    /// Jars copied by the build; repeat the flag for each jar (default: `libs.reserved`)
    #[arg(long = "copied", value_name = "JAR")]
    pub copied: Vec<String>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
