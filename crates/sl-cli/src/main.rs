//! Sluice CLI - database migrations and dependency jar cleanup for application builds

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod context;

use cli::Cli;
use commands::{create_db, db_script, resolve_libs, scripts, update_db};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    context::init_logging(cli.global.verbose);

    match &cli.command {
        cli::Commands::CreateDb(args) => create_db::execute(args, &cli.global).await,
        cli::Commands::UpdateDb(args) => update_db::execute(args, &cli.global).await,
        cli::Commands::DbScript(args) => db_script::execute(args, &cli.global).await,
        cli::Commands::Scripts(args) => scripts::execute(args, &cli.global).await,
        cli::Commands::ResolveLibs(args) => resolve_libs::execute(args, &cli.global).await,
    }
}
