//! Resolve-libs command implementation

use anyhow::{bail, Context, Result};
use sl_core::LibsConfig;
use sl_libs::DependencyResolver;
use std::path::PathBuf;

use crate::cli::{GlobalArgs, ResolveLibsArgs};
use crate::context::RuntimeContext;

/// Execute the resolve-libs command
pub async fn execute(args: &ResolveLibsArgs, global: &GlobalArgs) -> Result<()> {
    // The project config is only needed for values missing on the command line
    let (root, libs) = if args.lib_dir.is_none() || args.copied.is_empty() {
        let ctx = RuntimeContext::new(global)?;
        (ctx.root, ctx.config.libs)
    } else {
        (PathBuf::from(&global.project_dir), LibsConfig::default())
    };

    let Some(lib_dir) = args
        .lib_dir
        .clone()
        .or_else(|| libs.dir.as_ref().map(|d| root.join(d)))
    else {
        bail!("No library directory given; pass --lib-dir or set libs.dir in the config");
    };
    let library_root = args
        .library_root
        .clone()
        .or_else(|| libs.root.as_ref().map(|r| root.join(r)));
    let copied = if args.copied.is_empty() {
        libs.reserved
    } else {
        args.copied.clone()
    };

    if copied.is_empty() {
        println!("No copied libraries given, nothing to resolve");
        return Ok(());
    }

    let resolver = DependencyResolver::new(library_root);
    let removed = resolver
        .resolve_dependencies(&lib_dir, &copied)
        .with_context(|| format!("Failed to resolve libraries in {}", lib_dir.display()))?;

    if removed.is_empty() {
        println!("No conflicting libraries in {}", lib_dir.display());
    } else {
        println!("Removed {} libraries from {}", removed.len(), lib_dir.display());
        for name in &removed {
            println!("  {}", name);
        }
    }
    Ok(())
}
