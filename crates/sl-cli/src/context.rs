//! Runtime context for CLI commands

use anyhow::{Context, Result};
use sl_core::profiles::parse_profiles;
use sl_core::{Config, StoreName, StoreSettings};
use sl_db::{Database, DuckDbBackend};
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Loaded configuration and project location
pub struct RuntimeContext {
    /// Project root; relative config paths resolve against it
    pub root: PathBuf,

    /// Configuration with active profile overlays applied
    pub config: Config,

    /// Verbose output enabled
    pub verbose: bool,
}

impl RuntimeContext {
    /// Create a new runtime context from global arguments
    pub fn new(args: &GlobalArgs) -> Result<Self> {
        let root = PathBuf::from(&args.project_dir);
        let profiles = args
            .profile
            .as_deref()
            .map(parse_profiles)
            .unwrap_or_default();
        if !profiles.is_empty() {
            log::debug!("Active profiles: {}", profiles.join(", "));
        }

        let config = if let Some(config_path) = &args.config {
            Config::load_with_profiles(Path::new(config_path), &profiles)
                .context("Failed to load configuration file")?
        } else {
            Config::load_from_dir(&root, &profiles)
                .context("Failed to load project configuration")?
        };

        Ok(Self {
            root,
            config,
            verbose: args.verbose,
        })
    }

    /// Settings of the named store, or of the main store
    pub fn store_settings(&self, store: Option<&str>) -> Result<StoreSettings> {
        let store = store.map(StoreName::new).unwrap_or_default();
        Ok(self.config.store_settings(&store)?)
    }

    /// Absolute db script directory
    pub fn db_dir(&self) -> PathBuf {
        self.config.db_dir_absolute(&self.root)
    }

    /// Open the store's database
    pub fn open_database(&self, settings: &StoreSettings) -> Result<DuckDbBackend> {
        let path = settings.path_absolute(&self.root);
        let db = DuckDbBackend::new(&path.to_string_lossy()).context("Failed to connect to database")?;
        log::debug!(
            "Opened {} database at {} ({})",
            settings.store,
            path.display(),
            db.db_type()
        );
        Ok(db)
    }

    /// Drop the store's database and open an empty one in its place
    pub fn recreate_database(&self, settings: &StoreSettings) -> Result<DuckDbBackend> {
        let path = settings.path_absolute(&self.root);
        log::info!("Recreating {} database at {}", settings.store, path.display());
        DuckDbBackend::recreate(&path.to_string_lossy()).context("Failed to recreate database")
    }
}

/// Initialize logging; `RUST_LOG` overrides the default level
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
