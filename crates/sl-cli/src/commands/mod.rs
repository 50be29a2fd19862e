//! CLI command implementations

pub(crate) mod create_db;
pub(crate) mod db_script;
pub(crate) mod resolve_libs;
pub(crate) mod scripts;
pub(crate) mod update_db;
