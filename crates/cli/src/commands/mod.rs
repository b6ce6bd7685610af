// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod config;
pub mod init;
pub mod list;
pub mod resync;
pub mod show;
pub mod stats;
pub mod submit;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;
pub mod token;

use std::path::PathBuf;

use wl_core::Database;

use crate::config::{find_work_dir, get_db_path, Config, EnvOverrides};
use crate::error::Result;

/// Everything a command needs once the project is located.
pub struct Context {
    /// File config with environment overrides applied.
    pub config: Config,
    pub db: Database,
}

/// Load the effective config for the current project.
pub fn load_config() -> Result<(Config, PathBuf)> {
    let work_dir = find_work_dir()?;
    let config = Config::load(&work_dir)?.with_overrides(&EnvOverrides::from_env());
    Ok((config, work_dir))
}

/// Helper to open the database from the current context.
pub fn open_context() -> Result<Context> {
    let (config, work_dir) = load_config()?;
    let db_path = get_db_path(&work_dir, &config);
    tracing::debug!(path = %db_path.display(), "opening database");
    let db = Database::open(&db_path)?;
    Ok(Context { config, db })
}
