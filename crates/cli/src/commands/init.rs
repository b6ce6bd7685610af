// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};

use wl_core::{Database, SettingsSource};

use crate::cli::CrmArgs;
use crate::config::{get_db_path, init_work_dir, Config};
use crate::error::Result;

pub fn run(crm: CrmArgs, path: Option<String>) -> Result<()> {
    let target_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir()?,
    };

    let (work_dir, config) = run_impl(&target_path, &crm)?;

    println!("Initialized waitlist at {}", work_dir.display());
    println!("Database: {}", get_db_path(&work_dir, &config).display());
    if config.sync_config().is_configured() {
        println!("Sync: enabled ({})", config.sync.api_url);
    } else {
        println!("Sync: disabled (set sync.api_url, sync.api_key and sync.api_secret to enable)");
    }
    Ok(())
}

/// Create `.waitlist/` under `target_path` with a fresh session secret and
/// an empty database.
pub(crate) fn run_impl(target_path: &Path, crm: &CrmArgs) -> Result<(PathBuf, Config)> {
    let mut config = Config::generate();
    if let Some(url) = &crm.api_url {
        config.set("sync.api_url", url)?;
    }
    if let Some(key) = &crm.api_key {
        config.set("sync.api_key", key)?;
    }
    if let Some(secret) = &crm.api_secret {
        config.set("sync.api_secret", secret)?;
    }

    let work_dir = init_work_dir(target_path, &config)?;

    // Create the schema now so the first submission does not pay for it
    Database::open(&get_db_path(&work_dir, &config))?;

    tracing::info!(path = %work_dir.display(), "initialized waitlist");
    Ok((work_dir, config))
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
