// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use crate::cli::ConfigCommand;
use crate::config::{find_work_dir, get_db_path, Config, EnvOverrides, KEYS};
use crate::error::Result;

pub fn run(cmd: ConfigCommand) -> Result<()> {
    let work_dir = find_work_dir()?;
    match cmd {
        ConfigCommand::Show => {
            let file = Config::load(&work_dir)?;
            let overrides = EnvOverrides::from_env();
            for line in show_lines(&file, &overrides)? {
                println!("{line}");
            }
            let effective = file.with_overrides(&overrides);
            println!(
                "# database file: {}",
                get_db_path(&work_dir, &effective).display()
            );
            Ok(())
        }
        ConfigCommand::Set { key, value } => {
            set(&work_dir, &key, &value)?;
            println!("Set {key}");
            Ok(())
        }
    }
}

/// `key = value` lines for the effective config, secrets masked.
/// Values coming from the environment are marked.
pub(crate) fn show_lines(file: &Config, overrides: &EnvOverrides) -> Result<Vec<String>> {
    let effective = file.clone().with_overrides(overrides);
    let from_env = |key: &str| match key {
        "sync.api_url" => overrides.api_url.is_some(),
        "sync.api_key" => overrides.api_key.is_some(),
        "sync.api_secret" => overrides.api_secret.is_some(),
        _ => false,
    };

    KEYS.iter()
        .map(|&key| {
            let value = effective.display_value(key)?;
            let marker = if from_env(key) { "  # from env" } else { "" };
            Ok(format!("{key} = {value}{marker}"))
        })
        .collect()
}

/// Update one key in the config file. Environment overrides are not written back.
pub(crate) fn set(work_dir: &Path, key: &str, value: &str) -> Result<()> {
    let mut config = Config::read(work_dir)?;
    config.set(key, value)?;
    config.save(work_dir)?;
    tracing::info!(key, "config updated");
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
