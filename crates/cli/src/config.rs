// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project configuration management.
//!
//! Configuration is stored in `.waitlist/config.toml` and includes:
//! - `database`: Optional path to the SQLite file (relative to the project root or absolute)
//! - `[sync]`: CRM endpoint, credentials and request timeout
//! - `[session]`: Secret and lifetime for anti-forgery tokens
//!
//! The CRM credentials can also come from `WAITLIST_API_URL`,
//! `WAITLIST_API_KEY` and `WAITLIST_API_SECRET`, which win over the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use wl_core::sync::{mask, DEFAULT_TIMEOUT_SECS};
use wl_core::{SessionTokens, SettingsSource, SyncConfig};

use crate::env;
use crate::error::{Error, Result};

const WORK_DIR_NAME: &str = ".waitlist";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "waitlist.db";
const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Keys accepted by `wl config set`, in display order.
pub const KEYS: [&str; 7] = [
    "database",
    "sync.api_url",
    "sync.api_key",
    "sync.api_secret",
    "sync.timeout_secs",
    "session.secret",
    "session.lifetime_secs",
];

/// Keys whose values are never printed.
const SECRET_KEYS: [&str; 3] = ["sync.api_key", "sync.api_secret", "session.secret"];

/// Project configuration stored in `.waitlist/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Optional path for the database file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default)]
    pub sync: SyncSettings,
    #[serde(default)]
    pub session: SessionSettings,
}

/// CRM connection settings. Sync stays off until all three credentials are set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSettings {
    #[serde(default)]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_secret: String,
    /// Upper bound on one push, in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SyncSettings {
    fn default() -> Self {
        SyncSettings {
            api_url: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Anti-forgery token settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    #[serde(default)]
    pub secret: String,
    /// How long an issued token is accepted, in seconds (default: one day).
    #[serde(default = "default_lifetime_secs")]
    pub lifetime_secs: i64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            secret: String::new(),
            lifetime_secs: default_lifetime_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_lifetime_secs() -> i64 {
    SessionTokens::DEFAULT_LIFETIME_SECS
}

/// CRM values taken from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        EnvOverrides {
            api_url: env::api_url(),
            api_key: env::api_key(),
            api_secret: env::api_secret(),
        }
    }
}

/// Longest accepted push timeout: one hour.
pub const MAX_TIMEOUT_SECS: u64 = 60 * 60;
/// Longest accepted token lifetime: one year.
pub const MAX_LIFETIME_SECS: i64 = 365 * 24 * 60 * 60;

fn invalid_value(key: &str, value: impl ToString, reason: &str) -> Error {
    Error::InvalidConfigValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Check that `value` lies in `1..=max`.
fn check_range<T>(key: &str, value: T, max: T) -> Result<T>
where
    T: PartialOrd + Default + std::fmt::Display,
{
    if value <= T::default() {
        return Err(invalid_value(key, value, "must be greater than zero"));
    }
    if value > max {
        let reason = format!("must be at most {max}");
        return Err(invalid_value(key, value, &reason));
    }
    Ok(value)
}

fn parse_in_range<T>(key: &str, value: &str, max: T) -> Result<T>
where
    T: std::str::FromStr + PartialOrd + Default + std::fmt::Display,
{
    let parsed: T = value
        .trim()
        .parse()
        .map_err(|_| invalid_value(key, value, "expected a whole number"))?;
    check_range(key, parsed, max)
}

impl Config {
    /// A fresh config with a newly generated session secret.
    pub fn generate() -> Self {
        Config {
            session: SessionSettings {
                secret: SessionTokens::generate_secret(),
                ..SessionSettings::default()
            },
            ..Config::default()
        }
    }

    /// Loads configuration from the given `.waitlist/` directory.
    pub fn load(work_dir: &Path) -> Result<Self> {
        let config = Self::read(work_dir)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse the config file without range checks, so `wl config set` can
    /// repair a hand-edited value.
    pub fn read(work_dir: &Path) -> Result<Self> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))
    }

    /// Apply the same bounds as `set` to values read from the file.
    pub fn validate(&self) -> Result<()> {
        check_range("sync.timeout_secs", self.sync.timeout_secs, MAX_TIMEOUT_SECS)?;
        check_range(
            "session.lifetime_secs",
            self.session.lifetime_secs,
            MAX_LIFETIME_SECS,
        )?;
        Ok(())
    }

    /// Saves configuration to the given `.waitlist/` directory.
    pub fn save(&self, work_dir: &Path) -> Result<()> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    /// Apply environment values on top of the file values.
    pub fn with_overrides(mut self, overrides: &EnvOverrides) -> Self {
        if let Some(url) = &overrides.api_url {
            self.sync.api_url = url.clone();
        }
        if let Some(key) = &overrides.api_key {
            self.sync.api_key = key.clone();
        }
        if let Some(secret) = &overrides.api_secret {
            self.sync.api_secret = secret.clone();
        }
        self
    }

    /// Token issuer and verifier built from `[session]`.
    pub fn session_tokens(&self) -> Result<SessionTokens> {
        if self.session.secret.trim().is_empty() {
            return Err(Error::NoSessionSecret);
        }
        let lifetime_secs = check_range(
            "session.lifetime_secs",
            self.session.lifetime_secs,
            MAX_LIFETIME_SECS,
        )?;
        let lifetime = chrono::Duration::try_seconds(lifetime_secs)
            .ok_or_else(|| invalid_value("session.lifetime_secs", lifetime_secs, "out of range"))?;
        Ok(SessionTokens::new(self.session.secret.trim()).with_lifetime(lifetime))
    }

    /// Raw value of a config key.
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "database" => self.database.clone().unwrap_or_default(),
            "sync.api_url" => self.sync.api_url.clone(),
            "sync.api_key" => self.sync.api_key.clone(),
            "sync.api_secret" => self.sync.api_secret.clone(),
            "sync.timeout_secs" => self.sync.timeout_secs.to_string(),
            "session.secret" => self.session.secret.clone(),
            "session.lifetime_secs" => self.session.lifetime_secs.to_string(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Value of a config key as it may be shown on screen.
    pub fn display_value(&self, key: &str) -> Result<String> {
        let value = self.get(key)?;
        if SECRET_KEYS.contains(&key) {
            return Ok(mask(&value).to_string());
        }
        Ok(value)
    }

    /// Set a config key from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let trimmed = value.trim().to_string();
        match key {
            "database" => {
                self.database = if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed)
                }
            }
            "sync.api_url" => {
                if !trimmed.is_empty()
                    && !trimmed.starts_with("http://")
                    && !trimmed.starts_with("https://")
                {
                    return Err(invalid_value(
                        key,
                        value,
                        "must start with http:// or https://",
                    ));
                }
                self.sync.api_url = trimmed;
            }
            "sync.api_key" => self.sync.api_key = trimmed,
            "sync.api_secret" => self.sync.api_secret = trimmed,
            "sync.timeout_secs" => {
                self.sync.timeout_secs = parse_in_range(key, value, MAX_TIMEOUT_SECS)?
            }
            "session.secret" => self.session.secret = trimmed,
            "session.lifetime_secs" => {
                self.session.lifetime_secs = parse_in_range(key, value, MAX_LIFETIME_SECS)?
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> Error {
    Error::UnknownConfigKey {
        key: key.to_string(),
        valid: KEYS.join(", "),
    }
}

impl SettingsSource for Config {
    fn sync_config(&self) -> SyncConfig {
        SyncConfig::new(&self.sync.api_url, &self.sync.api_key, &self.sync.api_secret)
            .with_timeout(Duration::from_secs(self.sync.timeout_secs))
    }
}

/// Find the .waitlist directory by walking up from the current directory
pub fn find_work_dir() -> Result<PathBuf> {
    find_work_dir_from(&std::env::current_dir()?)
}

/// Find the .waitlist directory by walking up from `start`
pub fn find_work_dir_from(start: &Path) -> Result<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let work_dir = current.join(WORK_DIR_NAME);
        if work_dir.is_dir() {
            return Ok(work_dir);
        }
        if !current.pop() {
            return Err(Error::NotInitialized);
        }
    }
}

/// Get the database path from config
pub fn get_db_path(work_dir: &Path, config: &Config) -> PathBuf {
    match &config.database {
        Some(database) => {
            let database_path = Path::new(database);
            if database_path.is_absolute() {
                database_path.to_path_buf()
            } else {
                // Relative to work_dir's parent (the project root)
                work_dir.parent().unwrap_or(work_dir).join(database)
            }
        }
        None => work_dir.join(DB_FILE_NAME),
    }
}

/// Initialize a new .waitlist directory at the given path
pub fn init_work_dir(path: &Path, config: &Config) -> Result<PathBuf> {
    let work_dir = path.join(WORK_DIR_NAME);

    if work_dir.join(CONFIG_FILE_NAME).exists() {
        return Err(Error::AlreadyInitialized(work_dir.display().to_string()));
    }

    fs::create_dir_all(&work_dir)?;
    config.save(&work_dir)?;
    write_gitignore(&work_dir)?;

    Ok(work_dir)
}

/// Write a .gitignore file to the work directory.
///
/// The database and its WAL files are always ignored, and so is
/// `config.toml` since it holds credentials.
pub fn write_gitignore(work_dir: &Path) -> Result<()> {
    let gitignore_path = work_dir.join(GITIGNORE_FILE_NAME);
    let content = "# Database\nwaitlist.db\nwaitlist.db-*\n\n# Credentials\nconfig.toml\n\n# Logs\n*.log\n";
    fs::write(&gitignore_path, content)?;
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
