// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the wlrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not initialized: run 'wl init' first")]
    NotInitialized,

    #[error("already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("invalid field '{0}'\n  hint: use --field key=value")]
    InvalidFieldArg(String),

    #[error("unknown field '{field}'\n  hint: valid fields are: {valid}")]
    UnknownField { field: String, valid: String },

    #[error("unknown config key '{key}'\n  hint: valid keys are: {valid}")]
    UnknownConfigKey { key: String, valid: String },

    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidConfigValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("session secret is not set\n  hint: run 'wl config set session.secret <value>'")]
    NoSessionSecret,

    #[error("submission rejected: {0}")]
    Rejected(String),

    #[error("{failed} of {attempted} entries failed to sync")]
    ResyncFailures { attempted: usize, failed: usize },

    #[error(transparent)]
    Core(#[from] wl_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

/// A specialized Result type for wlrs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
