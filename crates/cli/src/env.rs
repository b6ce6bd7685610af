// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the CLI are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Non-empty value of `name`, trimmed.
fn non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Returns the value of `WAITLIST_API_URL` if set and non-empty.
pub fn api_url() -> Option<String> {
    non_empty(vars::WAITLIST_API_URL)
}

/// Returns the value of `WAITLIST_API_KEY` if set and non-empty.
pub fn api_key() -> Option<String> {
    non_empty(vars::WAITLIST_API_KEY)
}

/// Returns the value of `WAITLIST_API_SECRET` if set and non-empty.
pub fn api_secret() -> Option<String> {
    non_empty(vars::WAITLIST_API_SECRET)
}

/// Returns the value of `WAITLIST_LOG_FILE` if set.
pub fn log_file() -> Option<PathBuf> {
    non_empty(vars::WAITLIST_LOG_FILE).map(PathBuf::from)
}

/// Returns `true` if `NO_COLOR=1`.
pub fn no_color() -> bool {
    std::env::var(vars::NO_COLOR).is_ok_and(|v| v == "1")
}

/// Returns `true` if `COLOR=1`.
pub fn force_color() -> bool {
    std::env::var(vars::COLOR).is_ok_and(|v| v == "1")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
