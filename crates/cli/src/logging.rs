// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic logging setup.
//!
//! Logs go to stderr at `warn` unless `RUST_LOG` says otherwise. When
//! `WAITLIST_LOG_FILE` is set they are appended to that file instead.

use std::fs;

use tracing_subscriber::EnvFilter;

use crate::env;

/// Default filter directive when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Later calls are no-ops.
pub fn setup_logging() {
    let log_file = env::log_file().and_then(|path| {
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });

    // A log file that cannot be opened falls back to stderr
    let _ = match log_file {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(file)
            .with_ansi(false)
            .try_init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .try_init(),
    };
}
