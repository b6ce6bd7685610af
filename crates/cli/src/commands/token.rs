// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::config::Config;
use crate::error::Result;

use super::load_config;

pub fn run() -> Result<()> {
    let (config, _) = load_config()?;
    println!("{}", run_impl(&config)?);
    Ok(())
}

/// Issue a token the storefront can embed in its form.
pub(crate) fn run_impl(config: &Config) -> Result<String> {
    Ok(config.session_tokens()?.issue())
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
