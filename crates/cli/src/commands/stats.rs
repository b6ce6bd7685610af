// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use wl_core::{EntryStore, StatusCounts};

use crate::cli::OutputFormat;
use crate::display::format_stats;
use crate::error::Result;

use super::open_context;

pub fn run(format: OutputFormat) -> Result<()> {
    let ctx = open_context()?;
    let counts = run_impl(&ctx.db)?;
    match format {
        OutputFormat::Text => print!("{}", format_stats(&counts)),
        OutputFormat::Json => println!("{}", serde_json::to_string(&counts)?),
    }
    Ok(())
}

pub(crate) fn run_impl(store: &dyn EntryStore) -> Result<StatusCounts> {
    Ok(store.count_by_status()?)
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
