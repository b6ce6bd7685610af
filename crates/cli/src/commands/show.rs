// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use wl_core::{EntryStore, WaitlistEntry};

use crate::cli::OutputFormat;
use crate::display::format_entry_details;
use crate::error::Result;

use super::open_context;

pub fn run(id: &str, format: OutputFormat) -> Result<()> {
    let ctx = open_context()?;
    let entry = run_impl(&ctx.db, id)?;
    match format {
        OutputFormat::Text => print!("{}", format_entry_details(&entry)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry)?),
    }
    Ok(())
}

pub(crate) fn run_impl(store: &dyn EntryStore, id: &str) -> Result<WaitlistEntry> {
    Ok(store.get(id.trim())?)
}

#[cfg(test)]
#[path = "show_tests.rs"]
mod tests;
