// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;
use wl_core::{EntryStore, ListQuery, SortOrder, SyncStatus, WaitlistEntry};

use crate::cli::{OutputFormat, PageArgs};
use crate::colors;
use crate::display::format_entry_line;
use crate::error::Result;

use super::open_context;

/// JSON output structure for the list command.
#[derive(Serialize)]
struct ListOutputJson<'a> {
    entries: &'a [WaitlistEntry],
    limit: usize,
    offset: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<SyncStatus>,
}

pub fn run(page: PageArgs, status: Option<SyncStatus>, format: OutputFormat) -> Result<()> {
    let ctx = open_context()?;
    let entries = run_impl(&ctx.db, &page, status)?;

    match format {
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("No entries");
            }
            for entry in &entries {
                println!(
                    "{}",
                    format_entry_line(entry, &colors::status(entry.sync_status))
                );
            }
        }
        OutputFormat::Json => {
            let output = ListOutputJson {
                entries: &entries,
                limit: page.limit,
                offset: page.offset,
                status,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

/// Fetch one page of entries, newest first.
pub(crate) fn run_impl(
    store: &dyn EntryStore,
    page: &PageArgs,
    status: Option<SyncStatus>,
) -> Result<Vec<WaitlistEntry>> {
    let query = ListQuery {
        limit: page.limit,
        offset: page.offset,
        order: SortOrder::NewestFirst,
        status,
    };
    Ok(store.list(&query)?)
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
