// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{Duration, Utc};
use wl_core::{
    EntryStore, IntakeValidator, Pusher, ResyncReport, SettingsSource, SyncClient,
    WaitlistService,
};

use crate::config::Config;
use crate::display::format_resync_report;
use crate::error::{Error, Result};

use super::open_context;

pub fn run(id: Option<String>, stale_mins: u32, limit: usize) -> Result<()> {
    let ctx = open_context()?;
    let client = SyncClient::new()?;
    let report = run_impl(&ctx.db, &ctx.config, &client, id.as_deref(), stale_mins, limit)?;

    println!("{}", format_resync_report(&report));
    if report.skipped > 0 {
        println!("Sync is not configured; skipped entries stay pending");
    }
    if report.errored > 0 {
        return Err(Error::ResyncFailures {
            attempted: report.attempted,
            failed: report.errored,
        });
    }
    Ok(())
}

/// Push one entry, or every errored and stale pending entry, again.
pub(crate) fn run_impl(
    store: &dyn EntryStore,
    config: &Config,
    pusher: &dyn Pusher,
    id: Option<&str>,
    stale_mins: u32,
    limit: usize,
) -> Result<ResyncReport> {
    // No intake happens here; an empty token rejects everything
    let session = wl_core::StaticToken(String::new());
    let validator = IntakeValidator::new(store, &session);
    let settings: &dyn SettingsSource = config;
    let service = WaitlistService::new(store, &validator, pusher, settings);

    match id {
        Some(id) => {
            let mut report = ResyncReport::default();
            report.record(&service.resync(id.trim())?);
            Ok(report)
        }
        None => {
            let stale_before = Utc::now() - Duration::minutes(i64::from(stale_mins));
            Ok(service.resync_pending(stale_before, limit)?)
        }
    }
}

#[cfg(test)]
#[path = "resync_tests.rs"]
mod tests;
