// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Submission pipeline: validate, persist, then push.
//!
//! ```text
//! validate ──✗──> Rejected (no record)
//!    │
//! create ───✗──> StoreFailed (no record)
//!    │
//! pending ──push──> Skipped  (left pending)
//!                   Synced   (outcome persisted)
//!                   Errored  (outcome persisted)
//! ```
//!
//! The customer sees success as soon as the pending entry exists. The push
//! result is only recorded on the entry; a failed push, or a failure to
//! record it, never fails the submission.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::EntryStore;
use crate::entry::SyncStatus;
use crate::error::{Error, Result, MSG_SUBMITTED};
use crate::intake::{IntakeValidator, RawSubmission};
use crate::sync::{PushOutcome, Pusher, SyncConfig};

/// Supplies the CRM settings. Read once per submission or resync batch.
pub trait SettingsSource {
    fn sync_config(&self) -> SyncConfig;
}

impl SettingsSource for SyncConfig {
    fn sync_config(&self) -> SyncConfig {
        self.clone()
    }
}

/// Answer returned to the storefront for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitResponse {
    pub ok: bool,
    pub message: String,
    /// ID of the created entry, when one was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<String>,
}

impl SubmitResponse {
    fn accepted(entry_id: String) -> Self {
        SubmitResponse {
            ok: true,
            message: MSG_SUBMITTED.to_string(),
            entry_id: Some(entry_id),
        }
    }

    fn rejected(err: &Error) -> Self {
        SubmitResponse {
            ok: false,
            message: err.user_message().to_string(),
            entry_id: None,
        }
    }
}

/// Tally of a resync batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResyncReport {
    pub attempted: usize,
    pub synced: usize,
    pub errored: usize,
    pub skipped: usize,
}

impl ResyncReport {
    /// Count one push outcome.
    pub fn record(&mut self, outcome: &PushOutcome) {
        self.attempted += 1;
        match outcome {
            PushOutcome::Skipped => self.skipped += 1,
            PushOutcome::Synced { .. } => self.synced += 1,
            PushOutcome::Errored { .. } => self.errored += 1,
        }
    }

    /// Count an entry that could not be pushed at all.
    pub fn record_failure(&mut self) {
        self.attempted += 1;
        self.errored += 1;
    }
}

/// Ties the validator, the store and the pusher together.
pub struct WaitlistService<'a> {
    store: &'a dyn EntryStore,
    validator: &'a IntakeValidator<'a>,
    pusher: &'a dyn Pusher,
    settings: &'a dyn SettingsSource,
}

impl<'a> WaitlistService<'a> {
    pub fn new(
        store: &'a dyn EntryStore,
        validator: &'a IntakeValidator<'a>,
        pusher: &'a dyn Pusher,
        settings: &'a dyn SettingsSource,
    ) -> Self {
        WaitlistService {
            store,
            validator,
            pusher,
            settings,
        }
    }

    /// Handle one storefront submission.
    pub fn submit(&self, raw: &RawSubmission, security_token: &str) -> SubmitResponse {
        let id = match self.create_entry(raw, security_token) {
            Ok(id) => id,
            Err(e) => {
                if e.is_user_input() {
                    tracing::info!(error = %e, "submission rejected");
                } else {
                    tracing::error!(error = %e, "failed to store submission");
                }
                return SubmitResponse::rejected(&e);
            }
        };

        let config = self.settings.sync_config();
        if let Err(e) = self.sync_entry(&id, &config) {
            tracing::warn!(id = %id, error = %e, "post-create sync did not run");
        }

        SubmitResponse::accepted(id)
    }

    fn create_entry(&self, raw: &RawSubmission, security_token: &str) -> Result<String> {
        let request = self.validator.validate(raw, security_token)?;
        self.store.create(&request)
    }

    /// Push one stored entry and record the outcome.
    ///
    /// Errors only when the entry cannot be read; failing to record the
    /// outcome is logged and the outcome is still returned.
    fn sync_entry(&self, id: &str, config: &SyncConfig) -> Result<PushOutcome> {
        let entry = self.store.get(id)?;
        let outcome = self.pusher.push(config, &entry);

        match outcome.clone().into_sync_outcome() {
            Some(result) => {
                if let Err(e) = self.store.update_sync_outcome(id, &result) {
                    tracing::warn!(id = %id, error = %e, "failed to record sync outcome");
                }
            }
            None => tracing::debug!(id = %id, "sync skipped, entry stays pending"),
        }
        Ok(outcome)
    }

    /// Push one entry again. Entries already synced are refused so the CRM
    /// does not receive a second copy.
    pub fn resync(&self, id: &str) -> Result<PushOutcome> {
        let entry = self.store.get(id)?;
        if entry.sync_status == SyncStatus::Synced {
            return Err(Error::AlreadySynced(id.to_string()));
        }
        let config = self.settings.sync_config();
        self.sync_entry(id, &config)
    }

    /// Push every entry in `error`, plus `pending` entries created before
    /// `stale_before`, oldest first, up to `limit`.
    pub fn resync_pending(
        &self,
        stale_before: DateTime<Utc>,
        limit: usize,
    ) -> Result<ResyncReport> {
        let config = self.settings.sync_config();
        let mut report = ResyncReport::default();

        if !config.is_configured() {
            tracing::info!("sync not configured, nothing to resync");
            return Ok(report);
        }

        for entry in self.store.list_needing_sync(stale_before, limit)? {
            match self.sync_entry(&entry.id, &config) {
                Ok(outcome) => report.record(&outcome),
                Err(e) => {
                    tracing::warn!(id = %entry.id, error = %e, "resync of entry failed");
                    report.record_failure();
                }
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
