// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! wl-core: waitlist intake and CRM sync
//!
//! This crate provides the entry model, the SQLite store, intake validation,
//! the signed CRM client, and the service that ties them together. The `wl`
//! CLI is a thin layer over it.

pub mod db;
pub mod entry;
pub mod error;
pub mod intake;
pub mod normalize;
pub mod service;
pub mod session;
pub mod signature;
pub mod sync;

pub use db::{Database, EntryStore, ListQuery, SortOrder, StatusCounts};
pub use entry::{SyncOutcome, SyncStatus, ValidEntryRequest, WaitlistEntry};
pub use error::{Error, Result};
pub use intake::{IntakeValidator, RawSubmission};
pub use service::{ResyncReport, SettingsSource, SubmitResponse, WaitlistService};
pub use session::{SessionTokens, SessionVerifier, StaticToken};
pub use sync::{PushOutcome, Pusher, SyncClient, SyncConfig};
