// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core waitlist types.
//!
//! This module contains the fundamental data types: WaitlistEntry,
//! SyncStatus, SyncOutcome and ValidEntryRequest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Prefix for entry identifiers.
pub const ID_PREFIX: &str = "wl";

/// Where an entry stands with respect to the external CRM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// Created locally, not yet pushed (or sync is not configured).
    Pending,
    /// Accepted by the CRM.
    Synced,
    /// Last push attempt failed.
    Error,
}

impl SyncStatus {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Pending => "pending",
            SyncStatus::Synced => "synced",
            SyncStatus::Error => "error",
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SyncStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(SyncStatus::Pending),
            "synced" => Ok(SyncStatus::Synced),
            "error" => Ok(SyncStatus::Error),
            _ => Err(Error::InvalidSyncStatus(s.to_string())),
        }
    }
}

/// A persisted result of one sync attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The CRM accepted the entry.
    Synced {
        remote_id: Option<String>,
        synced_at: DateTime<Utc>,
    },
    /// The attempt failed; `message` is recorded for operators.
    Errored { message: String },
}

impl SyncOutcome {
    /// The status this outcome moves an entry to.
    pub fn status(&self) -> SyncStatus {
        match self {
            SyncOutcome::Synced { .. } => SyncStatus::Synced,
            SyncOutcome::Errored { .. } => SyncStatus::Error,
        }
    }
}

/// A submission that passed intake validation, ready to persist.
///
/// All text is already normalized and the email is lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidEntryRequest {
    pub product_id: u64,
    pub product_name: String,
    pub product_sku: String,
    pub product_price: String,
    pub product_image_url: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
}

/// One customer's waitlist request for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub id: String,
    pub product_id: u64,
    pub product_name: String,
    pub product_sku: String,
    pub product_price: String,
    pub product_image_url: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub created_at: DateTime<Utc>,
    pub sync_status: SyncStatus,
    pub synced_at: Option<DateTime<Utc>>,
    pub sync_error: Option<String>,
    pub remote_id: Option<String>,
    /// Number of sync outcomes recorded for this entry.
    pub sync_attempts: u32,
    pub last_attempt_at: Option<DateTime<Utc>>,
}

impl WaitlistEntry {
    /// Build a fresh pending entry from a validated request.
    pub fn from_request(id: String, req: &ValidEntryRequest, created_at: DateTime<Utc>) -> Self {
        WaitlistEntry {
            id,
            product_id: req.product_id,
            product_name: req.product_name.clone(),
            product_sku: req.product_sku.clone(),
            product_price: req.product_price.clone(),
            product_image_url: req.product_image_url.clone(),
            customer_name: req.customer_name.clone(),
            customer_email: req.customer_email.clone(),
            customer_phone: req.customer_phone.clone(),
            created_at,
            sync_status: SyncStatus::Pending,
            synced_at: None,
            sync_error: None,
            remote_id: None,
            sync_attempts: 0,
            last_attempt_at: None,
        }
    }
}

/// Generate an entry ID from the dedup key and creation time.
/// Format: `wl-{hash}` where hash is the first 8 hex chars of
/// SHA256(product_id + email + timestamp).
pub fn generate_id(product_id: u64, email: &str, created_at: &DateTime<Utc>) -> String {
    let input = format!("{}{}{}", product_id, email, created_at.to_rfc3339());
    let hash = Sha256::digest(input.as_bytes());
    format!("{}-{}", ID_PREFIX, hex::encode(&hash[..4]))
}

/// Generate a unique ID, handling collisions by appending an incrementing suffix.
pub fn generate_unique_id<F>(
    product_id: u64,
    email: &str,
    created_at: &DateTime<Utc>,
    exists: F,
) -> Result<String>
where
    F: Fn(&str) -> Result<bool>,
{
    let base_id = generate_id(product_id, email, created_at);

    if !exists(&base_id)? {
        return Ok(base_id);
    }

    let mut suffix = 2;
    loop {
        let id = format!("{}-{}", base_id, suffix);
        if !exists(&id)? {
            return Ok(id);
        }
        suffix += 1;
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
