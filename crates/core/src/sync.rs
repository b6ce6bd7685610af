// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound push of waitlist entries to the external CRM.
//!
//! One call to [`Pusher::push`] is exactly one HTTP attempt. There is no
//! retry loop here; re-pushing is driven by the service's resync operation.
//! Failures come back as [`PushOutcome::Errored`] values, never as `Err`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

use crate::entry::{SyncOutcome, WaitlistEntry};
use crate::error::{Error, Result};
use crate::signature;

/// Endpoint path appended to the configured API URL. Also part of the signed string.
pub const SYNC_PATH: &str = "/api_v1/waitlist";
/// HTTP method used for the push. Also part of the signed string.
pub const SYNC_METHOD: &str = "POST";
/// Value of the payload's `source` field.
pub const PAYLOAD_SOURCE: &str = "woocommerce_waitlist";
/// Value of the payload's `notes` field.
pub const PAYLOAD_NOTES: &str = "Inscrito desde WooCommerce (Victoria Waitlist Lite)";
/// Default bound on a single push.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the CRM. Sync is disabled unless all three
/// credentials are present.
#[derive(Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub api_url: String,
    pub api_key: String,
    pub api_secret: String,
    pub timeout: Duration,
}

impl SyncConfig {
    pub fn new(api_url: &str, api_key: &str, api_secret: &str) -> Self {
        SyncConfig {
            api_url: api_url.trim().to_string(),
            api_key: api_key.trim().to_string(),
            api_secret: api_secret.trim().to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Configuration with sync turned off.
    pub fn disabled() -> Self {
        Self::new("", "", "")
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// True when URL, key and secret are all non-empty.
    pub fn is_configured(&self) -> bool {
        !self.api_url.trim().is_empty()
            && !self.api_key.trim().is_empty()
            && !self.api_secret.trim().is_empty()
    }

    /// Full endpoint URL (trailing slashes on the base are dropped).
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.api_url.trim().trim_end_matches('/'), SYNC_PATH)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::disabled()
    }
}

// Credentials must not end up in logs.
impl fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &mask(&self.api_key))
            .field("api_secret", &mask(&self.api_secret))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Mask a credential for display, keeping only whether it is set.
pub fn mask(value: &str) -> &'static str {
    if value.is_empty() {
        "<unset>"
    } else {
        "********"
    }
}

/// What happened when an entry was offered to the CRM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    /// Sync is not configured; nothing was sent.
    Skipped,
    Synced {
        remote_id: Option<String>,
        synced_at: DateTime<Utc>,
    },
    Errored {
        message: String,
    },
}

impl PushOutcome {
    /// The outcome to persist, or `None` when nothing should be written.
    pub fn into_sync_outcome(self) -> Option<SyncOutcome> {
        match self {
            PushOutcome::Skipped => None,
            PushOutcome::Synced {
                remote_id,
                synced_at,
            } => Some(SyncOutcome::Synced {
                remote_id,
                synced_at,
            }),
            PushOutcome::Errored { message } => Some(SyncOutcome::Errored { message }),
        }
    }
}

/// Pushes one entry to the CRM.
pub trait Pusher {
    fn push(&self, config: &SyncConfig, entry: &WaitlistEntry) -> PushOutcome;
}

/// JSON body sent to the CRM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncPayload {
    pub source: &'static str,
    pub product: ProductPayload,
    pub customer: CustomerPayload,
    pub notes: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductPayload {
    pub woo_id: u64,
    pub name: String,
    pub sku: String,
    pub price: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl SyncPayload {
    pub fn from_entry(entry: &WaitlistEntry) -> Self {
        SyncPayload {
            source: PAYLOAD_SOURCE,
            product: ProductPayload {
                woo_id: entry.product_id,
                name: entry.product_name.clone(),
                sku: entry.product_sku.clone(),
                price: entry.product_price.clone(),
                image_url: entry.product_image_url.clone(),
            },
            customer: CustomerPayload {
                name: entry.customer_name.clone(),
                email: entry.customer_email.clone(),
                phone: entry.customer_phone.clone(),
            },
            notes: PAYLOAD_NOTES,
        }
    }
}

/// Pull the CRM's id out of a success body. Numbers are accepted too.
fn remote_id_from(body: &Value) -> Option<String> {
    match body.pointer("/data/wishlist_id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn error_message_from(body: &Value) -> Option<String> {
    body.pointer("/error/message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Map an HTTP status and raw body to a push outcome.
pub fn outcome_from_response(status: u16, body: &str, now: DateTime<Utc>) -> PushOutcome {
    let json: Option<Value> = serde_json::from_str(body).ok();

    if (200..300).contains(&status) {
        PushOutcome::Synced {
            remote_id: json.as_ref().and_then(remote_id_from),
            synced_at: now,
        }
    } else {
        PushOutcome::Errored {
            message: json
                .as_ref()
                .and_then(error_message_from)
                .unwrap_or_else(|| format!("Error {status}")),
        }
    }
}

fn transport_error_text(err: &reqwest::Error, timeout: Duration) -> String {
    if err.is_timeout() {
        return format!(
            "request timed out after {}ms: {}",
            timeout.as_millis(),
            err
        );
    }
    let mut text = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    text
}

/// Blocking HTTP implementation of [`Pusher`].
#[derive(Debug, Clone)]
pub struct SyncClient {
    http: reqwest::blocking::Client,
}

impl SyncClient {
    pub fn new() -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("failed to build http client: {e}")))?;
        Ok(SyncClient { http })
    }

    /// Push with an explicit clock value, used for the signed timestamp and
    /// for `synced_at`.
    pub fn push_at(
        &self,
        config: &SyncConfig,
        entry: &WaitlistEntry,
        now: DateTime<Utc>,
    ) -> PushOutcome {
        if !config.is_configured() {
            tracing::debug!(id = %entry.id, "sync not configured, skipping push");
            return PushOutcome::Skipped;
        }

        let body = match serde_json::to_string(&SyncPayload::from_entry(entry)) {
            Ok(body) => body,
            Err(e) => {
                return PushOutcome::Errored {
                    message: format!("failed to encode payload: {e}"),
                }
            }
        };

        let timestamp = now.timestamp().to_string();
        let signature = signature::sign(&config.api_secret, SYNC_METHOD, SYNC_PATH, &timestamp);

        let response = self
            .http
            .post(config.endpoint())
            .timeout(config.timeout)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .header("X-API-Key", &config.api_key)
            .header("X-Signature", signature)
            .header("X-Timestamp", &timestamp)
            .body(body)
            .send();

        let outcome = match response {
            Ok(resp) => {
                let status = resp.status().as_u16();
                // An unreadable body only loses the optional id / message.
                let text = resp.text().unwrap_or_default();
                outcome_from_response(status, &text, now)
            }
            Err(e) => PushOutcome::Errored {
                message: transport_error_text(&e, config.timeout),
            },
        };

        match &outcome {
            PushOutcome::Synced { remote_id, .. } => {
                tracing::info!(id = %entry.id, remote_id = ?remote_id, "entry synced");
            }
            PushOutcome::Errored { message } => {
                tracing::warn!(id = %entry.id, error = %message, "entry sync failed");
            }
            PushOutcome::Skipped => {}
        }
        outcome
    }
}

impl Pusher for SyncClient {
    fn push(&self, config: &SyncConfig, entry: &WaitlistEntry) -> PushOutcome {
        self.push_at(config, entry, Utc::now())
    }
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
