// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Anti-forgery token checks for inbound submissions.
//!
//! The web layer hands each visitor a token when it renders the form and the
//! token comes back with the submission. The intake validator only asks a
//! [`SessionVerifier`] whether the token is acceptable.
//!
//! [`SessionTokens`] is a self-contained implementation: a token is
//! `{issued_at}.{hmac}` where the HMAC binds the issue time to a server
//! secret, so tokens expire without any server-side storage.

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;

use crate::signature;

/// Decides whether a submitted anti-forgery token is acceptable.
pub trait SessionVerifier {
    fn verify(&self, token: &str) -> bool;
}

/// Accepts exactly one token. Useful when the web layer stores the expected
/// token in its own session.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl SessionVerifier for StaticToken {
    fn verify(&self, token: &str) -> bool {
        !self.0.is_empty() && self.0 == token
    }
}

/// Action name mixed into every token so they cannot be replayed as
/// signatures for anything else.
const TOKEN_ACTION: &str = "waitlist_submit";

/// Time-limited signed tokens.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    secret: String,
    lifetime: Duration,
}

impl SessionTokens {
    /// Default validity window for an issued token.
    pub const DEFAULT_LIFETIME_SECS: i64 = 24 * 60 * 60;

    pub fn new(secret: impl Into<String>) -> Self {
        SessionTokens {
            secret: secret.into(),
            lifetime: Duration::seconds(Self::DEFAULT_LIFETIME_SECS),
        }
    }

    /// A fresh random secret suitable for [`SessionTokens::new`], as 64 hex chars.
    pub fn generate_secret() -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Sets the token lifetime.
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Issue a token stamped with the current time.
    pub fn issue(&self) -> String {
        self.issue_at(Utc::now())
    }

    /// Issue a token stamped with `issued_at`.
    pub fn issue_at(&self, issued_at: DateTime<Utc>) -> String {
        let ts = issued_at.timestamp().to_string();
        let mac = signature::sign(&self.secret, TOKEN_ACTION, "", &ts);
        format!("{ts}.{mac}")
    }

    /// Check a token against the clock value `now`.
    ///
    /// Tokens from the future (beyond a minute of skew) are rejected as well
    /// as expired ones.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        if self.secret.is_empty() {
            return false;
        }
        let Some((ts, mac)) = token.split_once('.') else {
            return false;
        };
        let Ok(issued) = ts.parse::<i64>() else {
            return false;
        };
        if !signature::verify(&self.secret, TOKEN_ACTION, "", ts, mac) {
            return false;
        }

        let age = now.timestamp() - issued;
        age >= -60 && age <= self.lifetime.num_seconds()
    }
}

impl SessionVerifier for SessionTokens {
    fn verify(&self, token: &str) -> bool {
        self.verify_at(token, Utc::now())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
