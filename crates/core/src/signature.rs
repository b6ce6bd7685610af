// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Request signing for outbound CRM calls.
//!
//! The signature is HMAC-SHA256 keyed by the API secret over the canonical
//! string `method || path || timestamp`, encoded as lowercase hex. The
//! receiving side recomputes it in the same order, so the canonicalization
//! must not change.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Build the canonical string that gets signed.
pub fn canonical_string(method: &str, path: &str, timestamp: &str) -> String {
    format!("{method}{path}{timestamp}")
}

fn mac_for(secret: &str, method: &str, path: &str, timestamp: &str) -> HmacSha256 {
    // HMAC accepts keys of any length, so this never falls through.
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC can take key of any size"),
    };
    mac.update(canonical_string(method, path, timestamp).as_bytes());
    mac
}

/// Compute the lowercase hex signature for a request.
pub fn sign(secret: &str, method: &str, path: &str, timestamp: &str) -> String {
    hex::encode(mac_for(secret, method, path, timestamp).finalize().into_bytes())
}

/// Check a hex signature against the request it claims to sign.
///
/// Comparison is constant-time. Malformed hex never verifies.
pub fn verify(secret: &str, method: &str, path: &str, timestamp: &str, signature: &str) -> bool {
    let Ok(bytes) = hex::decode(signature) else {
        return false;
    };
    mac_for(secret, method, path, timestamp)
        .verify_slice(&bytes)
        .is_ok()
}

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
