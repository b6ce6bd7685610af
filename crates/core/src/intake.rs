// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Intake validation for raw storefront submissions.
//!
//! Checks run in a fixed order and stop at the first failure:
//! session token, required fields, email syntax, then the read-only dedup
//! lookup. The validator never writes to the store.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::db::EntryStore;
use crate::entry::ValidEntryRequest;
use crate::error::{Error, Result};
use crate::normalize::{coerce_product_id, sanitize_email, sanitize_text, sanitize_url};
use crate::session::SessionVerifier;

/// Form field names accepted from the storefront.
pub mod fields {
    pub const PRODUCT_ID: &str = "product_id";
    pub const PRODUCT_NAME: &str = "product_name";
    pub const PRODUCT_SKU: &str = "product_sku";
    pub const PRODUCT_PRICE: &str = "product_price";
    pub const PRODUCT_IMAGE: &str = "product_image";
    pub const CUSTOMER_NAME: &str = "customer_name";
    pub const CUSTOMER_EMAIL: &str = "customer_email";
    pub const CUSTOMER_PHONE: &str = "customer_phone";

    /// Every recognized field, in form order.
    pub const ALL: [&str; 8] = [
        PRODUCT_ID,
        PRODUCT_NAME,
        PRODUCT_SKU,
        PRODUCT_PRICE,
        PRODUCT_IMAGE,
        CUSTOMER_NAME,
        CUSTOMER_EMAIL,
        CUSTOMER_PHONE,
    ];
}

/// Maximum length of an email address (RFC 5321 path limit).
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Untrusted key/value fields exactly as the web layer received them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSubmission {
    fields: HashMap<String, String>,
}

impl RawSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.fields.insert(key.to_string(), value.to_string());
    }

    /// Field value, or empty when absent.
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawSubmission {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RawSubmission {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        // local part: dot-atom; domain: dot-separated labels, at least two
        let pattern = r"^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@([a-z0-9]([a-z0-9-]*[a-z0-9])?\.)+[a-z0-9]([a-z0-9-]*[a-z0-9])?$";
        match Regex::new(pattern) {
            Ok(re) => re,
            Err(_) => unreachable!("static pattern is valid"),
        }
    })
}

/// RFC-5322-lite syntax check on an already sanitized (lowercase) address.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() < 6 || email.len() > MAX_EMAIL_LENGTH {
        return false;
    }
    match email.rsplit_once('@') {
        Some((local, _)) if local.len() > 64 => false,
        Some(_) => email_pattern().is_match(email),
        None => false,
    }
}

/// Normalize every field of a raw submission without judging it.
pub fn normalize(raw: &RawSubmission) -> ValidEntryRequest {
    ValidEntryRequest {
        product_id: coerce_product_id(raw.get(fields::PRODUCT_ID)),
        product_name: sanitize_text(raw.get(fields::PRODUCT_NAME)),
        product_sku: sanitize_text(raw.get(fields::PRODUCT_SKU)),
        product_price: sanitize_text(raw.get(fields::PRODUCT_PRICE)),
        product_image_url: sanitize_url(raw.get(fields::PRODUCT_IMAGE)),
        customer_name: sanitize_text(raw.get(fields::CUSTOMER_NAME)),
        customer_email: sanitize_email(raw.get(fields::CUSTOMER_EMAIL)),
        customer_phone: sanitize_text(raw.get(fields::CUSTOMER_PHONE)),
    }
}

/// Validates raw submissions against the session verifier and the store.
pub struct IntakeValidator<'a> {
    store: &'a dyn EntryStore,
    session: &'a dyn SessionVerifier,
}

impl<'a> IntakeValidator<'a> {
    pub fn new(store: &'a dyn EntryStore, session: &'a dyn SessionVerifier) -> Self {
        IntakeValidator { store, session }
    }

    /// Turn a raw submission into a request ready for persistence.
    pub fn validate(&self, raw: &RawSubmission, security_token: &str) -> Result<ValidEntryRequest> {
        if !self.session.verify(security_token) {
            return Err(Error::InvalidSession);
        }

        let request = normalize(raw);

        if request.product_id == 0 {
            return Err(Error::MissingField(fields::PRODUCT_ID));
        }
        let required = [
            (fields::CUSTOMER_NAME, &request.customer_name),
            (fields::CUSTOMER_EMAIL, &request.customer_email),
            (fields::CUSTOMER_PHONE, &request.customer_phone),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.is_empty()) {
            return Err(Error::MissingField(*field));
        }

        if !is_valid_email(&request.customer_email) {
            return Err(Error::InvalidEmail(request.customer_email));
        }

        if self
            .store
            .find_by_product_and_email(request.product_id, &request.customer_email)?
            .is_some()
        {
            return Err(Error::DuplicateEntry {
                product_id: request.product_id,
                email: request.customer_email,
            });
        }

        Ok(request)
    }
}

#[cfg(test)]
#[path = "intake_tests.rs"]
mod tests;
