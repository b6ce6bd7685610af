// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text normalization for submitted fields.
//!
//! Everything a storefront form sends is untrusted free text. These helpers
//! reduce it to single-line plain text before validation.

use regex::Regex;
use std::sync::OnceLock;

fn tag_pattern() -> &'static Regex {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    TAGS.get_or_init(|| match Regex::new(r"<[^>]*>?") {
        Ok(re) => re,
        Err(_) => unreachable!("static pattern is valid"),
    })
}

/// Sanitize a free-text field.
///
/// Strips markup tags and control characters, collapses whitespace runs to a
/// single space, and trims both ends.
pub fn sanitize_text(text: &str) -> String {
    let without_tags = tag_pattern().replace_all(text, "");
    let mut out = String::with_capacity(without_tags.len());
    let mut pending_space = false;

    for c in without_tags.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if c.is_control() {
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    out
}

/// Sanitize an email address.
///
/// Drops every character that cannot appear in an address and lowercases the
/// rest so the (product, email) dedup key is case-insensitive.
pub fn sanitize_email(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || "!#$%&'*+-/=?^_`{|}~.@".contains(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Keep a URL only if it is an absolute http(s) URL without whitespace.
pub fn sanitize_url(text: &str) -> String {
    let trimmed = text.trim();
    let lower = trimmed.to_ascii_lowercase();
    let has_scheme = lower.starts_with("http://") || lower.starts_with("https://");
    if !has_scheme || trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return String::new();
    }
    trimmed.to_string()
}

/// Coerce a product identifier to a positive integer.
///
/// Leading whitespace and an optional sign are accepted and the leading run
/// of digits is used (`"-12"` → 12, `"12abc"` → 12). Anything unparseable,
/// zero, or beyond `i64::MAX` yields 0, which callers treat as missing.
pub fn coerce_product_id(text: &str) -> u64 {
    let trimmed = text.trim();
    let unsigned = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);
    let digits: String = unsigned.chars().take_while(|c| c.is_ascii_digit()).collect();

    match digits.parse::<u64>() {
        Ok(n) if i64::try_from(n).is_ok() => n,
        _ => 0,
    }
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
