// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for wl-core operations.

use thiserror::Error;

/// Confirmation shown to the customer once an entry is durably created.
pub const MSG_SUBMITTED: &str = "¡Listo! Te avisaremos cuando esté disponible.";
/// Shown when the anti-forgery token is missing, wrong, or expired.
pub const MSG_INVALID_SESSION: &str = "Sesión expirada. Recarga la página.";
/// Shown when a required field is empty after normalization.
pub const MSG_MISSING_FIELD: &str = "Todos los campos son requeridos.";
/// Shown when the email fails syntax validation.
pub const MSG_INVALID_EMAIL: &str = "Email inválido.";
/// Shown when the customer is already on the waitlist for the product.
pub const MSG_DUPLICATE_ENTRY: &str = "Ya estás inscrito en la lista de espera para este producto.";
/// Shown for any infrastructure failure while saving.
pub const MSG_STORE_ERROR: &str = "Error al guardar. Intenta de nuevo.";

/// All possible errors that can occur in wl-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid or expired session token")]
    InvalidSession,

    #[error("required field is empty: {0}")]
    MissingField(&'static str),

    #[error("invalid email: '{0}'")]
    InvalidEmail(String),

    #[error("entry already exists for product {product_id} and {email}")]
    DuplicateEntry { product_id: u64, email: String },

    #[error("entry not found: {0}")]
    EntryNotFound(String),

    #[error("entry {0} is already synced")]
    AlreadySynced(String),

    #[error("invalid sync status: '{0}'\n  hint: valid statuses are: pending, synced, error")]
    InvalidSyncStatus(String),

    #[error("store unavailable: {0}")]
    Store(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

impl Error {
    /// True for errors caused by what the customer submitted, as opposed to
    /// infrastructure failures.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Error::InvalidSession
                | Error::MissingField(_)
                | Error::InvalidEmail(_)
                | Error::DuplicateEntry { .. }
        )
    }

    /// The customer-facing message for this error.
    ///
    /// Infrastructure errors all collapse into the generic retry prompt so no
    /// internal detail leaks to the storefront.
    pub fn user_message(&self) -> &'static str {
        match self {
            Error::InvalidSession => MSG_INVALID_SESSION,
            Error::MissingField(_) => MSG_MISSING_FIELD,
            Error::InvalidEmail(_) => MSG_INVALID_EMAIL,
            Error::DuplicateEntry { .. } => MSG_DUPLICATE_ENTRY,
            _ => MSG_STORE_ERROR,
        }
    }
}

/// A specialized Result type for wl-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
