// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed entry store.
//!
//! The [`EntryStore`] trait is the persistence seam the service depends on;
//! [`Database`] is its SQLite implementation. Dedup is enforced twice: the
//! intake validator does a read check, and the `UNIQUE (product_id,
//! customer_email)` index makes the final insert atomic against concurrent
//! writers.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;
use std::path::Path;

use crate::entry::{generate_unique_id, SyncOutcome, SyncStatus, ValidEntryRequest, WaitlistEntry};
use crate::error::{Error, Result};

/// SQL schema for the waitlist database.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS entries (
    id TEXT PRIMARY KEY,
    product_id INTEGER NOT NULL CHECK (product_id > 0),
    product_name TEXT NOT NULL DEFAULT '',
    product_sku TEXT NOT NULL DEFAULT '',
    product_price TEXT NOT NULL DEFAULT '',
    product_image_url TEXT NOT NULL DEFAULT '',
    customer_name TEXT NOT NULL,
    customer_email TEXT NOT NULL,
    customer_phone TEXT NOT NULL,
    created_at TEXT NOT NULL,
    sync_status TEXT NOT NULL DEFAULT 'pending'
        CHECK (sync_status IN ('pending', 'synced', 'error')),
    synced_at TEXT,
    sync_error TEXT,
    remote_id TEXT,
    sync_attempts INTEGER NOT NULL DEFAULT 0,
    last_attempt_at TEXT,
    UNIQUE (product_id, customer_email)
);

CREATE INDEX IF NOT EXISTS idx_entries_created ON entries(created_at);
CREATE INDEX IF NOT EXISTS idx_entries_status ON entries(sync_status);
"#;

const ENTRY_COLUMNS: &str = "id, product_id, product_name, product_sku, product_price,
    product_image_url, customer_name, customer_email, customer_phone, created_at,
    sync_status, synced_at, sync_error, remote_id, sync_attempts, last_attempt_at";

/// Ordering for [`EntryStore::list`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Most recently created first.
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Paging and filtering for [`EntryStore::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: usize,
    pub offset: usize,
    pub order: SortOrder,
    /// Restrict to one sync status.
    pub status: Option<SyncStatus>,
}

impl Default for ListQuery {
    fn default() -> Self {
        ListQuery {
            limit: 10,
            offset: 0,
            order: SortOrder::NewestFirst,
            status: None,
        }
    }
}

/// Number of entries in each sync status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: u64,
    pub synced: u64,
    pub error: u64,
}

impl StatusCounts {
    pub fn total(&self) -> u64 {
        self.pending + self.synced + self.error
    }
}

/// Durable storage for waitlist entries.
pub trait EntryStore {
    /// Exact lookup by product and (lowercased) email.
    fn find_by_product_and_email(&self, product_id: u64, email: &str)
        -> Result<Option<WaitlistEntry>>;

    /// Persist a new pending entry and return its ID.
    ///
    /// A concurrent insert of the same (product, email) pair surfaces as
    /// [`Error::DuplicateEntry`].
    fn create(&self, request: &ValidEntryRequest) -> Result<String>;

    /// Record the result of a sync attempt. Immutable fields are never touched.
    fn update_sync_outcome(&self, id: &str, outcome: &SyncOutcome) -> Result<()>;

    /// Read-only enumeration ordered by creation time.
    fn list(&self, query: &ListQuery) -> Result<Vec<WaitlistEntry>>;

    /// Fetch one entry by ID.
    fn get(&self, id: &str) -> Result<WaitlistEntry>;

    /// Entries in `error`, plus entries still `pending` that were created
    /// before `stale_before`. Oldest first.
    fn list_needing_sync(
        &self,
        stale_before: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<WaitlistEntry>>;

    fn count_by_status(&self) -> Result<StatusCounts>;
}

/// Fixed-width UTC timestamps so text ordering matches time ordering.
fn fmt_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            corrupted(format!(
                "invalid timestamp '{value}' in column '{column}'"
            ))
        })
}

fn parse_timestamp_opt(
    value: Option<String>,
    column: &str,
) -> std::result::Result<Option<DateTime<Utc>>, rusqlite::Error> {
    value.map(|v| parse_timestamp(&v, column)).transpose()
}

fn corrupted(message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(Error::CorruptedData(message)),
    )
}

fn product_id_to_sql(product_id: u64) -> Result<i64> {
    i64::try_from(product_id)
        .map_err(|_| Error::Store(format!("product id {product_id} out of range")))
}

fn row_to_entry(row: &Row<'_>) -> std::result::Result<WaitlistEntry, rusqlite::Error> {
    let product_id: i64 = row.get(1)?;
    let created_str: String = row.get(9)?;
    let status_str: String = row.get(10)?;
    let attempts: i64 = row.get(14)?;

    Ok(WaitlistEntry {
        id: row.get(0)?,
        product_id: u64::try_from(product_id)
            .map_err(|_| corrupted(format!("invalid product_id {product_id}")))?,
        product_name: row.get(2)?,
        product_sku: row.get(3)?,
        product_price: row.get(4)?,
        product_image_url: row.get(5)?,
        customer_name: row.get(6)?,
        customer_email: row.get(7)?,
        customer_phone: row.get(8)?,
        created_at: parse_timestamp(&created_str, "created_at")?,
        sync_status: status_str
            .parse()
            .map_err(|_| corrupted(format!("invalid sync_status '{status_str}'")))?,
        synced_at: parse_timestamp_opt(row.get(11)?, "synced_at")?,
        sync_error: row.get(12)?,
        remote_id: row.get(13)?,
        sync_attempts: u32::try_from(attempts).unwrap_or(u32::MAX),
        last_attempt_at: parse_timestamp_opt(row.get(15)?, "last_attempt_at")?,
    })
}

/// Detect a SQLite unique violation on an index covering `column`.
fn is_unique_violation(err: &rusqlite::Error, column: &str) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, msg) => {
            e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                && msg.as_deref().is_some_and(|m| m.contains(column))
        }
        _ => false,
    }
}

/// Create the schema on a database connection. Safe to run repeatedly.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// SQLite database connection with waitlist operations.
///
/// A connection is not shared between threads; each request opens its own
/// and SQLite serializes the writers.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // WAL mode lets readers proceed while a submission is writing
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Check if an entry ID is taken.
    pub fn entry_exists(&self, id: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM entries WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn query_entries(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<WaitlistEntry>> {
        let mut stmt = self.conn.prepare(sql)?;
        let entries = stmt
            .query_map(params, row_to_entry)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}

impl EntryStore for Database {
    fn find_by_product_and_email(
        &self,
        product_id: u64,
        email: &str,
    ) -> Result<Option<WaitlistEntry>> {
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM entries WHERE product_id = ?1 AND customer_email = ?2"
        );
        let entry = self
            .conn
            .query_row(
                &sql,
                params![product_id_to_sql(product_id)?, email.to_lowercase()],
                row_to_entry,
            )
            .optional()?;
        Ok(entry)
    }

    fn create(&self, request: &ValidEntryRequest) -> Result<String> {
        let created_at = Utc::now();
        let email = request.customer_email.to_lowercase();
        let id = generate_unique_id(request.product_id, &email, &created_at, |candidate| {
            self.entry_exists(candidate)
        })?;

        let inserted = self.conn.execute(
            "INSERT INTO entries (id, product_id, product_name, product_sku, product_price,
             product_image_url, customer_name, customer_email, customer_phone, created_at,
             sync_status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                id,
                product_id_to_sql(request.product_id)?,
                request.product_name,
                request.product_sku,
                request.product_price,
                request.product_image_url,
                request.customer_name,
                email,
                request.customer_phone,
                fmt_ts(&created_at),
                SyncStatus::Pending.as_str(),
            ],
        );

        match inserted {
            Ok(_) => {
                tracing::info!(id = %id, product_id = request.product_id, "waitlist entry created");
                Ok(id)
            }
            Err(e) if is_unique_violation(&e, "customer_email") => Err(Error::DuplicateEntry {
                product_id: request.product_id,
                email,
            }),
            Err(e) => Err(Error::Database(e)),
        }
    }

    fn update_sync_outcome(&self, id: &str, outcome: &SyncOutcome) -> Result<()> {
        let affected = match outcome {
            SyncOutcome::Synced {
                remote_id,
                synced_at,
            } => self.conn.execute(
                "UPDATE entries
                 SET sync_status = ?1, synced_at = ?2, sync_error = NULL,
                     remote_id = COALESCE(?3, remote_id),
                     sync_attempts = sync_attempts + 1, last_attempt_at = ?2
                 WHERE id = ?4",
                params![SyncStatus::Synced.as_str(), fmt_ts(synced_at), remote_id, id],
            )?,
            SyncOutcome::Errored { message } => self.conn.execute(
                "UPDATE entries
                 SET sync_status = ?1, sync_error = ?2,
                     sync_attempts = sync_attempts + 1, last_attempt_at = ?3
                 WHERE id = ?4",
                params![
                    SyncStatus::Error.as_str(),
                    message,
                    fmt_ts(&Utc::now()),
                    id
                ],
            )?,
        };

        if affected == 0 {
            return Err(Error::EntryNotFound(id.to_string()));
        }
        Ok(())
    }

    fn list(&self, query: &ListQuery) -> Result<Vec<WaitlistEntry>> {
        let order = match query.order {
            SortOrder::NewestFirst => "created_at DESC, rowid DESC",
            SortOrder::OldestFirst => "created_at ASC, rowid ASC",
        };
        let limit = i64::try_from(query.limit).unwrap_or(i64::MAX);
        let offset = i64::try_from(query.offset).unwrap_or(i64::MAX);

        match query.status {
            Some(status) => self.query_entries(
                &format!(
                    "SELECT {ENTRY_COLUMNS} FROM entries WHERE sync_status = ?1
                     ORDER BY {order} LIMIT ?2 OFFSET ?3"
                ),
                params![status.as_str(), limit, offset],
            ),
            None => self.query_entries(
                &format!("SELECT {ENTRY_COLUMNS} FROM entries ORDER BY {order} LIMIT ?1 OFFSET ?2"),
                params![limit, offset],
            ),
        }
    }

    fn get(&self, id: &str) -> Result<WaitlistEntry> {
        let sql = format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE id = ?1");
        let entry = self
            .conn
            .query_row(&sql, params![id], row_to_entry)
            .optional()?;
        entry.ok_or_else(|| Error::EntryNotFound(id.to_string()))
    }

    fn list_needing_sync(
        &self,
        stale_before: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<WaitlistEntry>> {
        self.query_entries(
            &format!(
                "SELECT {ENTRY_COLUMNS} FROM entries
                 WHERE sync_status = 'error'
                    OR (sync_status = 'pending' AND created_at < ?1)
                 ORDER BY created_at ASC, rowid ASC
                 LIMIT ?2"
            ),
            params![fmt_ts(&stale_before), i64::try_from(limit).unwrap_or(i64::MAX)],
        )
    }

    fn count_by_status(&self) -> Result<StatusCounts> {
        let mut stmt = self
            .conn
            .prepare("SELECT sync_status, COUNT(*) FROM entries GROUP BY sync_status")?;
        let rows = stmt.query_map([], |row| {
            let status: String = row.get(0)?;
            let count: i64 = row.get(1)?;
            Ok((status, count))
        })?;

        let mut counts = StatusCounts::default();
        for row in rows {
            let (status, count) = row?;
            let count = u64::try_from(count).unwrap_or(0);
            match status.parse::<SyncStatus>()? {
                SyncStatus::Pending => counts.pending = count,
                SyncStatus::Synced => counts.synced = count,
                SyncStatus::Error => counts.error = count,
            }
        }
        Ok(counts)
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
