//! Storage layer for the stopwatch event log.
//!
//! Persists the log using `rusqlite`. The engine in `cs-core` never touches
//! this crate: callers load a snapshot, compute, and save the replacement.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! Concurrent writers must serialize access themselves; each `save_events` call
//! replaces the log wholesale inside one transaction.
//!
//! # Schema
//!
//! Events are stored in log order, keyed by an explicit `position`. The log
//! order is authoritative; timestamps are never used to sort on load.
//!
//! Timestamps are stored as TEXT in ISO 8601 format with millisecond
//! precision (e.g., `2024-01-15T10:30:00.000Z`).

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use cs_core::{Event, EventKind, RawEvent, ValidationError};
use rusqlite::{Connection, params};
use thiserror::Error;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored row could not be turned into a valid event.
    #[error("invalid event at position {position}: {source}")]
    Validation {
        position: i64,
        #[source]
        source: ValidationError,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            -- position: zero-based index in the log
            -- type: 'start' or 'stop'
            -- time: ISO 8601 timestamp
            CREATE TABLE IF NOT EXISTS events (
                position INTEGER PRIMARY KEY,
                type TEXT NOT NULL,
                time TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Loads the full log in stored order.
    ///
    /// Fails on the first row that does not validate; a log with a bad entry
    /// is never handed to the engine.
    pub fn load_events(&self) -> Result<Vec<Event>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT position, type, time FROM events ORDER BY position ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                RawEvent {
                    kind: row.get(1)?,
                    time: row.get(2)?,
                },
            ))
        })?;

        let mut events = Vec::new();
        for row in rows {
            let (position, raw) = row?;
            let event = Event::try_from(raw)
                .map_err(|source| DbError::Validation { position, source })?;
            events.push(event);
        }
        tracing::debug!(count = events.len(), "loaded event log");
        Ok(events)
    }

    /// Replaces the stored log with `events`.
    pub fn save_events(&mut self, events: &[Event]) -> Result<(), DbError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM events", [])?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO events (position, type, time) VALUES (?, ?, ?)")?;
            for (position, event) in (0_i64..).zip(events) {
                stmt.execute(params![
                    position,
                    event.kind.as_str(),
                    format_time(event.time)
                ])?;
            }
        }
        tx.commit()?;
        tracing::debug!(count = events.len(), "saved event log");
        Ok(())
    }

    /// Appends a single event to the end of the log.
    pub fn append_event(&self, event: &Event) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO events (position, type, time)
             VALUES ((SELECT COALESCE(MAX(position) + 1, 0) FROM events), ?, ?)",
            params![event.kind.as_str(), format_time(event.time)],
        )?;
        Ok(())
    }

    /// Clears the log.
    pub fn reset(&self) -> Result<usize, DbError> {
        let removed = self.conn.execute("DELETE FROM events", [])?;
        tracing::debug!(removed, "reset event log");
        Ok(removed)
    }

    /// Number of stored events.
    pub fn event_count(&self) -> Result<usize, DbError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Time of the most recent event of the given kind, if any.
    pub fn last_event_time(&self, kind: EventKind) -> Result<Option<DateTime<Utc>>, DbError> {
        Ok(self
            .load_events()?
            .iter()
            .rev()
            .find(|e| e.kind == kind)
            .map(|e| e.time))
    }
}

fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}
