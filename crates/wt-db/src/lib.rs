//! Storage layer for the work tracker.
//!
//! Provides persistence for events and the active-project pointer using
//! `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! The tracker runs one read/decide/write cycle per process, so a single
//! connection owned by `main` is all that is needed. Separate processes racing
//! on the same file rely on `SQLite`'s own locking; [`BUSY_TIMEOUT`] makes a
//! writer wait for the lock instead of failing immediately.
//!
//! # Schema
//!
//! ## Events
//!
//! `time` is a Unix timestamp in seconds. Rows are only ever inserted.
//! Each project's sequence is read in `(time, id)` order, which the
//! `idx_events_project_time` index serves directly, so the auto-incremented
//! `id` breaks ties between events stamped in the same second.
//!
//! ## State
//!
//! A single-row `state` table holds the active project. A missing row means
//! the default project.
//!
//! ## Legacy databases
//!
//! Databases written before projects existed have no `project` column. It is
//! added on open with a default of `'default'`, so earlier history lands in
//! the default project.

use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OptionalExtension, Row, TransactionBehavior, params};
use thiserror::Error;
use wt_core::{DEFAULT_PROJECT, Event, EventStore, EventType, NewEvent, ProjectName};

/// How long a writer waits for another process to release the database lock.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored row carries a type outside start/stop/marker.
    #[error("invalid event type for event {event_id}: {value}")]
    InvalidEventType { event_id: i64, value: String },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

const EVENT_COLUMNS: &str = "id, message, type, time, project";

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        let mut db = Self { conn };
        db.init()?;
        tracing::debug!(path = %path.display(), "opened database");
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    /// Runs under an immediate transaction so concurrent opens of the same
    /// file take turns on the write lock.
    fn init(&mut self) -> Result<(), DbError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute_batch(
            "
            -- Events table: append-only session log
            -- type: 'start', 'stop' or 'marker'
            -- time: Unix timestamp (seconds)
            CREATE TABLE IF NOT EXISTS events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                message TEXT NOT NULL DEFAULT '',
                type TEXT NOT NULL CHECK (type IN ('start', 'stop', 'marker')),
                time INTEGER NOT NULL,
                project TEXT NOT NULL DEFAULT 'default'
            );

            CREATE TABLE IF NOT EXISTS state (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                active_project TEXT NOT NULL
            );
            ",
        )?;
        migrate_project_column(&tx)?;
        tx.execute_batch(
            "CREATE INDEX IF NOT EXISTS idx_events_project_time ON events(project, time, id);",
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Appends an event and returns it with its assigned id.
    pub fn insert_event(&mut self, event: &NewEvent) -> Result<Event, DbError> {
        self.conn.execute(
            "INSERT INTO events (message, type, time, project) VALUES (?, ?, ?, ?)",
            params![
                event.message,
                event.event_type.as_str(),
                event.time,
                event.project
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        Ok(event.clone().with_id(id))
    }

    /// Returns the open start of `project`, if any.
    ///
    /// The latest start or stop in the project decides: if it is a start, no
    /// stop follows it.
    pub fn get_open_start(&self, project: &str) -> Result<Option<Event>, DbError> {
        let latest = self
            .conn
            .query_row(
                &format!(
                    "
                    SELECT {EVENT_COLUMNS}
                    FROM events
                    WHERE project = ? AND type IN ('start', 'stop')
                    ORDER BY time DESC, id DESC
                    LIMIT 1
                    "
                ),
                [project],
                EventRow::from_row,
            )
            .optional()?;
        match latest {
            Some(row) => {
                let event = row.into_event()?;
                Ok((event.event_type == EventType::Start).then_some(event))
            }
            None => Ok(None),
        }
    }

    /// Lists the events of `project` ordered by time then ID.
    pub fn list_events(&self, project: &str) -> Result<Vec<Event>, DbError> {
        let mut stmt = self.conn.prepare(&format!(
            "
            SELECT {EVENT_COLUMNS}
            FROM events
            WHERE project = ?
            ORDER BY time ASC, id ASC
            "
        ))?;
        let rows = stmt.query_map([project], EventRow::from_row)?;
        let mut events = Vec::new();
        for row in rows {
            events.push(row?.into_event()?);
        }
        Ok(events)
    }

    /// Lists every project with at least one event, plus the active project.
    pub fn list_projects(&self) -> Result<BTreeSet<String>, DbError> {
        let mut stmt = self.conn.prepare("SELECT DISTINCT project FROM events")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut projects = BTreeSet::new();
        for row in rows {
            projects.insert(row?);
        }
        projects.insert(self.get_active_project()?);
        Ok(projects)
    }

    /// Number of events stored for `project`.
    pub fn count_events(&self, project: &str) -> Result<u64, DbError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM events WHERE project = ?",
            [project],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// Returns the active project, falling back to the default project.
    pub fn get_active_project(&self) -> Result<String, DbError> {
        let active: Option<String> = self
            .conn
            .query_row("SELECT active_project FROM state WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(active.unwrap_or_else(|| DEFAULT_PROJECT.to_string()))
    }

    /// Persists `project` as the active project.
    pub fn set_active_project(&mut self, project: &ProjectName) -> Result<(), DbError> {
        self.conn.execute(
            "
            INSERT INTO state (id, active_project) VALUES (1, ?)
            ON CONFLICT(id) DO UPDATE SET active_project = excluded.active_project
            ",
            [project.as_str()],
        )?;
        Ok(())
    }

    /// Total seconds of closed start→stop pairs in `project`.
    pub fn summarize(&self, project: &str) -> Result<i64, DbError> {
        let events = self.list_events(project)?;
        Ok(wt_core::summarize_events(&events))
    }
}

/// Adds the `project` column to event tables created without one.
fn migrate_project_column(conn: &Connection) -> Result<(), DbError> {
    let has_project: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM pragma_table_info('events') WHERE name = 'project'",
        [],
        |row| row.get(0),
    )?;
    if !has_project {
        tracing::info!("adding project column to legacy events table");
        conn.execute_batch(
            "ALTER TABLE events ADD COLUMN project TEXT NOT NULL DEFAULT 'default';",
        )?;
    }
    Ok(())
}

impl EventStore for Database {
    type Error = DbError;

    fn insert_event(&mut self, event: &NewEvent) -> Result<Event, Self::Error> {
        Self::insert_event(self, event)
    }

    fn get_open_start(&self, project: &str) -> Result<Option<Event>, Self::Error> {
        Self::get_open_start(self, project)
    }

    fn get_active_project(&self) -> Result<String, Self::Error> {
        Self::get_active_project(self)
    }

    fn set_active_project(&mut self, project: &ProjectName) -> Result<(), Self::Error> {
        Self::set_active_project(self, project)
    }
}

/// An `events` row before its type has been validated.
#[derive(Debug)]
struct EventRow {
    id: i64,
    message: String,
    kind: String,
    time: i64,
    project: String,
}

impl EventRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            message: row.get(1)?,
            kind: row.get(2)?,
            time: row.get(3)?,
            project: row.get(4)?,
        })
    }

    fn into_event(self) -> Result<Event, DbError> {
        let event_type = self
            .kind
            .parse::<EventType>()
            .map_err(|_| DbError::InvalidEventType {
                event_id: self.id,
                value: self.kind.clone(),
            })?;
        Ok(Event {
            id: self.id,
            message: self.message,
            event_type,
            time: self.time,
            project: self.project,
        })
    }
}
