//! SQLite persistence for activities, their emission details and the upload log.
//!
//! A connection is opened per request against the configured database file.
//! `activities` and `emission_details` are written together inside one savepoint
//! by the import pipeline (`crate::ingest`), so no activity exists without its
//! detail row.

pub mod activities;
pub mod imports;

use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS activities (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT NOT NULL,
    quantity REAL NOT NULL,
    unit TEXT NOT NULL,
    date TEXT NOT NULL,
    activity_type TEXT NOT NULL,
    co2e REAL NOT NULL,
    confidence_score REAL NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_activities_date ON activities(date);

CREATE TABLE IF NOT EXISTS emission_details (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    activity_id INTEGER NOT NULL UNIQUE REFERENCES activities(id) ON DELETE CASCADE,
    emission_factor REAL NOT NULL,
    factor_source TEXT NOT NULL,
    formula TEXT NOT NULL,
    calculation_notes TEXT NOT NULL,
    unit_applied TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS imports (
    id TEXT PRIMARY KEY,
    filename TEXT NOT NULL,
    fingerprint TEXT NOT NULL,
    processed INTEGER NOT NULL,
    skipped INTEGER NOT NULL,
    created_at TEXT NOT NULL
);
";

pub fn open(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn open_in_memory() -> Connection {
    let conn = Connection::open_in_memory().expect("in-memory database");
    conn.execute_batch("PRAGMA foreign_keys = ON;").expect("pragma");
    init_schema(&conn).expect("schema");
    conn
}
