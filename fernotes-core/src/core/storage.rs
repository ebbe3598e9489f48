//! Local key-value persistence backed by SQLite.
//!
//! Stands in for the browser-local storage of a single-page app: one
//! `documents` table, string keys to string values, last write wins.

use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

use crate::Result;

/// Key under which the document snapshot is stored.
pub const DOCUMENT_KEY: &str = "document";

pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Opens the store at `path`, creating the file and schema as needed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FernotesError::Database`] when the file exists but
    /// is not a SQLite database, or for any other SQLite failure.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(Self { conn })
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO documents (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    /// Fetches the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM documents WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
