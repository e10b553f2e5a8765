use super::db::Db;
use crate::libs::storage::{KeyValueStore, StorageError};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

const SCHEMA_STORAGE: &str = "CREATE TABLE IF NOT EXISTS storage (
    key TEXT NOT NULL PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);";
const SELECT_VALUE: &str = "SELECT value FROM storage WHERE key = ?1";
const UPSERT_VALUE: &str = "INSERT INTO storage (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
    ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";

/// Key-value adapter over a single SQLite table.
pub struct SqliteStore {
    pub conn: Connection,
}

impl SqliteStore {
    /// Opens the store in the default application database.
    pub fn new() -> Result<SqliteStore, StorageError> {
        let db = Db::new().map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Self::with_connection(db.conn)
    }

    pub fn open(path: &Path) -> Result<SqliteStore, StorageError> {
        let db = Db::open(path).map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Self::with_connection(db.conn)
    }

    pub fn with_connection(conn: Connection) -> Result<SqliteStore, StorageError> {
        conn.execute(SCHEMA_STORAGE, [])
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        Ok(SqliteStore { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(SELECT_VALUE, params![key], |row| row.get::<_, String>(0))
            .optional()?;

        Ok(value)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(UPSERT_VALUE, params![key, value])?;

        Ok(())
    }
}
