//! Database layer for focusflow.
//!
//! Collections are kept in a single `storage` table of the SQLite database
//! `focusflow.db`, one row per collection key, each holding the JSON text of
//! the whole collection.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use focusflow::db::kv::SqliteStore;
//! use focusflow::libs::storage::KeyValueStore;
//!
//! let mut store = SqliteStore::new()?;
//! store.save("tasks", "[]")?;
//! assert_eq!(store.load("tasks")?.as_deref(), Some("[]"));
//! # Ok::<(), focusflow::libs::storage::StorageError>(())
//! ```

/// Connection management for the application database.
pub mod db;

/// Key-value table used as a persistence adapter.
pub mod kv;
