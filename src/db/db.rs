use crate::libs::data_storage::DataStorage;
use rusqlite::{Connection, Result};
use std::error::Error;
use std::path::Path;

pub const DB_FILE_NAME: &str = "focusflow.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the application database in the default data directory.
    pub fn new() -> Result<Db, Box<dyn Error>> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        Ok(Self::open(&db_file_path)?)
    }

    pub fn open(path: &Path) -> Result<Db> {
        let conn: Connection = Connection::open(path)?;

        Ok(Db { conn })
    }
}
