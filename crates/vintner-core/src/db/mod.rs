//! SQLite storage for bottles.
//!
//! Each bottle is stored as its canonical JSON record next to the schema
//! version the record was written with. Opening a database upgrades any
//! older rows once and writes them back at the current version.

use std::path::Path;

use jiff::Timestamp;
use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod bottle_queries;
pub mod migrations;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database file and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection =
            Connection::open(path).db_context("Failed to open database connection")?;
        Self::with_connection(connection)
    }

    /// A private database that lives only as long as the handle.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self> {
        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    fn now_string() -> String {
        Timestamp::now().to_string()
    }
}
