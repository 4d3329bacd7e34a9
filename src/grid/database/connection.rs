// src/grid/database/connection.rs

use super::error::DbResult;
use super::schema;
use rusqlite::Connection;
use std::path::Path;

pub struct DbConnection;

impl DbConnection {
    /// Opens (or creates) the cell database, enables WAL and makes sure the
    /// `cells` table exists.
    pub fn open(path: &Path) -> DbResult<Connection> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;

        // PRAGMA settings are per connection, not per database file.
        let journal_mode: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
        if journal_mode.to_uppercase() != "WAL" {
            bevy::log::warn!(
                "Failed to set WAL mode on database {:?}. Current mode: {}",
                path.file_name(),
                journal_mode
            );
        } else {
            bevy::log::debug!("WAL mode activated for database {:?}", path.file_name());
        }

        conn.execute_batch(
            "PRAGMA synchronous=NORMAL;
             PRAGMA busy_timeout=5000;",
        )?;

        schema::ensure_cells_table(&conn)?;
        Ok(conn)
    }

    /// In-memory database with the same schema; WAL does not apply here.
    pub fn open_in_memory() -> DbResult<Connection> {
        let conn = Connection::open_in_memory()?;
        schema::ensure_cells_table(&conn)?;
        Ok(conn)
    }
}
