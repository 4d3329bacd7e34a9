// src/grid/database/schema.rs

use super::error::DbResult;
use rusqlite::Connection;

pub const CELLS_TABLE: &str = "cells";

pub fn ensure_cells_table(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS \"{CELLS_TABLE}\" (
            id    TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        );"
    ))?;
    Ok(())
}
