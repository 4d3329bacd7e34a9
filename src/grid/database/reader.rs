// src/grid/database/reader.rs

use super::error::DbResult;
use super::schema::CELLS_TABLE;
use crate::grid::definitions::Cell;
use rusqlite::Connection;

pub struct DbReader;

impl DbReader {
    /// Every persisted cell, in no particular order.
    pub fn read_all_cells(conn: &Connection) -> DbResult<Vec<Cell>> {
        let mut stmt = conn.prepare(&format!("SELECT id, value FROM \"{CELLS_TABLE}\""))?;
        let cells = stmt
            .query_map([], |row| {
                Ok(Cell {
                    id: row.get(0)?,
                    value: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(cells)
    }
}
