// src/grid/database/writer.rs

use super::error::DbResult;
use super::schema::CELLS_TABLE;
use crate::grid::definitions::Cell;
use rusqlite::{params, Connection};

pub struct DbWriter;

fn upsert_sql() -> String {
    format!(
        "INSERT INTO \"{CELLS_TABLE}\" (id, value) VALUES (?1, ?2) \
         ON CONFLICT(id) DO UPDATE SET value = excluded.value"
    )
}

impl DbWriter {
    /// Upserts one cell. Writing the same id/value twice leaves the table unchanged.
    pub fn upsert_cell(conn: &Connection, cell: &Cell) -> DbResult<()> {
        conn.execute(&upsert_sql(), params![cell.id, cell.value])?;
        Ok(())
    }

    /// Upserts all cells inside one transaction; either every row lands or none.
    pub fn upsert_cells(conn: &mut Connection, cells: &[Cell]) -> DbResult<()> {
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(&upsert_sql())?;
            for cell in cells {
                stmt.execute(params![cell.id, cell.value])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}
