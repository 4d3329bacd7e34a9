// src/grid/database/cell_store.rs
//! Cell-level persistence contract and its SQLite implementation.
//!
//! Calls are blocking; the grid systems run them on `spawn_blocking` so the
//! main schedule never waits on disk. The store keeps no cache of its own.

use super::connection::DbConnection;
use super::error::{DbError, DbResult, PutManyError};
use super::reader::DbReader;
use super::writer::DbWriter;
use crate::grid::definitions::Cell;
use bevy::log::{debug, warn};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

pub trait CellStore: Send + Sync + 'static {
    /// Upserts one cell by id.
    fn put(&self, cell: &Cell) -> DbResult<()>;

    /// Upserts a batch. On error, `failed_ids` lists exactly the cells that
    /// are not persisted.
    fn put_many(&self, cells: &[Cell]) -> Result<(), PutManyError>;

    /// Every persisted cell, order irrelevant.
    fn load_all(&self) -> DbResult<Vec<Cell>>;
}

pub struct SqliteCellStore {
    conn: Mutex<Connection>,
}

impl SqliteCellStore {
    pub fn open(path: &Path) -> DbResult<Self> {
        Ok(Self::from_connection(DbConnection::open(path)?))
    }

    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(DbConnection::open_in_memory()?))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| DbError::Unavailable("cell store connection lock poisoned".into()))
    }
}

impl CellStore for SqliteCellStore {
    fn put(&self, cell: &Cell) -> DbResult<()> {
        let conn = self.lock()?;
        DbWriter::upsert_cell(&conn, cell)
    }

    fn put_many(&self, cells: &[Cell]) -> Result<(), PutManyError> {
        let mut conn = self.lock().map_err(|source| PutManyError {
            failed_ids: cells.iter().map(|c| c.id.clone()).collect(),
            source,
        })?;

        let batch_err = match DbWriter::upsert_cells(&mut conn, cells) {
            Ok(()) => return Ok(()),
            Err(e) => e,
        };

        // The transaction rolled back; retry entries one at a time so a single
        // bad row does not hold the rest hostage.
        warn!(
            "Batch write of {} cell(s) failed ({}); retrying individually.",
            cells.len(),
            batch_err
        );
        let mut failed_ids = Vec::new();
        let mut last_err = batch_err;
        for cell in cells {
            if let Err(e) = DbWriter::upsert_cell(&conn, cell) {
                debug!("Retry of cell '{}' failed: {}", cell.id, e);
                failed_ids.push(cell.id.clone());
                last_err = e;
            }
        }

        if failed_ids.is_empty() {
            Ok(())
        } else {
            Err(PutManyError {
                failed_ids,
                source: last_err,
            })
        }
    }

    fn load_all(&self) -> DbResult<Vec<Cell>> {
        let conn = self.lock()?;
        DbReader::read_all_cells(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::database::test_helpers::memory_connection;

    fn cell(id: &str, value: &str) -> Cell {
        Cell {
            id: id.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn put_then_load_all() {
        let store = SqliteCellStore::from_connection(memory_connection());
        store.put(&cell("A1", "hello")).unwrap();
        store.put(&cell("Z100", "bye")).unwrap();
        let mut cells = store.load_all().unwrap();
        cells.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(cells, vec![cell("A1", "hello"), cell("Z100", "bye")]);
    }

    #[test]
    fn put_many_is_idempotent() {
        let store = SqliteCellStore::open_in_memory().unwrap();
        let batch = vec![cell("A1", "1"), cell("B2", "2")];
        store.put_many(&batch).unwrap();
        store.put_many(&batch).unwrap();
        store.put_many(&batch).unwrap();
        let mut cells = store.load_all().unwrap();
        cells.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(cells, batch);
    }

    #[test]
    fn put_many_reports_every_id_when_table_is_gone() {
        let conn = memory_connection();
        conn.execute_batch("DROP TABLE cells;").unwrap();
        let store = SqliteCellStore::from_connection(conn);
        let err = store
            .put_many(&[cell("A1", "1"), cell("A2", "2")])
            .unwrap_err();
        assert_eq!(err.failed_ids, vec!["A1".to_string(), "A2".to_string()]);
    }

    #[test]
    fn load_all_fails_without_table() {
        let conn = memory_connection();
        conn.execute_batch("DROP TABLE cells;").unwrap();
        let store = SqliteCellStore::from_connection(conn);
        assert!(store.load_all().is_err());
    }
}
