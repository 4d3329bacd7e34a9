// src/grid/database/mod.rs

pub mod cell_store;
pub mod connection;
pub mod error;
pub mod reader;
pub mod schema;
pub mod writer;

#[cfg(test)]
pub mod test_helpers;

pub use cell_store::{CellStore, SqliteCellStore};
pub use error::{DbError, DbResult, PutManyError};

use std::path::PathBuf;

const DATABASE_FILE: &str = "cells.db";

/// Where the cell database lives.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_path: PathBuf,
}

impl DbConfig {
    pub fn default_path() -> PathBuf {
        let documents = directories_next::UserDirs::new()
            .and_then(|dirs| dirs.document_dir().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));
        documents.join("MediaGrid").join(DATABASE_FILE)
    }

    pub fn new(database_path: Option<PathBuf>) -> Self {
        Self {
            database_path: database_path.unwrap_or_else(Self::default_path),
        }
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self::new(None)
    }
}
