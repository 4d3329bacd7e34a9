// src/grid/database/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("Store is unavailable: {0}")]
    Unavailable(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Failure of a bulk write. Every id in `failed_ids` is still unpersisted; ids
/// not listed were written.
#[derive(Debug, Error)]
#[error("failed to persist {} cell(s): {source}", failed_ids.len())]
pub struct PutManyError {
    pub failed_ids: Vec<String>,
    #[source]
    pub source: DbError,
}
