// src/grid/database/test_helpers.rs
// Test utilities for database tests

#![cfg(test)]

use super::connection::DbConnection;
use rusqlite::Connection;

/// In-memory connection with the `cells` table already created.
pub fn memory_connection() -> Connection {
    DbConnection::open_in_memory().expect("open in-memory cell database")
}
