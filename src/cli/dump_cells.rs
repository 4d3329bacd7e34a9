// src/cli/dump_cells.rs
use std::path::Path;

use crate::grid::database::{CellStore, DbResult, SqliteCellStore};

/// Prints every stored cell as a JSON array, ordered by id.
pub fn run(db_path: &Path) -> DbResult<()> {
    eprintln!("Opening: {}", db_path.display());

    let store = SqliteCellStore::open(db_path)?;
    let mut cells = store.load_all()?;
    cells.sort_by(|a, b| a.id.cmp(&b.id));

    println!("{}", serde_json::to_string_pretty(&cells)?);
    eprintln!("{} cell(s).", cells.len());
    Ok(())
}
