// src/grid/systems/logic/mod.rs

pub mod clipboard;
pub mod update_cell;

pub use clipboard::{handle_copy_cell, handle_paste_cell};
pub use update_cell::{handle_cell_update, handle_cells_update};
