// src/grid/systems/io/mod.rs
//! Store I/O: startup, load completion, writes and their completions.

pub mod load;
pub mod save;
pub mod startup;

pub use load::{handle_load_completed, handle_reload_request, spawn_grid_load};
pub use save::{dispatch_save, handle_cells_persisted, handle_save_request, teardown_on_exit};
pub use startup::init_grid_session;
