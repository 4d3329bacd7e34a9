// src/grid/mod.rs

pub mod database;
pub mod definitions;
pub mod events;
pub mod plugin;
pub mod resources;
pub mod session;

pub(crate) mod systems;

pub use definitions::{CellId, ColumnId};
pub use plugin::GridPlugin;
pub use session::GridSession;
