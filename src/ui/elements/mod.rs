// src/ui/elements/mod.rs
pub mod editor;
pub mod grid_table;
pub mod media_viewer;
pub mod toolbar;
