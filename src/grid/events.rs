// src/grid/events.rs
use bevy::prelude::Event;
use uuid::Uuid;

use super::database::{DbError, PutManyError};
use super::definitions::{Cell, ColumnId};
use super::session::{CellEdit, SaveRequest};

/// A committed single-cell edit from the grid widget.
#[derive(Event, Debug, Clone)]
pub struct UpdateCellEvent {
    pub row: usize,
    pub column: ColumnId,
    pub new_value: String,
}

/// A multi-cell change (paste) persisted as one batch.
#[derive(Event, Debug, Clone)]
pub struct UpdateCellsEvent {
    pub edits: Vec<CellEdit>,
}

/// Explicit "save" trigger (toolbar button, Ctrl+S).
#[derive(Event, Debug, Clone)]
pub struct RequestSaveGrid;

/// Throws the in-memory grid away and loads it again from the store.
#[derive(Event, Debug, Clone)]
pub struct RequestReloadGrid;

/// Copies the value of one cell into the clipboard buffer.
#[derive(Event, Debug, Clone)]
pub struct RequestCopyCell {
    pub row: usize,
    pub column: ColumnId,
}

/// Pastes the clipboard buffer starting at the given cell, spreading
/// tab-separated columns and newline-separated rows.
#[derive(Event, Debug, Clone)]
pub struct RequestPasteCell {
    pub row: usize,
    pub column: ColumnId,
}

/// Status line message for the UI.
#[derive(Event, Debug, Clone)]
pub struct GridOperationFeedback {
    pub message: String,
    pub is_error: bool,
}

/// Sent after the in-memory grid changed (edit, merge, save completion).
#[derive(Event, Debug, Clone)]
pub struct GridDataModified;

/// Completion of `CellStore::load_all`, posted back to the main world.
#[derive(Event, Debug)]
pub struct GridLoadCompleted {
    pub session_id: Uuid,
    pub result: Result<Vec<Cell>, DbError>,
}

/// Completion of a `put`/`put_many`, posted back to the main world.
#[derive(Event, Debug)]
pub struct CellsPersisted {
    pub request: SaveRequest,
    pub result: Result<(), PutManyError>,
}
