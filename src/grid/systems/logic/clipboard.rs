// src/grid/systems/logic/clipboard.rs
use bevy::prelude::*;

use crate::grid::definitions::{CellId, ColumnId, ROW_COUNT};
use crate::grid::events::{
    GridOperationFeedback, RequestCopyCell, RequestPasteCell, UpdateCellsEvent,
};
use crate::grid::resources::ClipboardBuffer;
use crate::grid::session::{CellEdit, GridSession};

/// Spreads tab/newline separated text over the grid starting at the anchor.
/// Values that would fall outside the grid are dropped; returns the edits and
/// how many values were dropped.
pub fn paste_edits(anchor_row: usize, anchor_column: ColumnId, text: &str) -> (Vec<CellEdit>, usize) {
    let mut edits = Vec::new();
    let mut dropped = 0;
    let text = text.strip_suffix('\n').unwrap_or(text);
    for (row_offset, line) in text.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        for (col_offset, value) in line.split('\t').enumerate() {
            let row = anchor_row + row_offset;
            let column = ColumnId::from_index(anchor_column.index() + col_offset);
            match column {
                Some(column) if row < ROW_COUNT => edits.push(CellEdit {
                    row,
                    column,
                    value: value.to_string(),
                }),
                _ => dropped += 1,
            }
        }
    }
    (edits, dropped)
}

pub fn handle_copy_cell(
    mut events: EventReader<RequestCopyCell>,
    session: Res<GridSession>,
    mut clipboard: ResMut<ClipboardBuffer>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
) {
    for event in events.read() {
        let Some(id) = CellId::new(event.column, event.row) else {
            feedback_writer.write(GridOperationFeedback {
                message: "Cell not found".to_string(),
                is_error: true,
            });
            continue;
        };
        clipboard.text = Some(session.grid().get(id).to_string());
        info!("Copied cell {}", id);
        feedback_writer.write(GridOperationFeedback {
            message: format!("Copied {}", id),
            is_error: false,
        });
    }
}

pub fn handle_paste_cell(
    mut events: EventReader<RequestPasteCell>,
    clipboard: Res<ClipboardBuffer>,
    mut cells_update_writer: EventWriter<UpdateCellsEvent>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
) {
    for event in events.read() {
        let Some(text) = clipboard.text.as_deref() else {
            feedback_writer.write(GridOperationFeedback {
                message: "Clipboard is empty".to_string(),
                is_error: true,
            });
            continue;
        };

        let (edits, dropped) = paste_edits(event.row, event.column, text);
        if dropped > 0 {
            warn!("Paste dropped {} value(s) outside the grid.", dropped);
            feedback_writer.write(GridOperationFeedback {
                message: format!("{} pasted value(s) did not fit in the grid", dropped),
                is_error: true,
            });
        }
        if !edits.is_empty() {
            cells_update_writer.write(UpdateCellsEvent { edits });
        }
    }
}
