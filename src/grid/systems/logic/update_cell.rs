// src/grid/systems/logic/update_cell.rs
//! Cell update systems - apply user edits to the session and queue their writes

use bevy::prelude::*;

use crate::grid::events::{
    GridDataModified, GridOperationFeedback, UpdateCellEvent, UpdateCellsEvent,
};
use crate::grid::resources::CellWriter;
use crate::grid::session::{CellEdit, GridError, GridSession, SaveRequest};
use crate::grid::systems::io::dispatch_save;

fn commit(
    result: Result<Option<SaveRequest>, GridError>,
    writer: &CellWriter,
    feedback_writer: &mut EventWriter<GridOperationFeedback>,
    data_modified_writer: &mut EventWriter<GridDataModified>,
) {
    match result {
        Ok(request) => {
            data_modified_writer.write(GridDataModified);
            if let Some(request) = request {
                dispatch_save(writer, request, feedback_writer);
            }
        }
        Err(e) => {
            warn!("Cell update rejected: {}", e);
            feedback_writer.write(GridOperationFeedback {
                message: format!("Cell update rejected: {}", e),
                is_error: true,
            });
        }
    }
}

/// Edits are applied in arrival order, so repeated edits to one cell land in
/// the order they were made.
pub fn handle_cell_update(
    mut events: EventReader<UpdateCellEvent>,
    mut session: ResMut<GridSession>,
    writer: Res<CellWriter>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
    mut data_modified_writer: EventWriter<GridDataModified>,
) {
    for event in events.read() {
        trace!(
            "Updating cell {}{} to '{}'",
            event.column,
            event.row + 1,
            event.new_value
        );
        let result = session.apply_edit(event.row, event.column, event.new_value.clone());
        commit(result, &writer, &mut feedback_writer, &mut data_modified_writer);
    }
}

pub fn handle_cells_update(
    mut events: EventReader<UpdateCellsEvent>,
    mut session: ResMut<GridSession>,
    writer: Res<CellWriter>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
    mut data_modified_writer: EventWriter<GridDataModified>,
) {
    for event in events.read() {
        debug!("Applying batch of {} cell edit(s).", event.edits.len());
        let edits: Vec<CellEdit> = event.edits.clone();
        let result = session.apply_edits(edits);
        commit(result, &writer, &mut feedback_writer, &mut data_modified_writer);
    }
}
