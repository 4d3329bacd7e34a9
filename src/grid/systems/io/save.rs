// src/grid/systems/io/save.rs

use bevy::prelude::*;
use bevy_tokio_tasks::TokioTasksRuntime;
use chrono::Local;
use std::sync::Arc;

use crate::grid::database::{CellStore, DbError, PutManyError};
use crate::grid::definitions::Cell;
use crate::grid::events::{
    CellsPersisted, GridDataModified, GridOperationFeedback, RequestSaveGrid,
};
use crate::grid::resources::CellWriter;
use crate::grid::session::{GridSession, SaveOutcome, SaveRequest};

/// One cell goes through `put`, anything larger through `put_many`.
fn write_cells(store: &dyn CellStore, cells: &[Cell]) -> Result<(), PutManyError> {
    match cells {
        [] => Ok(()),
        [cell] => store.put(cell).map_err(|source| PutManyError {
            failed_ids: vec![cell.id.clone()],
            source,
        }),
        _ => store.put_many(cells),
    }
}

/// Starts the background task draining the write queue and returns its handle.
pub fn spawn_cell_writer(runtime: &TokioTasksRuntime, store: Arc<dyn CellStore>) -> CellWriter {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<SaveRequest>();

    runtime.spawn_background_task(move |mut ctx| async move {
        while let Some(request) = rx.recv().await {
            let store = store.clone();
            let cells = request.cells.clone();
            let result = tokio::task::spawn_blocking(move || write_cells(store.as_ref(), &cells))
                .await
                .unwrap_or_else(|e| {
                    Err(PutManyError {
                        failed_ids: request.cells.iter().map(|c| c.id.clone()).collect(),
                        source: DbError::Unavailable(format!("write task failed: {}", e)),
                    })
                });

            ctx.run_on_main_thread(move |ctx| {
                ctx.world.send_event(CellsPersisted { request, result });
            })
            .await;
        }
        debug!("Cell writer queue closed.");
    });

    CellWriter { tx }
}

/// Queues a write. If the writer is gone the cells simply stay dirty.
pub fn dispatch_save(
    writer: &CellWriter,
    request: SaveRequest,
    feedback_writer: &mut EventWriter<GridOperationFeedback>,
) {
    let count = request.cells.len();
    match writer.enqueue(request) {
        Ok(()) => trace!("Queued {} cell(s) for saving.", count),
        Err(request) => {
            let message = format!(
                "Cell writer is not running; {} cell(s) remain unsaved.",
                request.cells.len()
            );
            error!("{}", message);
            feedback_writer.write(GridOperationFeedback {
                message,
                is_error: true,
            });
        }
    }
}

pub fn handle_save_request(
    mut events: EventReader<RequestSaveGrid>,
    session: Res<GridSession>,
    writer: Res<CellWriter>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
) {
    if events.read().last().is_none() {
        return;
    }
    match session.save_all() {
        Ok(Some(request)) => {
            info!("Saving {} dirty cell(s).", request.cells.len());
            dispatch_save(&writer, request, &mut feedback_writer);
        }
        Ok(None) => {
            feedback_writer.write(GridOperationFeedback {
                message: "Nothing to save.".to_string(),
                is_error: false,
            });
        }
        Err(e) => {
            warn!("Save rejected: {}", e);
            feedback_writer.write(GridOperationFeedback {
                message: format!("Save rejected: {}", e),
                is_error: true,
            });
        }
    }
}

pub fn handle_cells_persisted(
    mut completions: ResMut<Events<CellsPersisted>>,
    mut session: ResMut<GridSession>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
    mut data_modified_writer: EventWriter<GridDataModified>,
) {
    for completion in completions.drain() {
        match session.complete_save(&completion.request, completion.result) {
            SaveOutcome::Stale => {}
            SaveOutcome::Saved { cleared, still_dirty } => {
                debug!(
                    "Saved {} cell(s); {} cleared, {} still dirty.",
                    completion.request.cells.len(),
                    cleared,
                    still_dirty
                );
                if still_dirty == 0 {
                    feedback_writer.write(GridOperationFeedback {
                        message: format!("All changes saved at {}", Local::now().format("%H:%M:%S")),
                        is_error: false,
                    });
                }
                data_modified_writer.write(GridDataModified);
            }
            SaveOutcome::Failed(e) => {
                error!("{}", e);
                feedback_writer.write(GridOperationFeedback {
                    message: format!("{}. Press Save to retry.", e),
                    is_error: true,
                });
                data_modified_writer.write(GridDataModified);
            }
        }
    }
}

pub fn teardown_on_exit(mut exits: EventReader<AppExit>, mut session: ResMut<GridSession>) {
    if exits.read().last().is_some() {
        session.teardown();
    }
}
