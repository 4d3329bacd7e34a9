// src/grid/systems/io/load.rs

use bevy::prelude::*;
use bevy_tokio_tasks::TokioTasksRuntime;
use std::sync::Arc;
use uuid::Uuid;

use crate::grid::database::{CellStore, DbError};
use crate::grid::events::{
    GridDataModified, GridLoadCompleted, GridOperationFeedback, RequestReloadGrid,
};
use crate::grid::resources::CellStoreHandle;
use crate::grid::session::{GridSession, LoadOutcome};

/// Runs `load_all` off the main schedule and posts the result back as a
/// [`GridLoadCompleted`] event tagged with `session_id`.
pub fn spawn_grid_load(runtime: &TokioTasksRuntime, store: Arc<dyn CellStore>, session_id: Uuid) {
    runtime.spawn_background_task(move |mut ctx| async move {
        let result = tokio::task::spawn_blocking(move || store.load_all())
            .await
            .unwrap_or_else(|e| Err(DbError::Unavailable(format!("load task failed: {}", e))));

        ctx.run_on_main_thread(move |ctx| {
            ctx.world.send_event(GridLoadCompleted { session_id, result });
        })
        .await;
    });
}

pub fn handle_load_completed(
    mut completions: ResMut<Events<GridLoadCompleted>>,
    mut session: ResMut<GridSession>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
    mut data_modified_writer: EventWriter<GridDataModified>,
) {
    for completion in completions.drain() {
        match session.finish_load(completion.session_id, completion.result) {
            LoadOutcome::Stale => {}
            LoadOutcome::Merged { merged, skipped } => {
                if !skipped.is_empty() {
                    warn!(
                        "Skipped {} stored cell(s) with unrecognised ids: {:?}",
                        skipped.len(),
                        skipped
                    );
                }
                info!("Grid ready: merged {} stored cell(s).", merged);
                data_modified_writer.write(GridDataModified);
            }
            LoadOutcome::Failed(e) => {
                error!("{}", e);
                feedback_writer.write(GridOperationFeedback {
                    message: format!("{}. Starting with an empty grid.", e),
                    is_error: true,
                });
                data_modified_writer.write(GridDataModified);
            }
        }
    }
}

pub fn handle_reload_request(
    mut events: EventReader<RequestReloadGrid>,
    mut session: ResMut<GridSession>,
    store: Option<Res<CellStoreHandle>>,
    runtime: Res<TokioTasksRuntime>,
    mut data_modified_writer: EventWriter<GridDataModified>,
) {
    // Several clicks in one frame still mean one reload.
    if events.read().last().is_none() {
        return;
    }
    if session.dirty_count() > 0 {
        warn!(
            "Reloading grid with {} unsaved cell(s); their edits are discarded.",
            session.dirty_count()
        );
    }
    let Some(store) = store else {
        warn!("No cell store available; nothing to reload from.");
        return;
    };
    let session_id = session.restart();
    spawn_grid_load(&runtime, store.0.clone(), session_id);
    data_modified_writer.write(GridDataModified);
}
