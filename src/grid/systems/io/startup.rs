// src/grid/systems/io/startup.rs

use bevy::prelude::*;
use bevy_tokio_tasks::TokioTasksRuntime;
use std::sync::Arc;

use super::load::spawn_grid_load;
use super::save::spawn_cell_writer;
use crate::grid::database::{CellStore, DbConfig, DbError, SqliteCellStore};
use crate::grid::definitions::ColumnLabels;
use crate::grid::events::GridOperationFeedback;
use crate::grid::resources::{CellStoreHandle, CellWriter};
use crate::grid::session::GridSession;
use crate::settings::AppSettings;

/// Opens the store, starts the writer task and kicks off the initial load.
///
/// If the database cannot be opened the session falls back to an in-memory
/// store, so the grid stays editable; the failure is reported to the UI.
pub fn init_grid_session(
    mut commands: Commands,
    settings: Res<AppSettings>,
    runtime: Res<TokioTasksRuntime>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
) {
    let (labels, unknown) = ColumnLabels::from_map(&settings.column_labels);
    for key in unknown {
        warn!("Ignoring label for unknown column '{}'. Columns are A..Z.", key);
    }

    let db_config = DbConfig::new(settings.database_path.clone());
    let store: Option<Arc<dyn CellStore>> = match SqliteCellStore::open(&db_config.database_path) {
        Ok(store) => {
            info!("Cell store opened at {:?}", db_config.database_path);
            Some(Arc::new(store) as Arc<dyn CellStore>)
        }
        Err(e) => {
            let message = format!(
                "Could not open cell database {:?}: {}. Edits will not survive a restart.",
                db_config.database_path, e
            );
            error!("{}", message);
            feedback_writer.write(GridOperationFeedback {
                message,
                is_error: true,
            });
            match SqliteCellStore::open_in_memory() {
                Ok(store) => Some(Arc::new(store) as Arc<dyn CellStore>),
                Err(e) => {
                    error!("In-memory fallback store failed as well: {}", e);
                    None
                }
            }
        }
    };

    let mut session = GridSession::new(settings.save_mode, labels);
    let session_id = session.session_id();

    match store {
        Some(store) => {
            debug!("Grid session {} started loading.", session_id);
            commands.insert_resource(spawn_cell_writer(&runtime, store.clone()));
            spawn_grid_load(&runtime, store.clone(), session_id);
            commands.insert_resource(CellStoreHandle(store));
        }
        None => {
            // No store at all: the grid is still usable, every write just fails
            // and leaves its cells dirty.
            let (tx, _) = tokio::sync::mpsc::unbounded_channel();
            commands.insert_resource(CellWriter { tx });
            let _ = session.finish_load(
                session_id,
                Err(DbError::Unavailable("no cell store available".into())),
            );
        }
    }
    commands.insert_resource(session);
}
