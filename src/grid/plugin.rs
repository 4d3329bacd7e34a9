// src/grid/plugin.rs
use bevy::prelude::*;

use super::events::{
    CellsPersisted, GridDataModified, GridLoadCompleted, GridOperationFeedback, RequestCopyCell,
    RequestPasteCell, RequestReloadGrid, RequestSaveGrid, UpdateCellEvent, UpdateCellsEvent,
};
use super::resources::ClipboardBuffer;
use super::session::GridSession;
use super::systems;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
enum GridSystemSet {
    UserInput,    // Clipboard requests that fan out into edits
    ApplyChanges, // Edits, explicit saves and reloads
    Completions,  // Results posted back by store tasks
}

/// Grid session, cell store and the systems connecting them.
pub struct GridPlugin;

impl Plugin for GridPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                GridSystemSet::UserInput,
                GridSystemSet::ApplyChanges.after(GridSystemSet::UserInput),
                GridSystemSet::Completions.after(GridSystemSet::ApplyChanges),
            ),
        );

        // Replaced by `init_grid_session` once the store is open.
        app.init_resource::<GridSession>()
            .init_resource::<ClipboardBuffer>();

        app.add_event::<UpdateCellEvent>()
            .add_event::<UpdateCellsEvent>()
            .add_event::<RequestSaveGrid>()
            .add_event::<RequestReloadGrid>()
            .add_event::<RequestCopyCell>()
            .add_event::<RequestPasteCell>()
            .add_event::<GridOperationFeedback>()
            .add_event::<GridDataModified>()
            .add_event::<GridLoadCompleted>()
            .add_event::<CellsPersisted>();

        app.add_systems(Startup, systems::io::init_grid_session);

        app.add_systems(
            Update,
            (
                systems::logic::handle_copy_cell,
                systems::logic::handle_paste_cell,
            )
                .chain()
                .in_set(GridSystemSet::UserInput),
        );
        app.add_systems(
            Update,
            (
                systems::logic::handle_cell_update,
                systems::logic::handle_cells_update,
                systems::io::handle_save_request,
                systems::io::handle_reload_request,
            )
                .chain()
                .in_set(GridSystemSet::ApplyChanges),
        );
        app.add_systems(
            Update,
            (
                systems::io::handle_load_completed,
                systems::io::handle_cells_persisted,
            )
                .chain()
                .in_set(GridSystemSet::Completions),
        );
        app.add_systems(Last, systems::io::teardown_on_exit);

        info!("GridPlugin initialized.");
    }
}
