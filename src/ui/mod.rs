// src/ui/mod.rs
use bevy::prelude::*;
use bevy_egui::EguiContextPass;

pub mod elements;
pub mod state;
pub mod systems;

use elements::editor::media_grid_editor_ui;
use state::EditorWindowState;
use systems::{handle_save_shortcut, handle_ui_feedback};

#[derive(Resource, Default, Debug, Clone)]
pub struct UiFeedbackState {
    pub last_message: String,
    pub is_error: bool,
}

/// Grid table, toolbar and the media viewer overlay.
pub struct EditorUiPlugin;

impl Plugin for EditorUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiFeedbackState>()
            .init_resource::<EditorWindowState>()
            .add_systems(Update, (handle_ui_feedback, handle_save_shortcut))
            .add_systems(EguiContextPass, media_grid_editor_ui);

        info!("EditorUiPlugin initialized.");
    }
}
