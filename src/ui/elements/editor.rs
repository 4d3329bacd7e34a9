// src/ui/elements/editor.rs
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use super::grid_table::show_grid_table;
use super::media_viewer::show_media_viewer;
use super::toolbar::show_toolbar;
use crate::grid::events::{
    RequestCopyCell, RequestPasteCell, RequestReloadGrid, RequestSaveGrid, UpdateCellEvent,
};
use crate::grid::resources::ClipboardBuffer;
use crate::grid::GridSession;
use crate::media::events::{RequestShowMedia, ViewerInputEvent};
use crate::media::playback::PlaybackSurface;
use crate::media::MediaSession;
use crate::settings::AppSettings;
use crate::ui::state::EditorWindowState;
use crate::ui::UiFeedbackState;

#[allow(clippy::too_many_arguments)]
pub fn media_grid_editor_ui(
    mut contexts: EguiContexts,
    mut state: ResMut<EditorWindowState>,
    session: Res<GridSession>,
    media: Res<MediaSession>,
    playback: Res<PlaybackSurface>,
    clipboard: Res<ClipboardBuffer>,
    settings: Res<AppSettings>,
    ui_feedback: Res<UiFeedbackState>,
    mut cell_update_writer: EventWriter<UpdateCellEvent>,
    mut copy_writer: EventWriter<RequestCopyCell>,
    mut paste_writer: EventWriter<RequestPasteCell>,
    mut save_writer: EventWriter<RequestSaveGrid>,
    mut reload_writer: EventWriter<RequestReloadGrid>,
    mut show_media_writer: EventWriter<RequestShowMedia>,
    mut viewer_input_writer: EventWriter<ViewerInputEvent>,
) {
    let ctx = contexts.ctx_mut();
    if !state.image_loaders_installed {
        egui_extras::install_image_loaders(ctx);
        state.image_loaders_installed = true;
    }

    if media.is_open() {
        show_media_viewer(ctx, &media.snapshot(), &playback, &mut viewer_input_writer);
        return;
    }

    egui::TopBottomPanel::top("media_grid_toolbar").show(ctx, |ui| {
        show_toolbar(
            ui,
            &state,
            &session,
            &ui_feedback,
            &settings.media_column,
            &mut save_writer,
            &mut reload_writer,
            &mut show_media_writer,
        );
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        if !session.is_ready() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading cells...");
            });
            return;
        }
        show_grid_table(
            ui,
            &mut state,
            &session,
            &clipboard,
            &mut cell_update_writer,
            &mut copy_writer,
            &mut paste_writer,
        );
    });
}
