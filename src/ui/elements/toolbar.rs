// src/ui/elements/toolbar.rs
use bevy::prelude::*;
use bevy_egui::egui;

use crate::grid::events::{RequestReloadGrid, RequestSaveGrid};
use crate::grid::session::{GridPhase, SaveMode};
use crate::grid::GridSession;
use crate::media::events::RequestShowMedia;
use crate::ui::state::EditorWindowState;
use crate::ui::UiFeedbackState;

#[allow(clippy::too_many_arguments)]
pub fn show_toolbar(
    ui: &mut egui::Ui,
    state: &EditorWindowState,
    session: &GridSession,
    ui_feedback: &UiFeedbackState,
    media_column: &str,
    save_writer: &mut EventWriter<RequestSaveGrid>,
    reload_writer: &mut EventWriter<RequestReloadGrid>,
    show_media_writer: &mut EventWriter<RequestShowMedia>,
) {
    let ready = session.phase() == GridPhase::Ready;
    let dirty = session.dirty_count();

    ui.horizontal(|ui| {
        let save_label = match session.save_mode() {
            SaveMode::Immediate => "Save",
            SaveMode::Manual => "Save (Ctrl+S)",
        };
        if ui
            .add_enabled(ready && dirty > 0, egui::Button::new(save_label))
            .clicked()
        {
            save_writer.write(RequestSaveGrid);
        }
        if ui
            .add_enabled(ready, egui::Button::new("Reload"))
            .on_hover_text("Discard the in-memory grid and load it again from disk")
            .clicked()
        {
            reload_writer.write(RequestReloadGrid);
        }
        ui.separator();
        if ui
            .add_enabled(ready, egui::Button::new(format!("Show media ({})", media_column)))
            .clicked()
        {
            show_media_writer.write(RequestShowMedia::default());
        }
        ui.separator();

        let selection = state.selection_label();
        if state.selected.is_some() {
            ui.label(selection);
        } else {
            ui.weak(selection);
        }
        ui.separator();

        if dirty > 0 {
            ui.label(format!("{} unsaved", dirty));
        } else if ready {
            ui.weak("All saved");
        }

        if !ui_feedback.last_message.is_empty() {
            ui.separator();
            let text_color = if ui_feedback.is_error {
                egui::Color32::RED
            } else {
                ui.style().visuals.text_color()
            };
            ui.colored_label(text_color, &ui_feedback.last_message);
        }
    });
}
