// src/ui/elements/grid_table.rs
use bevy::prelude::*;
use bevy_egui::egui;
use egui_extras::{Column, TableBuilder};

use crate::grid::definitions::{COLUMN_COUNT, ROW_COUNT};
use crate::grid::events::{RequestCopyCell, RequestPasteCell, UpdateCellEvent};
use crate::grid::resources::ClipboardBuffer;
use crate::grid::{CellId, ColumnId, GridSession};
use crate::ui::state::EditorWindowState;

const DIRTY_TEXT_COLOR: egui::Color32 = egui::Color32::from_rgb(230, 170, 60);

pub fn show_grid_table(
    ui: &mut egui::Ui,
    state: &mut EditorWindowState,
    session: &GridSession,
    clipboard: &ClipboardBuffer,
    cell_update_writer: &mut EventWriter<UpdateCellEvent>,
    copy_writer: &mut EventWriter<RequestCopyCell>,
    paste_writer: &mut EventWriter<RequestPasteCell>,
) {
    let row_height =
        ui.text_style_height(&egui::TextStyle::Body) + ui.style().spacing.item_spacing.y * 2.0;
    let labels = session.labels();

    egui::ScrollArea::horizontal()
        .id_salt("media_grid_table_scroll_area")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::auto().at_least(32.0))
                .columns(Column::initial(110.0).at_least(40.0).clip(true), COLUMN_COUNT)
                .min_scrolled_height(0.0)
                .header(row_height, |mut header| {
                    header.col(|ui| {
                        ui.weak("#");
                    });
                    for column in ColumnId::all() {
                        header.col(|ui| {
                            let response = ui.strong(labels.get(column));
                            if labels.get(column).len() > 1 {
                                response.on_hover_text(format!("Column {}", column));
                            }
                        });
                    }
                })
                .body(|body| {
                    body.rows(row_height, ROW_COUNT, |mut row| {
                        let row_index = row.index();
                        row.col(|ui| {
                            ui.weak((row_index + 1).to_string());
                        });
                        for column in ColumnId::all() {
                            row.col(|ui| {
                                if let Some(id) = CellId::new(column, row_index) {
                                    render_cell(
                                        ui,
                                        id,
                                        state,
                                        session,
                                        clipboard,
                                        cell_update_writer,
                                        copy_writer,
                                        paste_writer,
                                    );
                                }
                            });
                        }
                    });
                });
        });
}

#[allow(clippy::too_many_arguments)]
fn render_cell(
    ui: &mut egui::Ui,
    id: CellId,
    state: &mut EditorWindowState,
    session: &GridSession,
    clipboard: &ClipboardBuffer,
    cell_update_writer: &mut EventWriter<UpdateCellEvent>,
    copy_writer: &mut EventWriter<RequestCopyCell>,
    paste_writer: &mut EventWriter<RequestPasteCell>,
) {
    let value = session.grid().get(id);
    let dirty = session.is_dirty(id);
    let mut text = state.buffer_for(id).unwrap_or(value).to_string();

    let mut edit = egui::TextEdit::singleline(&mut text).desired_width(f32::INFINITY);
    if dirty {
        edit = edit.text_color(DIRTY_TEXT_COLOR);
    }
    let response = ui.add(edit);

    if response.gained_focus() {
        state.selected = Some(id);
    }
    if response.changed() {
        state.edit_buffer = Some((id, text));
    }
    if response.lost_focus() {
        if let Some(new_value) = state.take_commit(id, value) {
            trace!("Committing edit of {}.", id);
            cell_update_writer.write(UpdateCellEvent {
                row: id.row(),
                column: id.column(),
                new_value,
            });
        }
    }

    response.context_menu(|ui| {
        if ui.button("Copy").clicked() {
            copy_writer.write(RequestCopyCell {
                row: id.row(),
                column: id.column(),
            });
            ui.close_menu();
        }
        if ui
            .add_enabled(clipboard.text.is_some(), egui::Button::new("Paste"))
            .clicked()
        {
            paste_writer.write(RequestPasteCell {
                row: id.row(),
                column: id.column(),
            });
            ui.close_menu();
        }
    });

    if dirty {
        response.on_hover_text(format!("{} is not saved yet", id));
    }
}
