// src/ui/elements/media_viewer.rs
use bevy::prelude::*;
use bevy_egui::egui;

use crate::media::events::ViewerInputEvent;
use crate::media::input::ViewerInput;
use crate::media::playback::PlaybackSurface;
use crate::media::session::MediaSessionState;
use crate::media::MediaKind;

fn format_playhead(seconds: f32) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

fn playhead_label(playback: &PlaybackSurface) -> String {
    let status = if playback.ended {
        "Ended"
    } else if playback.is_paused {
        "Paused"
    } else {
        "Playing"
    };
    match playback.duration_secs {
        Some(duration) => format!(
            "{} at {} / {}",
            status,
            format_playhead(playback.position_secs),
            format_playhead(duration)
        ),
        None => format!("{} at {}", status, format_playhead(playback.position_secs)),
    }
}

/// Viewer keys are read globally; a focused button would also take Space as a click.
fn control_button(ui: &mut egui::Ui, enabled: bool, label: &str, key_hint: &str) -> egui::Response {
    let response = ui
        .add_enabled(enabled, egui::Button::new(label))
        .on_hover_text(key_hint);
    if response.has_focus() {
        response.surrender_focus();
    }
    response
}

pub fn show_media_viewer(
    ctx: &egui::Context,
    snapshot: &MediaSessionState,
    playback: &PlaybackSurface,
    input_writer: &mut EventWriter<ViewerInputEvent>,
) {
    let Some(item) = snapshot.current() else {
        return;
    };
    let is_video = item.kind == MediaKind::Video;
    let last_index = snapshot.items.len().saturating_sub(1);

    egui::TopBottomPanel::top("media_viewer_controls").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let mut send = |input: ViewerInput| {
                input_writer.write(ViewerInputEvent(input));
            };
            if control_button(ui, snapshot.index > 0, "< Prev", "Left").clicked() {
                send(ViewerInput::Previous);
            }
            if is_video {
                let label = if snapshot.is_paused { "Play" } else { "Pause" };
                if control_button(ui, true, label, "Space").clicked() {
                    send(ViewerInput::TogglePause);
                }
            }
            let fullscreen_label = if snapshot.is_fullscreen {
                "Exit fullscreen"
            } else {
                "Fullscreen"
            };
            if control_button(ui, true, fullscreen_label, "F").clicked() {
                send(ViewerInput::ToggleFullscreen);
            }
            if control_button(ui, snapshot.index < last_index, "Next >", "Right").clicked() {
                send(ViewerInput::Next);
            }
            if control_button(ui, true, "Close", "Esc").clicked() {
                send(ViewerInput::Close);
            }
            ui.separator();
            if let Some(position) = snapshot.position_label() {
                ui.label(position);
            }
            ui.weak(&item.reference);
        });
    });

    egui::CentralPanel::default().show(ctx, |ui| match item.kind {
        MediaKind::Image | MediaKind::Gif => {
            ui.centered_and_justified(|ui| {
                ui.add(egui::Image::new(item.uri.as_str()).shrink_to_fit());
            });
        }
        MediaKind::Video => {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() / 3.0);
                ui.heading(&item.reference);
                ui.label(playhead_label(playback));
                ui.weak("4 / 6: seek 5s    7 / 9: seek 10s");
            });
        }
    });
}
