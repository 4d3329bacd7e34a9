// src/ui/systems.rs
use bevy::prelude::*;

use crate::grid::events::{GridOperationFeedback, RequestSaveGrid};
use crate::media::MediaSession;
use crate::ui::UiFeedbackState;

pub fn handle_ui_feedback(
    mut feedback_events: EventReader<GridOperationFeedback>,
    mut ui_feedback_state: ResMut<UiFeedbackState>,
) {
    let mut last_message = None;
    for event in feedback_events.read() {
        last_message = Some((event.message.clone(), event.is_error));
        // An error stays visible over later successes in the same frame.
        if event.is_error {
            break;
        }
    }
    if let Some((message, is_error)) = last_message {
        ui_feedback_state.last_message = message;
        ui_feedback_state.is_error = is_error;
    }
}

/// Ctrl+S saves, unless the media viewer owns the keyboard.
pub fn handle_save_shortcut(
    keys: Res<ButtonInput<KeyCode>>,
    media: Res<MediaSession>,
    mut save_writer: EventWriter<RequestSaveGrid>,
) {
    if media.is_open() {
        return;
    }
    let ctrl = keys.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]);
    if ctrl && keys.just_pressed(KeyCode::KeyS) {
        debug!("Save shortcut pressed.");
        save_writer.write(RequestSaveGrid);
    }
}
