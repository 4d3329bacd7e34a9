// src/media/input.rs
use bevy::prelude::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekStep {
    Back5,
    Forward5,
    Back10,
    Forward10,
}

impl SeekStep {
    pub fn seconds(self) -> f32 {
        match self {
            SeekStep::Back5 => -5.0,
            SeekStep::Forward5 => 5.0,
            SeekStep::Back10 => -10.0,
            SeekStep::Forward10 => 10.0,
        }
    }
}

/// Viewer intents, shared by the keyboard and the on-screen controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerInput {
    Close,
    Next,
    Previous,
    ToggleFullscreen,
    TogglePause,
    Seek(SeekStep),
}

/// Keyboard mapping while the viewer is open. `BrowserBack` is what the
/// platform back button arrives as.
pub fn input_for_key(key: KeyCode) -> Option<ViewerInput> {
    let input = match key {
        KeyCode::Escape | KeyCode::BrowserBack => ViewerInput::Close,
        KeyCode::ArrowRight => ViewerInput::Next,
        KeyCode::ArrowLeft => ViewerInput::Previous,
        KeyCode::KeyF => ViewerInput::ToggleFullscreen,
        KeyCode::Space => ViewerInput::TogglePause,
        KeyCode::Digit4 | KeyCode::Numpad4 => ViewerInput::Seek(SeekStep::Back5),
        KeyCode::Digit6 | KeyCode::Numpad6 => ViewerInput::Seek(SeekStep::Forward5),
        KeyCode::Digit7 | KeyCode::Numpad7 => ViewerInput::Seek(SeekStep::Back10),
        KeyCode::Digit9 | KeyCode::Numpad9 => ViewerInput::Seek(SeekStep::Forward10),
        _ => return None,
    };
    Some(input)
}
