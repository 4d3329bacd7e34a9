// src/media/events.rs
use bevy::prelude::Event;

use super::definitions::MediaKind;
use super::input::ViewerInput;
use super::resolver::ResolvedMedia;

/// Opens the viewer on the media column. `None` uses the configured column.
#[derive(Event, Debug, Clone, Default)]
pub struct RequestShowMedia {
    pub column: Option<String>,
}

/// Posted back by the resolution task.
#[derive(Event, Debug)]
pub struct MediaItemsResolved {
    pub column: String,
    pub resolved: ResolvedMedia,
}

/// Keyboard or on-screen control input for the open viewer.
#[derive(Event, Debug, Clone, Copy)]
pub struct ViewerInputEvent(pub ViewerInput);

/// Instructions for whatever plays the current item.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum PlaybackCommand {
    Load {
        uri: String,
        kind: MediaKind,
        duration_secs: Option<f32>,
    },
    SetPaused(bool),
    SeekBy(f32),
    Stop,
}

/// The playback surface reached the end of the current video.
#[derive(Event, Debug, Clone, Copy)]
pub struct MediaEnded;
