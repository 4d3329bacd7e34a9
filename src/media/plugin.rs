// src/media/plugin.rs
use bevy::prelude::*;

use super::events::{
    MediaEnded, MediaItemsResolved, PlaybackCommand, RequestShowMedia, ViewerInputEvent,
};
use super::playback::{drive_playback, PlaybackSurface};
use super::session::MediaSession;
use super::systems::{
    handle_media_resolved, handle_show_media_request, handle_viewer_input, init_media_resources,
    keyboard_viewer_input, reconcile_fullscreen, MediaViewerOverlay,
};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
enum MediaSystemSet {
    Observe, // Platform state reconciled into the session
    Input,   // Keyboard mapped to viewer input
    Apply,   // Session transitions and their playback effects
}

/// Media viewer session, its keyboard bindings and the playback surface.
pub struct MediaPlugin;

impl Plugin for MediaPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                MediaSystemSet::Observe,
                MediaSystemSet::Input.after(MediaSystemSet::Observe),
                MediaSystemSet::Apply.after(MediaSystemSet::Input),
            ),
        );

        app.init_resource::<MediaSession>()
            .init_resource::<PlaybackSurface>();

        app.add_event::<RequestShowMedia>()
            .add_event::<MediaItemsResolved>()
            .add_event::<ViewerInputEvent>()
            .add_event::<PlaybackCommand>()
            .add_event::<MediaEnded>();

        app.add_systems(Startup, init_media_resources);

        app.add_systems(Update, reconcile_fullscreen.in_set(MediaSystemSet::Observe));
        app.add_systems(
            Update,
            keyboard_viewer_input
                .run_if(any_with_component::<MediaViewerOverlay>)
                .in_set(MediaSystemSet::Input),
        );
        app.add_systems(
            Update,
            (
                handle_show_media_request,
                handle_media_resolved,
                handle_viewer_input,
                drive_playback,
            )
                .chain()
                .in_set(MediaSystemSet::Apply),
        );

        info!("MediaPlugin initialized.");
    }
}
