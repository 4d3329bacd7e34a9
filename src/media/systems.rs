// src/media/systems.rs
use bevy::prelude::*;
use bevy::window::{MonitorSelection, PrimaryWindow, WindowMode};
use bevy_tokio_tasks::TokioTasksRuntime;
use std::sync::Arc;

use super::definitions::MediaClassifier;
use super::events::{
    MediaEnded, MediaItemsResolved, PlaybackCommand, RequestShowMedia, ViewerInputEvent,
};
use super::input::input_for_key;
use super::playback::playback_for;
use super::resolver::{resolve_media, FsPathResolver, PathResolver, ResolvedMedia};
use super::session::{MediaSession, ViewerEffect};
use crate::grid::events::GridOperationFeedback;
use crate::grid::session::GridSession;
use crate::settings::AppSettings;

/// Resolver used for media references.
#[derive(Resource, Clone)]
pub struct MediaResolverHandle(pub Arc<dyn PathResolver>);

/// Present while the viewer is open. Viewer input systems only run while it exists.
#[derive(Component, Debug)]
pub struct MediaViewerOverlay;

pub fn init_media_resources(mut commands: Commands, settings: Res<AppSettings>) {
    commands.insert_resource(MediaClassifier::new(&settings.video_extensions));
    commands.insert_resource(MediaResolverHandle(Arc::new(FsPathResolver::new(
        settings.media_root.clone(),
    ))));
    debug!(
        "Media resolver ready (root: {:?}, column: '{}').",
        settings.media_root, settings.media_column
    );
}

/// Collects the media column and resolves it off the main thread.
pub fn handle_show_media_request(
    mut events: EventReader<RequestShowMedia>,
    grid: Res<GridSession>,
    settings: Res<AppSettings>,
    resolver: Res<MediaResolverHandle>,
    classifier: Res<MediaClassifier>,
    runtime: Res<TokioTasksRuntime>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
) {
    let Some(request) = events.read().last() else {
        return;
    };
    let column = request
        .column
        .clone()
        .unwrap_or_else(|| settings.media_column.clone());

    let references = grid.media_references(&column);
    if references.is_empty() {
        let message = if grid.labels().find(&column).is_none() {
            format!("No column labelled '{}'.", column)
        } else {
            format!("Column '{}' has no media references.", column)
        };
        info!("{}", message);
        feedback_writer.write(GridOperationFeedback {
            message,
            is_error: false,
        });
        return;
    }

    info!("Resolving {} media reference(s) from '{}'.", references.len(), column);
    let resolver = resolver.0.clone();
    let classifier = classifier.clone();
    runtime.spawn_background_task(move |mut ctx| async move {
        let resolved = tokio::task::spawn_blocking(move || {
            resolve_media(resolver.as_ref(), &classifier, &references)
        })
        .await
        .unwrap_or_else(|e| {
            error!("Media resolution task failed: {}", e);
            ResolvedMedia::default()
        });

        ctx.run_on_main_thread(move |ctx| {
            ctx.world.send_event(MediaItemsResolved { column, resolved });
        })
        .await;
    });
}

pub fn handle_media_resolved(
    mut commands: Commands,
    mut completions: ResMut<Events<MediaItemsResolved>>,
    mut session: ResMut<MediaSession>,
    overlays: Query<(), With<MediaViewerOverlay>>,
    mut playback_writer: EventWriter<PlaybackCommand>,
    mut feedback_writer: EventWriter<GridOperationFeedback>,
) {
    let mut has_overlay = !overlays.is_empty();
    for MediaItemsResolved { column, resolved } in completions.drain() {
        let skipped = resolved.failures.len();
        for failure in &resolved.failures {
            warn!("{}", failure);
        }

        let count = resolved.items.len();
        let effect = session.show(resolved.items);
        if effect != ViewerEffect::Opened {
            feedback_writer.write(GridOperationFeedback {
                message: format!("None of the media in '{}' could be found.", column),
                is_error: true,
            });
            continue;
        }

        info!("Media viewer opened on {} item(s) from '{}'.", count, column);
        if !has_overlay {
            commands.spawn((MediaViewerOverlay, Name::new("Media Viewer")));
            has_overlay = true;
        }
        if let Some(command) = playback_for(effect, &session) {
            playback_writer.write(command);
        }
        if skipped > 0 {
            feedback_writer.write(GridOperationFeedback {
                message: format!("Skipped {} unresolvable media reference(s).", skipped),
                is_error: true,
            });
        }
    }
}

pub fn keyboard_viewer_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut input_writer: EventWriter<ViewerInputEvent>,
) {
    for key in keys.get_just_pressed() {
        if let Some(input) = input_for_key(*key) {
            input_writer.write(ViewerInputEvent(input));
        }
    }
}

/// Applies natural media ends first, then viewer input. Each stream keeps its own order.
pub fn handle_viewer_input(
    mut commands: Commands,
    mut inputs: EventReader<ViewerInputEvent>,
    mut ended: EventReader<MediaEnded>,
    mut session: ResMut<MediaSession>,
    overlays: Query<Entity, With<MediaViewerOverlay>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut playback_writer: EventWriter<PlaybackCommand>,
) {
    let mut effects = Vec::new();
    for _ in ended.read() {
        effects.push(session.media_ended());
    }
    for ViewerInputEvent(input) in inputs.read() {
        effects.push(session.apply(*input));
    }

    for effect in effects {
        match effect {
            ViewerEffect::Ignored => continue,
            ViewerEffect::Closed => {
                for entity in &overlays {
                    commands.entity(entity).despawn();
                }
            }
            ViewerEffect::FullscreenRequested(fullscreen) => {
                if let Ok(mut window) = windows.single_mut() {
                    window.mode = if fullscreen {
                        WindowMode::BorderlessFullscreen(MonitorSelection::Current)
                    } else {
                        WindowMode::Windowed
                    };
                }
            }
            _ => {}
        }
        debug!("Viewer transition: {:?}", effect);
        if let Some(command) = playback_for(effect, &session) {
            playback_writer.write(command);
        }
    }
}

/// The window mode is the ground truth for the fullscreen flag.
pub fn reconcile_fullscreen(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut session: ResMut<MediaSession>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let actual = !matches!(window.mode, WindowMode::Windowed);
    if session.is_device_fullscreen() != actual && session.observe_fullscreen(actual) {
        debug!("Viewer fullscreen is now {}.", actual);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::definitions::{MediaItem, MediaKind};
    use crate::media::input::ViewerInput;
    use crate::media::playback::PlaybackSurface;
    use crate::media::session::ViewerState;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    fn item(name: &str, kind: MediaKind) -> MediaItem {
        MediaItem {
            reference: name.into(),
            uri: format!("file:///{}", name),
            kind,
            duration_secs: None,
        }
    }

    fn clip(name: &str, duration_secs: f32) -> MediaItem {
        MediaItem {
            duration_secs: Some(duration_secs),
            ..item(name, MediaKind::Video)
        }
    }

    fn viewer_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<MediaSession>()
            .init_resource::<PlaybackSurface>()
            .add_event::<ViewerInputEvent>()
            .add_event::<MediaEnded>()
            .add_event::<PlaybackCommand>()
            .add_event::<MediaItemsResolved>()
            .add_event::<GridOperationFeedback>()
            .add_systems(
                Update,
                (
                    handle_media_resolved,
                    handle_viewer_input,
                    crate::media::playback::drive_playback,
                )
                    .chain(),
            );
        app
    }

    fn overlay_count(app: &mut App) -> usize {
        app.world_mut()
            .query::<&MediaViewerOverlay>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn resolved_items_open_viewer_and_close_despawns_overlay() {
        let mut app = viewer_app();
        app.world_mut().send_event(MediaItemsResolved {
            column: "PATH".into(),
            resolved: ResolvedMedia {
                items: vec![item("x.jpg", MediaKind::Image), item("y.mp4", MediaKind::Video)],
                failures: Vec::new(),
            },
        });
        app.update();
        assert!(app.world().resource::<MediaSession>().is_open());
        assert_eq!(overlay_count(&mut app), 1);

        app.world_mut().send_event(ViewerInputEvent(ViewerInput::Next));
        app.update();
        let surface = app.world().resource::<PlaybackSurface>();
        assert_eq!(surface.uri.as_deref(), Some("file:///y.mp4"));

        app.world_mut().send_event(ViewerInputEvent(ViewerInput::Close));
        app.update();
        assert_eq!(app.world().resource::<MediaSession>().state(), ViewerState::Closed);
        assert_eq!(overlay_count(&mut app), 0);
        assert_eq!(app.world().resource::<PlaybackSurface>().uri, None);
    }

    #[test]
    fn empty_resolution_keeps_viewer_closed() {
        let mut app = viewer_app();
        app.world_mut().send_event(MediaItemsResolved {
            column: "PATH".into(),
            resolved: ResolvedMedia::default(),
        });
        app.update();
        assert!(!app.world().resource::<MediaSession>().is_open());
        assert_eq!(overlay_count(&mut app), 0);
    }

    #[test]
    fn media_end_advances_and_stops_at_last() {
        let mut app = viewer_app();
        app.world_mut()
            .resource_mut::<MediaSession>()
            .show(vec![item("a.mp4", MediaKind::Video), item("b.mp4", MediaKind::Video)]);

        app.world_mut().send_event(MediaEnded);
        app.update();
        app.world_mut().send_event(MediaEnded);
        app.update();

        let session = app.world().resource::<MediaSession>();
        assert!(session.is_open());
        assert_eq!(session.current_item().map(|i| i.reference.as_str()), Some("b.mp4"));
    }

    #[derive(Resource, Default)]
    struct EndedCount(usize);

    fn count_ended(mut ended: EventReader<MediaEnded>, mut count: ResMut<EndedCount>) {
        count.0 += ended.read().count();
    }

    #[test]
    fn videos_playing_to_their_end_advance_the_viewer() {
        let mut app = viewer_app();
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(200)))
            .init_resource::<EndedCount>()
            .add_systems(
                Update,
                count_ended.after(crate::media::playback::drive_playback),
            );
        app.world_mut().send_event(MediaItemsResolved {
            column: "PATH".into(),
            resolved: ResolvedMedia {
                items: vec![clip("a.mp4", 0.3), clip("b.mp4", 0.3)],
                failures: Vec::new(),
            },
        });

        for _ in 0..12 {
            app.update();
        }

        let session = app.world().resource::<MediaSession>();
        assert!(session.is_open());
        assert_eq!(session.current_item().map(|i| i.reference.as_str()), Some("b.mp4"));
        let surface = app.world().resource::<PlaybackSurface>();
        assert_eq!(surface.uri.as_deref(), Some("file:///b.mp4"));
        assert!(surface.ended);
        // One end per item; the last one stays put without ending again.
        assert_eq!(app.world().resource::<EndedCount>().0, 2);
    }
}
