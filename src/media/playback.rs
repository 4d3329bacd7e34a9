// src/media/playback.rs
use bevy::prelude::*;

use super::definitions::MediaKind;
use super::events::{MediaEnded, PlaybackCommand};
use super::session::{MediaSession, ViewerEffect};

/// Playhead of the current video. Images and GIFs leave it idle.
/// Without a known duration a video plays until it is navigated away from.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct PlaybackSurface {
    pub uri: Option<String>,
    pub position_secs: f32,
    pub duration_secs: Option<f32>,
    pub is_paused: bool,
    /// Set once the playhead reaches the duration.
    pub ended: bool,
}

impl PlaybackSurface {
    pub fn is_playing(&self) -> bool {
        self.uri.is_some() && !self.is_paused && !self.ended
    }

    pub fn apply(&mut self, command: &PlaybackCommand) {
        match command {
            PlaybackCommand::Load {
                uri,
                kind,
                duration_secs,
            } => {
                let is_video = *kind == MediaKind::Video;
                self.uri = is_video.then(|| uri.clone());
                self.duration_secs = duration_secs.filter(|_| is_video);
                self.position_secs = 0.0;
                self.is_paused = false;
                self.ended = false;
            }
            PlaybackCommand::SetPaused(paused) => self.is_paused = *paused,
            // Clamped here, not in the session.
            PlaybackCommand::SeekBy(offset) => {
                self.position_secs = self.clamped(self.position_secs + offset);
                if self.ended && !self.at_end() {
                    self.ended = false;
                }
            }
            PlaybackCommand::Stop => *self = Self::default(),
        }
    }

    /// Moves the playhead by `delta` seconds of wall time. Returns `true` on the
    /// step that reaches the end, and only on that one.
    pub fn advance(&mut self, delta_secs: f32) -> bool {
        if self.uri.is_none() || self.ended {
            return false;
        }
        if !self.is_paused {
            self.position_secs = self.clamped(self.position_secs + delta_secs);
        }
        if self.at_end() {
            self.ended = true;
        }
        self.ended
    }

    fn clamped(&self, position: f32) -> f32 {
        let position = position.max(0.0);
        match self.duration_secs {
            Some(duration) => position.min(duration),
            None => position,
        }
    }

    fn at_end(&self) -> bool {
        self.duration_secs
            .is_some_and(|duration| self.position_secs >= duration)
    }
}

/// Translates a session transition into a playback instruction, if it needs one.
pub fn playback_for(effect: ViewerEffect, session: &MediaSession) -> Option<PlaybackCommand> {
    match effect {
        ViewerEffect::Opened | ViewerEffect::Navigated { .. } => {
            session.current_item().map(|item| PlaybackCommand::Load {
                uri: item.uri.clone(),
                kind: item.kind,
                duration_secs: item.duration_secs,
            })
        }
        ViewerEffect::PauseChanged(paused) => Some(PlaybackCommand::SetPaused(paused)),
        ViewerEffect::Seek(offset) => Some(PlaybackCommand::SeekBy(offset)),
        ViewerEffect::Closed => Some(PlaybackCommand::Stop),
        ViewerEffect::Ignored | ViewerEffect::FullscreenRequested(_) => None,
    }
}

pub fn drive_playback(
    mut commands: EventReader<PlaybackCommand>,
    time: Res<Time>,
    mut surface: ResMut<PlaybackSurface>,
    mut ended_writer: EventWriter<MediaEnded>,
) {
    for command in commands.read() {
        trace!("Playback: {:?}", command);
        surface.apply(command);
    }
    if surface.advance(time.delta_secs()) {
        debug!("Playback reached the end of {:?}.", surface.uri);
        ended_writer.write(MediaEnded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::definitions::MediaItem;

    #[test]
    fn seek_clamps_at_zero() {
        let mut surface = PlaybackSurface::default();
        surface.apply(&PlaybackCommand::Load {
            uri: "file:///v.mp4".into(),
            kind: MediaKind::Video,
            duration_secs: None,
        });
        surface.apply(&PlaybackCommand::SeekBy(5.0));
        surface.apply(&PlaybackCommand::SeekBy(-10.0));
        assert_eq!(surface.position_secs, 0.0);
        assert!(surface.is_playing());
    }

    #[test]
    fn images_leave_the_surface_idle() {
        let mut surface = PlaybackSurface::default();
        surface.apply(&PlaybackCommand::Load {
            uri: "file:///p.png".into(),
            kind: MediaKind::Image,
            duration_secs: Some(3.0),
        });
        assert!(!surface.is_playing());
        assert!(!surface.advance(10.0));
        assert_eq!(surface.duration_secs, None);
    }

    #[test]
    fn navigation_loads_the_new_item() {
        let mut session = MediaSession::default();
        session.show(vec![
            MediaItem {
                reference: "a.png".into(),
                uri: "file:///a.png".into(),
                kind: MediaKind::Image,
                duration_secs: None,
            },
            MediaItem {
                reference: "b.mp4".into(),
                uri: "file:///b.mp4".into(),
                kind: MediaKind::Video,
                duration_secs: Some(12.5),
            },
        ]);
        let effect = session.next();
        assert_eq!(
            playback_for(effect, &session),
            Some(PlaybackCommand::Load {
                uri: "file:///b.mp4".into(),
                kind: MediaKind::Video,
                duration_secs: Some(12.5),
            })
        );
        assert_eq!(playback_for(ViewerEffect::Ignored, &session), None);
    }

    fn loaded(duration_secs: Option<f32>) -> PlaybackSurface {
        let mut surface = PlaybackSurface::default();
        surface.apply(&PlaybackCommand::Load {
            uri: "file:///v.mp4".into(),
            kind: MediaKind::Video,
            duration_secs,
        });
        surface
    }

    #[test]
    fn reaching_the_duration_ends_once() {
        let mut surface = loaded(Some(1.0));
        assert!(!surface.advance(0.6));
        assert!(surface.advance(0.6));
        assert_eq!(surface.position_secs, 1.0);
        assert!(!surface.is_playing());
        assert!(!surface.advance(0.6));
        assert!(!surface.advance(0.6));
    }

    #[test]
    fn paused_or_unbounded_videos_never_end() {
        let mut surface = loaded(Some(1.0));
        surface.apply(&PlaybackCommand::SetPaused(true));
        assert!(!surface.advance(5.0));
        assert_eq!(surface.position_secs, 0.0);

        let mut unbounded = loaded(None);
        assert!(!unbounded.advance(1000.0));
        assert_eq!(unbounded.position_secs, 1000.0);
    }

    #[test]
    fn seeking_past_the_end_ends_and_seeking_back_resumes() {
        let mut surface = loaded(Some(10.0));
        surface.apply(&PlaybackCommand::SeekBy(30.0));
        assert_eq!(surface.position_secs, 10.0);
        assert!(surface.advance(0.0));

        surface.apply(&PlaybackCommand::SeekBy(-5.0));
        assert_eq!(surface.position_secs, 5.0);
        assert!(surface.is_playing());
        assert!(!surface.advance(1.0));
    }
}
