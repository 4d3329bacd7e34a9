// src/media/session.rs
use bevy::prelude::{debug, Resource};

use super::definitions::{MediaItem, MediaKind};
use super::input::{SeekStep, ViewerInput};

/// Viewer state: `Closed`, or `Open` at a valid index into the item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewerState {
    #[default]
    Closed,
    Open {
        index: usize,
        is_paused: bool,
        is_fullscreen: bool,
    },
}

/// Read-only snapshot for the rendering surface.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaSessionState {
    pub items: Vec<MediaItem>,
    pub index: usize,
    pub is_open: bool,
    pub is_paused: bool,
    pub is_fullscreen: bool,
}

impl MediaSessionState {
    /// `"i / n"`, 1-based. `None` when closed.
    pub fn position_label(&self) -> Option<String> {
        self.is_open
            .then(|| format!("{} / {}", self.index + 1, self.items.len()))
    }

    pub fn current(&self) -> Option<&MediaItem> {
        if self.is_open {
            self.items.get(self.index)
        } else {
            None
        }
    }
}

/// What a transition asks the outside world to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerEffect {
    /// Nothing changed.
    Ignored,
    Opened,
    Closed,
    /// Index moved; the playback surface should load the new item.
    Navigated { index: usize },
    /// Pause flag flipped to the contained value.
    PauseChanged(bool),
    /// Ask the platform to enter (`true`) or leave fullscreen.
    FullscreenRequested(bool),
    /// Relative seek in seconds, for the playback surface.
    Seek(f32),
}

#[derive(Resource, Debug, Default)]
pub struct MediaSession {
    items: Vec<MediaItem>,
    state: ViewerState,
    device_fullscreen: bool,
}

impl MediaSession {
    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ViewerState::Open { .. })
    }

    /// Last fullscreen status reported by the platform, open or not.
    pub fn is_device_fullscreen(&self) -> bool {
        self.device_fullscreen
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn current_item(&self) -> Option<&MediaItem> {
        match self.state {
            ViewerState::Open { index, .. } => self.items.get(index),
            ViewerState::Closed => None,
        }
    }

    pub fn current_kind(&self) -> Option<MediaKind> {
        self.current_item().map(|item| item.kind)
    }

    pub fn snapshot(&self) -> MediaSessionState {
        let (index, is_open, is_paused) = match self.state {
            ViewerState::Open {
                index, is_paused, ..
            } => (index, true, is_paused),
            ViewerState::Closed => (0, false, false),
        };
        MediaSessionState {
            items: self.items.clone(),
            index,
            is_open,
            is_paused,
            is_fullscreen: self.device_fullscreen,
        }
    }

    /// Opens the viewer on a new item list. An empty list leaves the session untouched.
    pub fn show(&mut self, items: Vec<MediaItem>) -> ViewerEffect {
        if items.is_empty() {
            debug!("MediaSession: show() with no items ignored.");
            return ViewerEffect::Ignored;
        }
        self.items = items;
        self.state = ViewerState::Open {
            index: 0,
            is_paused: false,
            is_fullscreen: self.device_fullscreen,
        };
        ViewerEffect::Opened
    }

    pub fn close(&mut self) -> ViewerEffect {
        if !self.is_open() {
            return ViewerEffect::Ignored;
        }
        self.state = ViewerState::Closed;
        ViewerEffect::Closed
    }

    pub fn next(&mut self) -> ViewerEffect {
        let last = self.items.len().saturating_sub(1);
        self.move_to(|index| (index + 1).min(last))
    }

    pub fn prev(&mut self) -> ViewerEffect {
        self.move_to(|index| index.saturating_sub(1))
    }

    /// Natural end of a video. Same as `next`, stays on the last item.
    pub fn media_ended(&mut self) -> ViewerEffect {
        self.next()
    }

    fn move_to(&mut self, target: impl FnOnce(usize) -> usize) -> ViewerEffect {
        let ViewerState::Open {
            index,
            is_fullscreen,
            ..
        } = self.state
        else {
            return ViewerEffect::Ignored;
        };
        let new_index = target(index);
        if new_index == index {
            return ViewerEffect::Ignored;
        }
        self.state = ViewerState::Open {
            index: new_index,
            is_paused: false,
            is_fullscreen,
        };
        ViewerEffect::Navigated { index: new_index }
    }

    pub fn toggle_pause(&mut self) -> ViewerEffect {
        if self.current_kind() != Some(MediaKind::Video) {
            return ViewerEffect::Ignored;
        }
        if let ViewerState::Open { is_paused, .. } = &mut self.state {
            *is_paused = !*is_paused;
            ViewerEffect::PauseChanged(*is_paused)
        } else {
            ViewerEffect::Ignored
        }
    }

    /// Only a request; the flag follows once the platform reports the change.
    pub fn request_fullscreen_toggle(&self) -> ViewerEffect {
        match self.state {
            ViewerState::Open { is_fullscreen, .. } => {
                ViewerEffect::FullscreenRequested(!is_fullscreen)
            }
            ViewerState::Closed => ViewerEffect::Ignored,
        }
    }

    /// Reconciles with the device fullscreen status. Returns whether the open state changed.
    pub fn observe_fullscreen(&mut self, actual: bool) -> bool {
        self.device_fullscreen = actual;
        match &mut self.state {
            ViewerState::Open { is_fullscreen, .. } if *is_fullscreen != actual => {
                *is_fullscreen = actual;
                true
            }
            _ => false,
        }
    }

    pub fn seek(&self, step: SeekStep) -> ViewerEffect {
        if self.is_open() && self.current_kind() == Some(MediaKind::Video) {
            ViewerEffect::Seek(step.seconds())
        } else {
            ViewerEffect::Ignored
        }
    }

    pub fn apply(&mut self, input: ViewerInput) -> ViewerEffect {
        match input {
            ViewerInput::Close => self.close(),
            ViewerInput::Next => self.next(),
            ViewerInput::Previous => self.prev(),
            ViewerInput::ToggleFullscreen => self.request_fullscreen_toggle(),
            ViewerInput::TogglePause => self.toggle_pause(),
            ViewerInput::Seek(step) => self.seek(step),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::definitions::MediaClassifier;

    fn items(refs: &[&str]) -> Vec<MediaItem> {
        let classifier = MediaClassifier::default();
        refs.iter()
            .map(|r| MediaItem {
                reference: r.to_string(),
                uri: format!("file:///media/{}", r),
                kind: classifier.classify(r),
                duration_secs: None,
            })
            .collect()
    }

    fn open_state(session: &MediaSession) -> (usize, bool, bool) {
        match session.state() {
            ViewerState::Open {
                index,
                is_paused,
                is_fullscreen,
            } => (index, is_paused, is_fullscreen),
            ViewerState::Closed => panic!("expected an open session"),
        }
    }

    #[test]
    fn show_empty_stays_closed() {
        let mut session = MediaSession::default();
        assert_eq!(session.show(Vec::new()), ViewerEffect::Ignored);
        assert_eq!(session.state(), ViewerState::Closed);
        assert!(!session.snapshot().is_open);
    }

    #[test]
    fn show_opens_at_first_item_with_device_fullscreen() {
        let mut session = MediaSession::default();
        session.observe_fullscreen(true);
        assert_eq!(session.show(items(&["x.jpg", "y.mp4"])), ViewerEffect::Opened);
        assert_eq!(open_state(&session), (0, false, true));
        assert_eq!(session.current_kind(), Some(MediaKind::Image));
    }

    #[test]
    fn navigation_saturates_at_both_ends() {
        let mut session = MediaSession::default();
        session.show(items(&["a.png", "b.png", "c.png"]));

        assert_eq!(session.prev(), ViewerEffect::Ignored);
        assert_eq!(open_state(&session).0, 0);

        session.next();
        session.next();
        assert_eq!(session.next(), ViewerEffect::Ignored);
        assert_eq!(open_state(&session).0, 2);

        assert_eq!(session.prev(), ViewerEffect::Navigated { index: 1 });
    }

    #[test]
    fn navigation_resets_pause_and_recomputes_kind() {
        let mut session = MediaSession::default();
        session.show(items(&["a.mp4", "b.mp4", "c.gif"]));
        assert_eq!(session.toggle_pause(), ViewerEffect::PauseChanged(true));

        session.next();
        assert_eq!(open_state(&session), (1, false, false));
        assert_eq!(session.current_kind(), Some(MediaKind::Video));

        session.next();
        assert_eq!(session.current_kind(), Some(MediaKind::Gif));
    }

    #[test]
    fn toggle_pause_ignored_for_non_video() {
        let mut session = MediaSession::default();
        session.show(items(&["a.gif", "b.mp4"]));
        assert_eq!(session.toggle_pause(), ViewerEffect::Ignored);
        assert_eq!(open_state(&session).1, false);

        session.next();
        session.toggle_pause();
        assert_eq!(session.toggle_pause(), ViewerEffect::PauseChanged(false));
    }

    #[test]
    fn media_end_on_last_item_stays_open() {
        let mut session = MediaSession::default();
        session.show(items(&["a.mp4", "b.mp4"]));
        assert_eq!(session.media_ended(), ViewerEffect::Navigated { index: 1 });
        session.toggle_pause();

        assert_eq!(session.media_ended(), ViewerEffect::Ignored);
        assert!(session.is_open());
        assert_eq!(open_state(&session).0, 1);
    }

    #[test]
    fn close_resets_pause_for_next_show() {
        let mut session = MediaSession::default();
        session.show(items(&["a.mp4", "b.mp4"]));
        session.next();
        session.toggle_pause();

        assert_eq!(session.close(), ViewerEffect::Closed);
        let snapshot = session.snapshot();
        assert!(!snapshot.is_open);
        assert!(!snapshot.is_paused);
        assert_eq!(snapshot.index, 0);

        session.show(items(&["c.mp4"]));
        assert_eq!(open_state(&session), (0, false, false));
        assert_eq!(session.items().len(), 1);
    }

    #[test]
    fn fullscreen_follows_observation_not_intent() {
        let mut session = MediaSession::default();
        session.show(items(&["a.png"]));

        assert_eq!(
            session.request_fullscreen_toggle(),
            ViewerEffect::FullscreenRequested(true)
        );
        assert_eq!(open_state(&session).2, false);

        assert!(session.observe_fullscreen(true));
        assert_eq!(open_state(&session).2, true);
        assert!(!session.observe_fullscreen(true));

        // Leaving fullscreen from outside the viewer.
        assert!(session.observe_fullscreen(false));
        assert_eq!(
            session.request_fullscreen_toggle(),
            ViewerEffect::FullscreenRequested(true)
        );
    }

    #[test]
    fn seek_only_for_video() {
        let mut session = MediaSession::default();
        assert_eq!(session.seek(SeekStep::Forward5), ViewerEffect::Ignored);

        session.show(items(&["a.png", "b.webm"]));
        assert_eq!(session.seek(SeekStep::Back10), ViewerEffect::Ignored);

        session.next();
        assert_eq!(session.seek(SeekStep::Back10), ViewerEffect::Seek(-10.0));
        assert_eq!(session.seek(SeekStep::Forward5), ViewerEffect::Seek(5.0));
    }

    #[test]
    fn inputs_map_to_transitions() {
        let mut session = MediaSession::default();
        session.show(items(&["x.jpg", "y.mp4"]));
        assert_eq!(session.apply(ViewerInput::Next), ViewerEffect::Navigated { index: 1 });
        assert_eq!(
            session.apply(ViewerInput::TogglePause),
            ViewerEffect::PauseChanged(true)
        );
        assert_eq!(
            session.apply(ViewerInput::Previous),
            ViewerEffect::Navigated { index: 0 }
        );
        assert_eq!(session.apply(ViewerInput::Close), ViewerEffect::Closed);
        assert_eq!(session.apply(ViewerInput::Close), ViewerEffect::Ignored);
    }

    #[test]
    fn snapshot_reports_position() {
        let mut session = MediaSession::default();
        assert_eq!(session.snapshot().position_label(), None);
        session.show(items(&["a.png", "b.png", "c.png"]));
        session.next();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.position_label().as_deref(), Some("2 / 3"));
        assert_eq!(snapshot.current().map(|i| i.reference.as_str()), Some("b.png"));
    }
}
