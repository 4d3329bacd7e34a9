// src/media/definitions.rs
use bevy::prelude::Resource;
use serde::Serialize;

pub const DEFAULT_VIDEO_EXTENSIONS: [&str; 6] = [".mp4", ".mkv", ".avi", ".mov", ".flv", ".webm"];
const GIF_EXTENSION: &str = ".gif";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MediaKind {
    Image,
    Gif,
    Video,
}

/// A displayable media reference. `kind` is derived once from the raw
/// reference, before path resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaItem {
    pub reference: String,
    pub uri: String,
    pub kind: MediaKind,
    /// Running time of a video, when the container states one.
    pub duration_secs: Option<f32>,
}

/// Decides the [`MediaKind`] of a reference from its extension.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct MediaClassifier {
    video_extensions: Vec<String>,
}

impl Default for MediaClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_VIDEO_EXTENSIONS)
    }
}

impl MediaClassifier {
    /// Extensions are matched case-insensitively; a missing leading dot is added.
    pub fn new<I, S>(video_extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let video_extensions = video_extensions
            .into_iter()
            .map(|ext| {
                let ext = ext.as_ref().trim().to_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{}", ext)
                }
            })
            .filter(|ext| ext.len() > 1)
            .collect();
        Self { video_extensions }
    }

    /// Anything that is neither a GIF nor a known video is an image.
    pub fn classify(&self, reference: &str) -> MediaKind {
        let lower = reference.to_lowercase();
        if lower.ends_with(GIF_EXTENSION) {
            MediaKind::Gif
        } else if self.video_extensions.iter().any(|ext| lower.ends_with(ext.as_str())) {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}
