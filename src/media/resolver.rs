// src/media/resolver.rs
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::definitions::{MediaClassifier, MediaItem, MediaKind};
use super::movie_header::video_duration_secs;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("cannot resolve media reference '{reference}': {reason}")]
    ResolutionFailure { reference: String, reason: String },
}

impl ResolveError {
    fn failure(reference: &str, reason: impl Into<String>) -> Self {
        ResolveError::ResolutionFailure {
            reference: reference.to_string(),
            reason: reason.into(),
        }
    }
}

/// Turns a raw grid value into something the viewer can display.
/// Resolving the same reference twice must give the same URI.
pub trait PathResolver: Send + Sync + 'static {
    fn resolve(&self, reference: &str) -> Result<String, ResolveError>;
}

/// Filesystem-backed resolver.
#[derive(Debug, Clone, Default)]
pub struct FsPathResolver {
    media_root: Option<PathBuf>,
}

const FILE_SCHEME: &str = "file://";
const REMOTE_SCHEMES: [&str; 2] = ["http://", "https://"];

impl FsPathResolver {
    pub fn new(media_root: Option<PathBuf>) -> Self {
        Self { media_root }
    }

    fn existing(reference: &str, path: &Path) -> Result<(), ResolveError> {
        match fs::metadata(path) {
            Ok(meta) if meta.is_file() => Ok(()),
            Ok(_) => Err(ResolveError::failure(reference, "not a file")),
            Err(e) => Err(ResolveError::failure(
                reference,
                format!("{}: {}", path.display(), e),
            )),
        }
    }
}

/// Local path behind a `file://` URI produced by [`path_to_file_uri`].
pub fn file_uri_to_path(uri: &str) -> Option<PathBuf> {
    let text = uri.strip_prefix(FILE_SCHEME)?;
    let bytes = text.as_bytes();
    // `/C:/...` on Windows
    if bytes.len() > 2 && bytes[0] == b'/' && bytes[2] == b':' && bytes[1].is_ascii_alphabetic() {
        Some(PathBuf::from(&text[1..]))
    } else {
        Some(PathBuf::from(text))
    }
}

fn path_to_file_uri(path: &Path) -> String {
    let text = path.to_string_lossy().replace('\\', "/");
    let text = text.trim_start_matches("//?/");
    if text.starts_with('/') {
        format!("{}{}", FILE_SCHEME, text)
    } else {
        format!("{}/{}", FILE_SCHEME, text)
    }
}

impl PathResolver for FsPathResolver {
    fn resolve(&self, reference: &str) -> Result<String, ResolveError> {
        let trimmed = reference.trim();
        if trimmed.is_empty() {
            return Err(ResolveError::failure(reference, "empty reference"));
        }
        let lower = trimmed.to_lowercase();
        if REMOTE_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
            return Ok(trimmed.to_string());
        }

        let path = if lower.starts_with(FILE_SCHEME) {
            PathBuf::from(&trimmed[FILE_SCHEME.len()..])
        } else {
            let path = Path::new(trimmed);
            match &self.media_root {
                Some(root) if path.is_relative() => root.join(path),
                _ => path.to_path_buf(),
            }
        };
        Self::existing(reference, &path)?;
        let canonical =
            fs::canonicalize(&path).map_err(|e| ResolveError::failure(reference, e.to_string()))?;
        Ok(path_to_file_uri(&canonical))
    }
}

/// Result of resolving a whole media column.
#[derive(Debug, Default)]
pub struct ResolvedMedia {
    pub items: Vec<MediaItem>,
    pub failures: Vec<ResolveError>,
}

/// Resolves references in order; failing ones are left out of `items`.
/// Local videos get their running time from the file when it can be read.
pub fn resolve_media(
    resolver: &dyn PathResolver,
    classifier: &MediaClassifier,
    references: &[String],
) -> ResolvedMedia {
    let mut resolved = ResolvedMedia::default();
    for reference in references {
        match resolver.resolve(reference) {
            Ok(uri) => {
                let kind = classifier.classify(reference);
                let duration_secs = match kind {
                    MediaKind::Video => file_uri_to_path(&uri).and_then(|p| video_duration_secs(&p)),
                    MediaKind::Image | MediaKind::Gif => None,
                };
                resolved.items.push(MediaItem {
                    reference: reference.clone(),
                    uri,
                    kind,
                    duration_secs,
                });
            }
            Err(e) => resolved.failures.push(e),
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::movie_header::tests::tiny_mp4;

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("mediagrid-media-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn remote_urls_pass_through() {
        let resolver = FsPathResolver::default();
        assert_eq!(
            resolver.resolve("https://example.com/a.mp4").unwrap(),
            "https://example.com/a.mp4"
        );
    }

    #[test]
    fn relative_references_join_media_root() {
        let dir = scratch_dir();
        fs::write(dir.join("x.jpg"), b"jpg").unwrap();
        let resolver = FsPathResolver::new(Some(dir.clone()));

        let first = resolver.resolve("x.jpg").unwrap();
        let canonical = fs::canonicalize(dir.join("x.jpg")).unwrap();
        assert_eq!(first, path_to_file_uri(&canonical));
        assert_eq!(resolver.resolve("x.jpg").unwrap(), first);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn absolute_paths_and_file_uris_agree() {
        let dir = scratch_dir();
        fs::write(dir.join("clip.mp4"), b"mp4").unwrap();
        let canonical = fs::canonicalize(dir.join("clip.mp4")).unwrap();
        let raw = format!("file://{}", dir.join(".").join("clip.mp4").display());

        let uri = FsPathResolver::default().resolve(&raw).unwrap();
        assert_eq!(uri, path_to_file_uri(&canonical));
        let absolute = FsPathResolver::default()
            .resolve(&canonical.to_string_lossy())
            .unwrap();
        assert_eq!(absolute, uri);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_files_fail() {
        let dir = scratch_dir();
        let resolver = FsPathResolver::new(Some(dir.clone()));
        assert!(matches!(
            resolver.resolve("nope.png"),
            Err(ResolveError::ResolutionFailure { .. })
        ));
        assert!(resolver.resolve("   ").is_err());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn resolve_media_drops_failures_and_keeps_order() {
        let dir = scratch_dir();
        fs::write(dir.join("x.jpg"), b"jpg").unwrap();
        fs::write(dir.join("y.MP4"), b"mp4").unwrap();
        let resolver = FsPathResolver::new(Some(dir.clone()));
        let refs = vec!["x.jpg".to_string(), "gone.gif".to_string(), "y.MP4".to_string()];

        let resolved = resolve_media(&resolver, &MediaClassifier::default(), &refs);
        let kinds: Vec<MediaKind> = resolved.items.iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![MediaKind::Image, MediaKind::Video]);
        assert_eq!(resolved.items[1].reference, "y.MP4");
        assert_eq!(resolved.failures.len(), 1);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn local_videos_carry_their_running_time() {
        let dir = scratch_dir();
        fs::write(dir.join("clip.mp4"), tiny_mp4(1000, 4000)).unwrap();
        fs::write(dir.join("broken.mp4"), b"mp4").unwrap();
        fs::write(dir.join("still.png"), b"png").unwrap();
        let resolver = FsPathResolver::new(Some(dir.clone()));
        let refs = vec![
            "clip.mp4".to_string(),
            "broken.mp4".to_string(),
            "still.png".to_string(),
        ];

        let resolved = resolve_media(&resolver, &MediaClassifier::default(), &refs);
        let durations: Vec<Option<f32>> = resolved.items.iter().map(|i| i.duration_secs).collect();
        assert_eq!(durations, vec![Some(4.0), None, None]);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn file_uris_map_back_to_paths() {
        assert_eq!(
            file_uri_to_path("file:///media/a.mp4"),
            Some(PathBuf::from("/media/a.mp4"))
        );
        assert_eq!(
            file_uri_to_path("file:///C:/media/a.mp4"),
            Some(PathBuf::from("C:/media/a.mp4"))
        );
        assert_eq!(file_uri_to_path("https://example.com/a.mp4"), None);
    }
}
