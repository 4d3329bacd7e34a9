// src/settings/mod.rs
pub mod io;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::grid::session::SaveMode;
use crate::media::definitions::DEFAULT_VIDEO_EXTENSIONS;

/// User configuration, stored as JSON in the platform config directory.
/// Command line flags are applied on top after loading.
#[derive(Resource, Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    /// Cell database file; `None` means `<Documents>/MediaGrid/cells.db`.
    pub database_path: Option<PathBuf>,
    /// Base directory for relative media references.
    pub media_root: Option<PathBuf>,
    /// Label of the column holding media references.
    pub media_column: String,
    /// Column letter -> display label.
    pub column_labels: BTreeMap<String, String>,
    pub save_mode: SaveMode,
    pub video_extensions: Vec<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            database_path: None,
            media_root: None,
            media_column: "PATH".to_string(),
            column_labels: BTreeMap::new(),
            save_mode: SaveMode::default(),
            video_extensions: DEFAULT_VIDEO_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}
