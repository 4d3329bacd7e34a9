// src/settings/io.rs
use bevy::log::{error, info, warn};
use directories_next::ProjectDirs;
use std::fs;
use std::io::{self, BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

use super::AppSettings;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "MediaGrid";
const APPLICATION: &str = "MediaGrid";
const CONFIG_FILE: &str = "settings.json";

pub fn config_path() -> io::Result<PathBuf> {
    let proj_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
        io::Error::new(
            ErrorKind::NotFound,
            "Could not determine project directories for app settings.",
        )
    })?;
    let config_dir = proj_dirs.config_dir();
    fs::create_dir_all(config_dir)?;
    Ok(config_dir.join(CONFIG_FILE))
}

/// Reads settings from `path`. A missing file is not an error and yields defaults.
pub fn read_settings(path: &Path) -> io::Result<AppSettings> {
    match fs::File::open(path) {
        Ok(file) => serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            io::Error::new(
                ErrorKind::InvalidData,
                format!("Failed to parse settings file {}: {}", path.display(), e),
            )
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("AppSettings: No settings file at {:?}; using defaults.", path);
            Ok(AppSettings::default())
        }
        Err(e) => Err(e),
    }
}

pub fn write_settings(path: &Path, settings: &AppSettings) -> io::Result<()> {
    let writer = BufWriter::new(fs::File::create(path)?);
    serde_json::to_writer_pretty(writer, settings).map_err(|e| io::Error::new(ErrorKind::Other, e))
}

/// Loads settings from the platform config directory, seeding the file with
/// defaults on first run. Any failure is logged and degrades to defaults.
pub fn load_settings() -> AppSettings {
    let path = match config_path() {
        Ok(path) => path,
        Err(e) => {
            warn!("AppSettings: {}. Using defaults.", e);
            return AppSettings::default();
        }
    };

    let first_run = !path.exists();
    let settings = match read_settings(&path) {
        Ok(settings) => settings,
        Err(e) => {
            error!("AppSettings: {}. Using defaults.", e);
            return AppSettings::default();
        }
    };

    if first_run {
        if let Err(e) = write_settings(&path, &settings) {
            warn!("AppSettings: Could not write default settings to {:?}: {}", path, e);
        }
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::session::SaveMode;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("mediagrid-{}-{}", uuid::Uuid::new_v4(), name))
    }

    #[test]
    fn missing_file_reads_as_defaults() {
        let path = scratch_path("absent.json");
        assert_eq!(read_settings(&path).unwrap(), AppSettings::default());
    }

    #[test]
    fn written_settings_read_back() {
        let path = scratch_path("settings.json");
        let settings = AppSettings {
            save_mode: SaveMode::Manual,
            media_column: "FILES".into(),
            ..AppSettings::default()
        };
        write_settings(&path, &settings).unwrap();
        assert_eq!(read_settings(&path).unwrap(), settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn malformed_file_is_invalid_data() {
        let path = scratch_path("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let err = read_settings(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        let _ = fs::remove_file(&path);
    }
}
