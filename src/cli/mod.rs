// src/cli/mod.rs
// Command line flags and offline inspection tools

pub mod dump_cells;
pub mod list_media;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::grid::session::SaveMode;
use crate::settings::AppSettings;

#[derive(Parser, Debug)]
#[command(name = "mediagrid")]
#[command(about = "MediaGrid - persistent grid editor with a media viewer", long_about = None)]
pub struct Cli {
    /// Cell database file (overrides settings.json)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Base directory for relative media references
    #[arg(long, global = true)]
    pub media_root: Option<PathBuf>,

    /// Label of the column holding media references
    #[arg(long, global = true)]
    pub media_column: Option<String>,

    /// Only write to the database when Save is pressed
    #[arg(long)]
    pub manual_save: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every stored cell as JSON
    DumpCells,

    /// Resolve the media column and print each item with its kind
    ListMedia,
}

impl Cli {
    /// Command line flags win over the settings file.
    pub fn apply_to(&self, settings: &mut AppSettings) {
        if let Some(db) = &self.db {
            settings.database_path = Some(db.clone());
        }
        if let Some(root) = &self.media_root {
            settings.media_root = Some(root.clone());
        }
        if let Some(column) = &self.media_column {
            settings.media_column = column.clone();
        }
        if self.manual_save {
            settings.save_mode = SaveMode::Manual;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_settings() {
        let cli = Cli::parse_from([
            "mediagrid",
            "--db",
            "/tmp/cells.db",
            "--media-column",
            "FILES",
            "--manual-save",
        ]);
        let mut settings = AppSettings::default();
        cli.apply_to(&mut settings);
        assert_eq!(settings.database_path, Some(PathBuf::from("/tmp/cells.db")));
        assert_eq!(settings.media_column, "FILES");
        assert_eq!(settings.save_mode, SaveMode::Manual);
        assert!(cli.command.is_none());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["mediagrid", "list-media", "--media-root", "/srv/media"]);
        assert!(matches!(cli.command, Some(Commands::ListMedia)));
        assert_eq!(cli.media_root, Some(PathBuf::from("/srv/media")));
    }
}
