// src/cli/list_media.rs
use std::path::Path;

use crate::grid::database::{CellStore, DbResult, SqliteCellStore};
use crate::grid::definitions::ColumnLabels;
use crate::grid::session::GridSession;
use crate::media::definitions::MediaClassifier;
use crate::media::resolver::{resolve_media, FsPathResolver};
use crate::settings::AppSettings;

pub fn run(db_path: &Path, settings: &AppSettings) -> DbResult<()> {
    let store = SqliteCellStore::open(db_path)?;
    let (labels, _) = ColumnLabels::from_map(&settings.column_labels);
    let mut session = GridSession::new(settings.save_mode, labels);
    let session_id = session.session_id();
    session.finish_load(session_id, store.load_all());

    println!(
        "{} non-empty cell(s) loaded from {}",
        session.grid().non_empty_cells().count(),
        db_path.display()
    );
    let references = session.media_references(&settings.media_column);
    println!(
        "Column '{}': {} reference(s)\n",
        settings.media_column,
        references.len()
    );

    let resolver = FsPathResolver::new(settings.media_root.clone());
    let classifier = MediaClassifier::new(&settings.video_extensions);
    let resolved = resolve_media(&resolver, &classifier, &references);

    for (position, item) in resolved.items.iter().enumerate() {
        println!("{:>4}  {:<6} {}", position + 1, format!("{:?}", item.kind), item.uri);
    }
    for failure in &resolved.failures {
        println!("  skipped: {}", failure);
    }
    Ok(())
}
