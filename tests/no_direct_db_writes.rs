// tests/no_direct_db_writes.rs
// Fails if direct SQLite write calls appear outside the database layer.
// Everything else must go through `CellStore` and the ordered cell writer.

use std::fs;
use std::path::{Path, PathBuf};

fn collect_rs_files(dir: &Path, files: &mut Vec<PathBuf>) {
    if let Ok(entries) = fs::read_dir(dir) {
        for e in entries.flatten() {
            let p = e.path();
            if p.is_dir() {
                collect_rs_files(&p, files);
            } else if p.extension().map(|s| s == "rs").unwrap_or(false) {
                files.push(p);
            }
        }
    }
}

fn is_whitelisted(path: &Path) -> bool {
    let p = path.to_string_lossy().replace('\\', "/");
    p.contains("/grid/database/")
}

#[test]
fn no_direct_db_writes_outside_database_layer() {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let src_dir = Path::new(manifest_dir).join("src");

    let mut files = Vec::new();
    collect_rs_files(&src_dir, &mut files);
    assert!(!files.is_empty(), "no sources found under {}", src_dir.display());

    let bad_patterns = [
        "conn.execute(",
        ".execute_batch(",
        "stmt.execute(",
        "tx.execute(",
        "Transaction::execute(",
    ];

    let mut offenders: Vec<(String, String)> = Vec::new();

    for file in files {
        if is_whitelisted(&file) {
            continue;
        }
        let content = match fs::read_to_string(&file) {
            Ok(c) => c,
            Err(_) => continue,
        };
        if content.contains("#![cfg(test)]") {
            continue;
        }

        for pat in &bad_patterns {
            if content.contains(pat) {
                offenders.push((file.to_string_lossy().to_string(), pat.to_string()));
            }
        }
    }

    if !offenders.is_empty() {
        let mut msg = String::from("Direct DB write calls found outside src/grid/database:\n");
        for (file, pat) in offenders {
            msg.push_str(&format!(
                "  {} contains pattern '{}': go through CellStore instead\n",
                file, pat
            ));
        }
        panic!("{}", msg);
    }
}

#[test]
fn database_layer_is_the_only_writer() {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let writer = Path::new(manifest_dir).join("src/grid/database/writer.rs");
    let content = fs::read_to_string(&writer).expect("writer module exists");
    assert!(content.contains("ON CONFLICT(id) DO UPDATE"));
}
