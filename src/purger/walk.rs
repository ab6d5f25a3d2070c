//! Pruned tree traversal.
//!
//! Roots are visited in longest-path-first order, so by the time an
//! ancestor directory is walked, every more specific policy root beneath it
//! has already been finalized. Pruning those finalized subtrees in place
//! guarantees each file is attributed to the single most specific policy
//! that covers it and is never visited twice.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::purger::classify::FileStat;

/// Whether `path` is equal to or under one of the finalized roots.
pub fn covered(path: &Path, finalized: &[PathBuf]) -> bool {
    finalized.iter().any(|root| path.starts_with(root))
}

/// Collect every regular file under `root`, pruning subtrees already
/// finalized under a more specific policy. Entries that vanish or cannot
/// be stat'ed between listing and inspection are skipped, not fatal.
pub fn scan_root(root: &Path, finalized: &[PathBuf]) -> Vec<(PathBuf, FileStat)> {
    let mut out = Vec::new();
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !covered(entry.path(), finalized));
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(root = %root.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        match entry.metadata() {
            Ok(meta) => out.push((entry.into_path(), FileStat::from_metadata(&meta))),
            Err(err) => {
                tracing::debug!(path = %entry.path().display(), error = %err, "stat failed; skipping file");
            }
        }
    }
    out
}
