//! Empty-directory detection.
//!
//! The recursive scan walks the subtree in post-order so that children are
//! listed before their parents and can be acted upon first. The result is a
//! static snapshot: deleting a folder's last entry does not retroactively
//! mark its parent within the same pass - callers re-run the scan to pick
//! up newly emptied parents.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Find directories with zero entries under `root`.
///
/// Non-recursive mode checks only whether `root` itself is empty; recursive
/// mode tests every directory in the subtree *except* the root. A missing
/// or unreadable root yields an empty result rather than an error.
#[must_use]
pub fn find_empty_folders(root: &Path, recursive: bool) -> Vec<PathBuf> {
    if !root.is_dir() {
        log::debug!("empty-folder scan: {} is not a directory", root.display());
        return Vec::new();
    }

    if !recursive {
        return if dir_is_empty(root) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        };
    }

    WalkDir::new(root)
        .sort_by_file_name()
        .contents_first(true)
        .into_iter()
        .filter_map(|entry_result| match entry_result {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("empty-folder scan: skipping entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir() && entry.path() != root)
        .filter(|entry| dir_is_empty(entry.path()))
        .map(|entry| entry.path().to_path_buf())
        .collect()
}

/// Check whether a directory has zero entries at this instant.
///
/// Unreadable directories count as non-empty so they are never offered for
/// deletion.
fn dir_is_empty(path: &Path) -> bool {
    match fs::read_dir(path) {
        Ok(mut entries) => entries.next().is_none(),
        Err(e) => {
            log::debug!("empty-folder scan: cannot read {}: {}", path.display(), e);
            false
        }
    }
}
