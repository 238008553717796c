//! File discovery for duplicate scanning.
//!
//! # Overview
//!
//! [`Walker`] enumerates candidate regular files under a root path. In
//! recursive mode it covers the whole subtree; in flat mode only the
//! direct children of the root. Inaccessible entries (permission denied,
//! broken link, vanished during the walk) are yielded as errors so the
//! caller can count and skip them - they never abort the walk.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{FileEntry, ScanError};

/// Single-threaded file walker.
///
/// The returned iterator is lazy and finite; a fresh call to
/// [`Walker::walk`] re-walks the tree from scratch.
#[derive(Debug)]
pub struct Walker {
    /// Root path to scan
    root: PathBuf,
    /// Whether to descend into subdirectories
    recursive: bool,
}

impl Walker {
    /// Create a new walker for the given root.
    #[must_use]
    pub fn new(root: &Path, recursive: bool) -> Self {
        Self {
            root: root.to_path_buf(),
            recursive,
        }
    }

    /// Walk the root, yielding every regular file found.
    ///
    /// Directory entries are sorted by name so repeat walks of an
    /// unchanged tree produce identical output.
    pub fn walk(&self) -> Box<dyn Iterator<Item = Result<FileEntry, ScanError>> + '_> {
        if self.recursive {
            self.walk_recursive()
        } else {
            self.walk_flat()
        }
    }

    fn walk_recursive(&self) -> Box<dyn Iterator<Item = Result<FileEntry, ScanError>> + '_> {
        let iter = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry_result| {
                let entry = match entry_result {
                    Ok(entry) => entry,
                    Err(e) => return Some(Err(ScanError::from(e))),
                };

                if !entry.file_type().is_file() {
                    return None;
                }

                let path = entry.path().to_path_buf();
                match entry.metadata() {
                    Ok(meta) => Some(Ok(FileEntry::new(path, meta.len()))),
                    Err(e) => Some(Err(ScanError::from(e))),
                }
            });
        Box::new(iter)
    }

    fn walk_flat(&self) -> Box<dyn Iterator<Item = Result<FileEntry, ScanError>> + '_> {
        // An unreadable root yields a single error; per-entry failures are
        // yielded individually so the rest of the directory still scans.
        let read_dir = match fs::read_dir(&self.root) {
            Ok(read_dir) => read_dir,
            Err(e) => return Box::new(std::iter::once(Err(ScanError::from_io(&self.root, e)))),
        };

        Box::new(read_dir.filter_map(move |entry_result| {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => return Some(Err(ScanError::from_io(&self.root, e))),
            };

            let path = entry.path();
            match entry.file_type() {
                Ok(file_type) if file_type.is_file() => match entry.metadata() {
                    Ok(meta) => Some(Ok(FileEntry::new(path, meta.len()))),
                    Err(e) => Some(Err(ScanError::from_io(&path, e))),
                },
                Ok(_) => None,
                Err(e) => Some(Err(ScanError::from_io(&path, e))),
            }
        }))
    }
}
