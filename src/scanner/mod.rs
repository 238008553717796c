//! Scanner module for directory traversal, file hashing, and empty-folder
//! detection.
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: File discovery (flat or recursive)
//! - [`hasher`]: BLAKE3 prefix and full-content hashing
//! - [`empty`]: Post-order empty-directory detection
//!
//! # Example
//!
//! ```no_run
//! use cleanscan::scanner::Walker;
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), true);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod empty;
pub mod hasher;
pub mod walker;

use std::io;
use std::path::{Path, PathBuf};

// Re-export main types
pub use empty::find_empty_folders;
pub use hasher::{hash_to_hex, Hash, Hasher, PREHASH_SIZE};
pub use walker::Walker;

/// Metadata for a discovered file.
///
/// Lives only for the duration of one scan pass. The digest fields start
/// out as `None` and are filled in as the file survives the grouping
/// stages.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// BLAKE3 digest over the leading [`PREHASH_SIZE`] bytes, if computed
    pub prehash: Option<Hash>,
    /// BLAKE3 digest over the full content, if computed
    pub full_hash: Option<Hash>,
}

impl FileEntry {
    /// Create a new entry with no digests computed yet.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self {
            path,
            size,
            prehash: None,
            full_hash: None,
        }
    }
}

/// Errors that can occur during directory scanning.
///
/// These are always absorbed by the caller: an unreadable entry is skipped
/// and the scan continues with whatever remains reachable.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The entry vanished between discovery and stat.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while accessing an entry.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    pub(crate) fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

impl From<walkdir::Error> for ScanError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf).unwrap_or_default();
        match err.into_io_error() {
            Some(io_err) => Self::from_io(&path, io_err),
            None => Self::Io {
                path,
                source: io::Error::other("filesystem loop detected"),
            },
        }
    }
}

/// Errors that can occur while hashing a file.
///
/// A hash failure excludes the affected file from its current grouping
/// stage; siblings in the same bucket are still processed.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The file was not found (deleted or moved during the scan).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl HashError {
    pub(crate) fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_entry_new() {
        let entry = FileEntry::new(PathBuf::from("/test/file.txt"), 1024);

        assert_eq!(entry.path, PathBuf::from("/test/file.txt"));
        assert_eq!(entry.size, 1024);
        assert!(entry.prehash.is_none());
        assert!(entry.full_hash.is_none());
    }

    #[test]
    fn test_scan_error_display() {
        let err = ScanError::PermissionDenied(PathBuf::from("/test"));
        assert_eq!(err.to_string(), "permission denied: /test");

        let err = ScanError::NotFound(PathBuf::from("/missing"));
        assert_eq!(err.to_string(), "path not found: /missing");
    }

    #[test]
    fn test_scan_error_from_io_kind() {
        let err = ScanError::from_io(
            Path::new("/x"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, ScanError::NotFound(_)));

        let err = ScanError::from_io(
            Path::new("/x"),
            io::Error::new(io::ErrorKind::PermissionDenied, "nope"),
        );
        assert!(matches!(err, ScanError::PermissionDenied(_)));

        let err = ScanError::from_io(Path::new("/x"), io::Error::other("odd"));
        assert!(matches!(err, ScanError::Io { .. }));
    }

    #[test]
    fn test_hash_error_display() {
        let err = HashError::NotFound(PathBuf::from("/test"));
        assert_eq!(err.to_string(), "file not found: /test");

        let err = HashError::PermissionDenied(PathBuf::from("/secret"));
        assert_eq!(err.to_string(), "permission denied: /secret");
    }
}
