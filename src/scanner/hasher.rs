//! BLAKE3 file hashing with streaming support.
//!
//! # Overview
//!
//! Two digests drive duplicate detection:
//! - **Prehash**: computed over only the leading [`PREHASH_SIZE`] bytes
//!   (the whole file if shorter). A cheap pre-filter that eliminates
//!   same-size files with different content without reading them fully.
//! - **Full hash**: computed over the complete content in fixed-size
//!   chunks. Two files are considered duplicates iff their full digests
//!   match; collision probability is treated as negligible.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::HashError;

/// Number of leading bytes covered by the prehash.
pub const PREHASH_SIZE: u64 = 64 * 1024;

/// Read buffer size for streaming the full hash.
const READ_BUF_SIZE: usize = 64 * 1024;

/// A BLAKE3 digest (32 bytes).
pub type Hash = [u8; 32];

/// Render a hash as a lowercase hex string.
#[must_use]
pub fn hash_to_hex(hash: &Hash) -> String {
    blake3::Hash::from_bytes(*hash).to_hex().to_string()
}

/// Content hasher for the grouping pipeline.
///
/// Stateless; one instance is shared across all files in a scan pass.
#[derive(Debug, Default)]
pub struct Hasher;

impl Hasher {
    /// Create a new hasher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Hash the leading [`PREHASH_SIZE`] bytes of a file.
    ///
    /// Files shorter than the prefix are hashed in full, so for them the
    /// prehash equals the full hash.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read.
    pub fn prehash(&self, path: &Path) -> Result<Hash, HashError> {
        let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        let mut hasher = blake3::Hasher::new();
        let mut reader = file.take(PREHASH_SIZE);
        let mut buf = vec![0u8; READ_BUF_SIZE];

        loop {
            let n = reader
                .read(&mut buf)
                .map_err(|e| HashError::from_io(path, e))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }

        Ok(*hasher.finalize().as_bytes())
    }

    /// Hash the entire content of a file, streaming in 64 KiB chunks.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read.
    pub fn hash_file(&self, path: &Path) -> Result<Hash, HashError> {
        let mut file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        let mut hasher = blake3::Hasher::new();
        let mut buf = vec![0u8; READ_BUF_SIZE];

        loop {
            let n = file
                .read(&mut buf)
                .map_err(|e| HashError::from_io(path, e))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }

        Ok(*hasher.finalize().as_bytes())
    }
}
