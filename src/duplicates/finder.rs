//! Duplicate finder with three-stage narrowing.
//!
//! # Overview
//!
//! The pipeline minimizes full-file I/O by narrowing candidates in stages
//! of increasing cost:
//!
//! 1. **Size bucketing**: group by exact byte size (see
//!    [`crate::duplicates::groups`]); buckets under two members are dropped
//!    with no content I/O at all.
//! 2. **Prehash**: BLAKE3 over the leading 64 KiB of each survivor. Cheaply
//!    eliminates same-size files with different content.
//! 3. **Full hash**: BLAKE3 over the entire content; files sharing a full
//!    digest form a final [`DuplicateGroup`].
//!
//! The pipeline runs synchronously and returns only when complete; it never
//! streams partial results. A hash failure excludes that one file from the
//! current stage and nothing else.
//!
//! The final group list is sorted non-increasing by wasted-space score
//! (size * (copies - 1)); ties keep encounter order.

use std::collections::HashMap;
use std::path::Path;

use crate::scanner::{FileEntry, Hash, Hasher, Walker};

use super::groups::{group_by_size, DuplicateGroup, GroupingStats};

/// Statistics from one full duplicate scan.
///
/// Skip and failure counts exist so callers can report diagnostics without
/// any of these conditions aborting the scan.
#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    /// Entries skipped during the walk (unreadable, vanished, broken links)
    pub skipped_entries: usize,
    /// Files dropped at the prehash stage (read failures)
    pub prehash_failures: usize,
    /// Files dropped at the full-hash stage (read failures)
    pub hash_failures: usize,
    /// Number of final duplicate groups
    pub group_count: usize,
    /// Total wasted bytes across all groups
    pub wasted_bytes: u64,
    /// Stage-1 bucketing statistics
    pub grouping: GroupingStats,
}

/// Scan `root` for duplicate files.
///
/// Walks the tree (flat or recursive), runs the three-stage pipeline, and
/// returns the final groups sorted by wasted space, largest first.
///
/// Inaccessible files and hash failures are absorbed: the affected file is
/// skipped and counted in [`ScanStats`], and the scan completes with
/// whatever remains readable.
#[must_use]
pub fn find_duplicates(root: &Path, recursive: bool) -> (Vec<DuplicateGroup>, ScanStats) {
    let mut stats = ScanStats::default();

    // Stage 0: enumerate candidate files.
    let walker = Walker::new(root, recursive);
    let files: Vec<FileEntry> = walker
        .walk()
        .filter_map(|result| match result {
            Ok(file) => Some(file),
            Err(e) => {
                stats.skipped_entries += 1;
                log::debug!("scan: skipping entry: {}", e);
                None
            }
        })
        .collect();

    // Stage 1: size buckets.
    let (buckets, grouping) = group_by_size(files);
    stats.grouping = grouping;

    // Stages 2 and 3: prehash, then full hash, per bucket.
    let hasher = Hasher::new();
    let mut groups: Vec<DuplicateGroup> = Vec::new();

    for (size, bucket) in buckets {
        for candidates in prehash_bucket(&hasher, bucket, &mut stats) {
            full_hash_group(&hasher, size, candidates, &mut stats, &mut groups);
        }
    }

    // Largest reclaimable space first; stable, so ties keep encounter order.
    groups.sort_by(|a, b| b.wasted_space().cmp(&a.wasted_space()));

    stats.group_count = groups.len();
    stats.wasted_bytes = groups.iter().map(DuplicateGroup::wasted_space).sum();

    log::info!(
        "scan complete: {} duplicate group(s), {} wasted byte(s), \
         {} skipped entr(ies), {} hash failure(s)",
        stats.group_count,
        stats.wasted_bytes,
        stats.skipped_entries,
        stats.prehash_failures + stats.hash_failures,
    );

    (groups, stats)
}

/// Stage 2: split one size bucket by prefix digest.
///
/// Returns only the sub-buckets that can still contain duplicates.
fn prehash_bucket(
    hasher: &Hasher,
    bucket: Vec<FileEntry>,
    stats: &mut ScanStats,
) -> Vec<Vec<FileEntry>> {
    let mut by_prehash: HashMap<Hash, Vec<FileEntry>> = HashMap::new();

    for mut file in bucket {
        match hasher.prehash(&file.path) {
            Ok(digest) => {
                file.prehash = Some(digest);
                by_prehash.entry(digest).or_default().push(file);
            }
            Err(e) => {
                stats.prehash_failures += 1;
                log::debug!("prehash failed: {}", e);
            }
        }
    }

    by_prehash
        .into_values()
        .filter(|members| members.len() >= 2)
        .collect()
}

/// Stage 3: split one prehash group by full-content digest and collect the
/// final duplicate groups.
fn full_hash_group(
    hasher: &Hasher,
    size: u64,
    candidates: Vec<FileEntry>,
    stats: &mut ScanStats,
    out: &mut Vec<DuplicateGroup>,
) {
    let mut by_full: HashMap<Hash, Vec<FileEntry>> = HashMap::new();

    for mut file in candidates {
        match hasher.hash_file(&file.path) {
            Ok(digest) => {
                file.full_hash = Some(digest);
                by_full.entry(digest).or_default().push(file);
            }
            Err(e) => {
                stats.hash_failures += 1;
                log::debug!("full hash failed: {}", e);
            }
        }
    }

    for (digest, members) in by_full {
        if members.len() >= 2 {
            out.push(DuplicateGroup::new(digest, size, members));
        }
    }
}
