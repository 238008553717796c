//! Duplicate groups and size-based bucketing.
//!
//! # Overview
//!
//! Size bucketing is the first stage of duplicate detection: files with
//! different sizes cannot be duplicates, so any size bucket with fewer
//! than two members is discarded before a single byte of content is read.

use std::collections::HashMap;

use crate::scanner::{FileEntry, Hash};

/// Confirmed group of byte-identical files.
///
/// All members share the same size and full-content digest, and the group
/// always has at least two members by construction. Member 0 is the
/// designated kept copy; the rest are redundant and eligible for deletion.
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    /// Full-content BLAKE3 digest shared by every member
    pub hash: Hash,
    /// File size in bytes shared by every member
    pub size: u64,
    /// Member files; element 0 is the kept copy
    pub files: Vec<FileEntry>,
}

impl DuplicateGroup {
    /// Create a new duplicate group.
    #[must_use]
    pub fn new(hash: Hash, size: u64, files: Vec<FileEntry>) -> Self {
        debug_assert!(files.len() >= 2, "duplicate group needs >= 2 members");
        debug_assert!(files.iter().all(|f| f.size == size));
        Self { hash, size, files }
    }

    /// Number of copies in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True if the group has no members (never the case by construction).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// The single retained member; never a deletion target.
    #[must_use]
    pub fn kept(&self) -> &FileEntry {
        &self.files[0]
    }

    /// The members eligible for deletion (everything but the kept copy).
    #[must_use]
    pub fn redundant(&self) -> &[FileEntry] {
        &self.files[1..]
    }

    /// Bytes freed by keeping exactly one copy: size * (copies - 1).
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * (self.files.len() as u64 - 1)
    }
}

/// Statistics from the size-bucketing stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Total number of files processed
    pub total_files: usize,
    /// Total size of all files in bytes
    pub total_size: u64,
    /// Number of distinct file sizes seen
    pub unique_sizes: usize,
    /// Number of files eliminated as the sole holder of their size
    pub eliminated_unique: usize,
    /// Number of files that could still be duplicates (buckets of 2+)
    pub potential_duplicates: usize,
    /// Number of size buckets with 2+ files
    pub duplicate_buckets: usize,
}

impl GroupingStats {
    /// Percentage of files eliminated without any content I/O.
    #[must_use]
    pub fn elimination_rate(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            (self.eliminated_unique as f64 / self.total_files as f64) * 100.0
        }
    }
}

/// Bucket files by exact byte size (stage 1 of duplicate detection).
///
/// Only buckets with two or more members are returned; a singleton cannot
/// contain duplicates. Zero-byte files participate like any other size -
/// their wasted-space score is 0 so they sort last in the final list.
///
/// No file content is read; this stage costs O(n) over metadata already
/// gathered by the walker.
#[must_use]
pub fn group_by_size(
    files: impl IntoIterator<Item = FileEntry>,
) -> (HashMap<u64, Vec<FileEntry>>, GroupingStats) {
    let mut buckets: HashMap<u64, Vec<FileEntry>> = HashMap::new();
    let mut stats = GroupingStats::default();

    for file in files {
        stats.total_files += 1;
        stats.total_size += file.size;
        buckets.entry(file.size).or_default().push(file);
    }

    stats.unique_sizes = buckets.len();

    let buckets: HashMap<u64, Vec<FileEntry>> = buckets
        .into_iter()
        .filter(|(size, members)| {
            if members.len() < 2 {
                stats.eliminated_unique += 1;
                log::trace!(
                    "eliminated unique size {}: {}",
                    size,
                    members[0].path.display()
                );
                false
            } else {
                stats.potential_duplicates += members.len();
                stats.duplicate_buckets += 1;
                log::debug!(
                    "size bucket {} bytes: {} potential duplicates",
                    size,
                    members.len()
                );
                true
            }
        })
        .collect();

    log::info!(
        "size bucketing: {} files -> {} potential duplicates ({:.1}% eliminated)",
        stats.total_files,
        stats.potential_duplicates,
        stats.elimination_rate()
    );

    (buckets, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn make_file(path: &str, size: u64) -> FileEntry {
        FileEntry::new(PathBuf::from(path), size)
    }

    #[test]
    fn test_duplicate_group_kept_and_redundant() {
        let group = DuplicateGroup::new(
            [0u8; 32],
            1000,
            vec![
                make_file("/a.txt", 1000),
                make_file("/b.txt", 1000),
                make_file("/c.txt", 1000),
            ],
        );

        assert_eq!(group.kept().path, PathBuf::from("/a.txt"));
        assert_eq!(group.redundant().len(), 2);
        assert_eq!(group.wasted_space(), 2000);
    }

    #[test]
    fn test_duplicate_group_pair() {
        let group = DuplicateGroup::new(
            [0u8; 32],
            512,
            vec![make_file("/x", 512), make_file("/y", 512)],
        );

        assert_eq!(group.len(), 2);
        assert_eq!(group.wasted_space(), 512);
    }

    #[test]
    fn test_group_by_size_empty_input() {
        let (buckets, stats) = group_by_size(Vec::new());

        assert!(buckets.is_empty());
        assert_eq!(stats, GroupingStats::default());
    }

    #[test]
    fn test_group_by_size_all_unique() {
        let files = vec![
            make_file("/a.txt", 100),
            make_file("/b.txt", 200),
            make_file("/c.txt", 300),
        ];
        let (buckets, stats) = group_by_size(files);

        assert!(buckets.is_empty());
        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.unique_sizes, 3);
        assert_eq!(stats.eliminated_unique, 3);
        assert_eq!(stats.potential_duplicates, 0);
    }

    #[test]
    fn test_group_by_size_with_duplicates() {
        let files = vec![
            make_file("/a.txt", 100),
            make_file("/b.txt", 100),
            make_file("/c.txt", 200),
        ];
        let (buckets, stats) = group_by_size(files);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[&100].len(), 2);

        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.eliminated_unique, 1);
        assert_eq!(stats.potential_duplicates, 2);
        assert_eq!(stats.duplicate_buckets, 1);
    }

    #[test]
    fn test_group_by_size_keeps_zero_byte_files() {
        let files = vec![
            make_file("/empty1", 0),
            make_file("/empty2", 0),
            make_file("/other", 10),
        ];
        let (buckets, stats) = group_by_size(files);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[&0].len(), 2);
        assert_eq!(stats.eliminated_unique, 1);
    }

    #[test]
    fn test_elimination_rate() {
        let files = vec![
            make_file("/a.txt", 100),
            make_file("/b.txt", 100),
            make_file("/c.txt", 200),
            make_file("/d.txt", 300),
        ];
        let (_, stats) = group_by_size(files);

        // 2 unique sizes eliminated out of 4 files = 50%
        assert!((stats.elimination_rate() - 50.0).abs() < 0.1);
    }

    #[test]
    fn test_elimination_rate_empty() {
        assert_eq!(GroupingStats::default().elimination_rate(), 0.0);
    }
}
