//! Reversible deletion through the system trash.
//!
//! # Overview
//!
//! All removals go through a [`TrashService`], so the end user can recover
//! anything this tool deletes. Batch operations are best-effort: a per-item
//! failure is reported and the rest of the batch continues; nothing here
//! aborts the caller's loop.
//!
//! Space accounting charges every successfully removed redundant copy at
//! the group's kept-copy recorded size. That is correct only because all
//! members of a duplicate group are equal-sized by construction.

use std::path::{Path, PathBuf};

use thiserror::Error;
use yansi::Paint;

use crate::duplicates::DuplicateGroup;

/// Error from a trash-service call.
#[derive(Debug, Error)]
pub enum TrashError {
    /// The path no longer exists.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The trash service rejected the request.
    #[error("trash operation failed for {path}: {message}")]
    Failed {
        /// Path that could not be trashed
        path: PathBuf,
        /// Service-reported reason
        message: String,
    },
}

/// Reversible removal capability.
///
/// The binary uses [`SystemTrash`]; tests substitute a fake so no real
/// trash interaction happens.
pub trait TrashService {
    /// Move `path` to a user-recoverable trash.
    ///
    /// # Errors
    ///
    /// Returns [`TrashError`] when the item cannot be moved; callers treat
    /// this as a per-item failure, never as a batch abort.
    fn send_to_trash(&self, path: &Path) -> Result<(), TrashError>;
}

/// The platform recycle bin, via the `trash` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTrash;

impl TrashService for SystemTrash {
    fn send_to_trash(&self, path: &Path) -> Result<(), TrashError> {
        if !path.exists() {
            return Err(TrashError::NotFound(path.to_path_buf()));
        }
        trash::delete(path).map_err(|e| {
            log::warn!("trash operation failed for {}: {}", path.display(), e);
            TrashError::Failed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })
    }
}

/// Running total of bytes reclaimed during this process run.
///
/// Monotonically non-decreasing; incremented only by the deletion executor
/// on confirmed successes and reset only by process restart.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpaceTracker {
    bytes: u64,
}

impl SpaceTracker {
    /// Create a tracker starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record reclaimed bytes.
    pub fn add(&mut self, bytes: u64) {
        self.bytes += bytes;
    }

    /// Total bytes reclaimed so far.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.bytes
    }
}

/// Outcome of one deletion batch.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Paths successfully moved to trash
    pub removed: Vec<PathBuf>,
    /// Failed removals with their reported reasons
    pub failures: Vec<(PathBuf, String)>,
    /// Bytes credited to the space tracker by this batch
    pub bytes_reclaimed: u64,
}

impl BatchOutcome {
    /// Number of successfully removed items.
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    /// Number of failed removals.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub(crate) fn merge(&mut self, other: BatchOutcome) {
        self.removed.extend(other.removed);
        self.failures.extend(other.failures);
        self.bytes_reclaimed += other.bytes_reclaimed;
    }
}

/// Performs reversible removals and keeps the space tracker current.
pub struct DeletionExecutor<'a, T: TrashService + ?Sized> {
    trash: &'a T,
    tracker: &'a mut SpaceTracker,
}

impl<'a, T: TrashService + ?Sized> DeletionExecutor<'a, T> {
    /// Create an executor borrowing the trash service and tracker.
    pub fn new(trash: &'a T, tracker: &'a mut SpaceTracker) -> Self {
        Self { trash, tracker }
    }

    /// Trash every redundant copy of every group in the batch.
    ///
    /// The kept copy (member 0) is never targeted. Each success is charged
    /// at the kept copy's recorded size.
    pub fn delete_groups(&mut self, groups: &[DuplicateGroup]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for group in groups {
            outcome.merge(self.delete_group(group));
        }
        outcome
    }

    fn delete_group(&mut self, group: &DuplicateGroup) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        let size = group.kept().size;

        for file in group.redundant() {
            match self.trash.send_to_trash(&file.path) {
                Ok(()) => {
                    println!("  {} {}", "Trashed:".red(), file.path.display());
                    self.tracker.add(size);
                    outcome.bytes_reclaimed += size;
                    outcome.removed.push(file.path.clone());
                }
                Err(e) => {
                    println!("  {} {}", "Error:".red().bold(), e);
                    outcome.failures.push((file.path.clone(), e.to_string()));
                }
            }
        }

        outcome
    }

    /// Trash a batch of folders.
    ///
    /// Folders carry no recorded size, so nothing is charged to the
    /// tracker.
    pub fn delete_folders(&mut self, folders: &[PathBuf]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        for folder in folders {
            match self.trash.send_to_trash(folder) {
                Ok(()) => {
                    println!("  {} {}", "Removed:".red(), folder.display());
                    outcome.removed.push(folder.clone());
                }
                Err(e) => {
                    println!("  {} {}", "Error:".red().bold(), e);
                    outcome.failures.push((folder.clone(), e.to_string()));
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::FileEntry;
    use std::cell::RefCell;

    /// Records requests; fails any path listed in `reject`.
    #[derive(Default)]
    struct FakeTrash {
        reject: Vec<PathBuf>,
        calls: RefCell<Vec<PathBuf>>,
    }

    impl TrashService for FakeTrash {
        fn send_to_trash(&self, path: &Path) -> Result<(), TrashError> {
            self.calls.borrow_mut().push(path.to_path_buf());
            if self.reject.iter().any(|p| p == path) {
                Err(TrashError::Failed {
                    path: path.to_path_buf(),
                    message: "rejected".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn make_group(size: u64, paths: &[&str]) -> DuplicateGroup {
        let files = paths
            .iter()
            .map(|p| FileEntry::new(PathBuf::from(p), size))
            .collect();
        DuplicateGroup::new([0u8; 32], size, files)
    }

    #[test]
    fn test_kept_copy_never_targeted() {
        let trash = FakeTrash::default();
        let mut tracker = SpaceTracker::new();
        let group = make_group(100, &["/keep", "/dup1", "/dup2"]);

        let outcome = DeletionExecutor::new(&trash, &mut tracker).delete_groups(&[group]);

        assert_eq!(outcome.removed_count(), 2);
        let calls = trash.calls.borrow();
        assert!(!calls.iter().any(|p| p == Path::new("/keep")));
    }

    #[test]
    fn test_success_charged_at_kept_copy_size() {
        let trash = FakeTrash::default();
        let mut tracker = SpaceTracker::new();
        let groups = vec![
            make_group(5 * 1024 * 1024, &["/d1/keep", "/d1/dup"]),
            make_group(1024 * 1024, &["/d2/keep", "/d2/dup1", "/d2/dup2"]),
        ];

        let outcome = DeletionExecutor::new(&trash, &mut tracker).delete_groups(&groups);

        assert_eq!(outcome.removed_count(), 3);
        assert_eq!(tracker.total_bytes(), 7 * 1024 * 1024);
        assert_eq!(outcome.bytes_reclaimed, 7 * 1024 * 1024);
    }

    #[test]
    fn test_failure_continues_batch_and_skips_charge() {
        let trash = FakeTrash {
            reject: vec![PathBuf::from("/dup1")],
            ..FakeTrash::default()
        };
        let mut tracker = SpaceTracker::new();
        let group = make_group(10, &["/keep", "/dup1", "/dup2"]);

        let outcome = DeletionExecutor::new(&trash, &mut tracker).delete_groups(&[group]);

        assert_eq!(outcome.removed_count(), 1);
        assert_eq!(outcome.failure_count(), 1);
        assert_eq!(tracker.total_bytes(), 10);
    }

    #[test]
    fn test_folders_not_charged() {
        let trash = FakeTrash::default();
        let mut tracker = SpaceTracker::new();
        let folders = vec![PathBuf::from("/a"), PathBuf::from("/b")];

        let outcome = DeletionExecutor::new(&trash, &mut tracker).delete_folders(&folders);

        assert_eq!(outcome.removed_count(), 2);
        assert_eq!(outcome.bytes_reclaimed, 0);
        assert_eq!(tracker.total_bytes(), 0);
    }

    #[test]
    fn test_folder_failure_continues() {
        let trash = FakeTrash {
            reject: vec![PathBuf::from("/a")],
            ..FakeTrash::default()
        };
        let mut tracker = SpaceTracker::new();
        let folders = vec![PathBuf::from("/a"), PathBuf::from("/b")];

        let outcome = DeletionExecutor::new(&trash, &mut tracker).delete_folders(&folders);

        assert_eq!(outcome.removed_count(), 1);
        assert_eq!(outcome.failure_count(), 1);
        assert_eq!(outcome.removed, vec![PathBuf::from("/b")]);
    }

    #[test]
    fn test_space_tracker_monotonic() {
        let mut tracker = SpaceTracker::new();
        tracker.add(10);
        tracker.add(0);
        tracker.add(32);
        assert_eq!(tracker.total_bytes(), 42);
    }
}
