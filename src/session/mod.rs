//! Interactive session: operator input, top-level menu, and auto clean.
//!
//! All interactive input flows through the [`Prompt`] trait so the review
//! state machines can be driven by scripted input in tests; the binary
//! uses [`StdinPrompt`]. Everything here runs on the one logical thread -
//! the lists and the space tracker have no concurrent readers.

pub mod review;
pub mod selection;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use bytesize::ByteSize;
use yansi::Paint;

use crate::actions::{BatchOutcome, DeletionExecutor, SpaceTracker, TrashService};
use crate::duplicates::{find_duplicates, DuplicateGroup};
use crate::scanner::find_empty_folders;

pub use review::{review_duplicates, review_empty_folders, PAGE_SIZE};
pub use selection::parse_selection;

/// Source of operator input.
pub trait Prompt {
    /// Display `prompt` and read one line. `None` means end of input and
    /// is treated like quitting the current loop.
    fn read_line(&mut self, prompt: &str) -> Option<String>;
}

/// Stdin-backed prompt used by the binary.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        io::stdout().flush().ok()?;

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(e) => {
                log::warn!("stdin read failed: {}", e);
                None
            }
        }
    }
}

/// Ask a yes/no question; only an explicit `y` answers yes.
pub(crate) fn confirm<P: Prompt + ?Sized>(prompt: &mut P, message: &str) -> bool {
    match prompt.read_line(&format!("{message} (y/n): ")) {
        Some(line) => line.trim().eq_ignore_ascii_case("y"),
        None => false,
    }
}

/// Delete every duplicate and every empty folder under `root` without
/// per-item review.
///
/// All redundant copies are trashed first, then the empty-folder list is
/// re-derived and deleted repeatedly until a pass finds nothing - removing
/// files or folders can newly empty a parent that only a fresh scan sees.
/// A pass that removes nothing also stops the loop, so persistent trash
/// failures cannot spin it forever.
pub fn full_auto_clean<T: TrashService + ?Sized>(
    root: &Path,
    recursive: bool,
    groups: &mut Vec<DuplicateGroup>,
    trash: &T,
    tracker: &mut SpaceTracker,
) -> BatchOutcome {
    let mut outcome = DeletionExecutor::new(trash, tracker).delete_groups(groups);
    groups.clear();

    loop {
        let empties = find_empty_folders(root, recursive);
        if empties.is_empty() {
            break;
        }
        let pass = DeletionExecutor::new(trash, tracker).delete_folders(&empties);
        let progressed = pass.removed_count() > 0;
        outcome.merge(pass);
        if !progressed {
            break;
        }
    }

    outcome
}

/// Application context: the two review lists, the space tracker, and the
/// collaborators they act through.
pub struct App<T: TrashService, P: Prompt> {
    root: PathBuf,
    recursive: bool,
    duplicates: Vec<DuplicateGroup>,
    empty_folders: Vec<PathBuf>,
    tracker: SpaceTracker,
    trash: T,
    prompt: P,
}

impl<T: TrashService, P: Prompt> App<T, P> {
    /// Create an app for `root`; no scanning happens until [`App::run`].
    pub fn new(root: PathBuf, recursive: bool, trash: T, prompt: P) -> Self {
        Self {
            root,
            recursive,
            duplicates: Vec::new(),
            empty_folders: Vec::new(),
            tracker: SpaceTracker::new(),
            trash,
            prompt,
        }
    }

    /// Scan, then drive the top-level menu until the operator exits.
    pub fn run(&mut self) -> Result<()> {
        println!("{}", "Scanning...".cyan());
        self.rescan();

        loop {
            self.render_menu();
            let Some(line) = self.prompt.read_line("> ") else {
                break;
            };

            match line.trim() {
                "1" => {
                    review_duplicates(
                        &mut self.duplicates,
                        &self.trash,
                        &mut self.tracker,
                        &mut self.prompt,
                    );
                    // Trashing files can newly empty their folders.
                    self.empty_folders = find_empty_folders(&self.root, self.recursive);
                }
                "2" => review_empty_folders(
                    &self.root,
                    self.recursive,
                    &mut self.empty_folders,
                    &self.trash,
                    &mut self.tracker,
                    &mut self.prompt,
                ),
                "3" => self.auto_clean(),
                "4" => {
                    println!("{}", "Rescanning...".cyan());
                    self.rescan();
                }
                "5" => break,
                _ => {}
            }
        }

        let farewell = format!(
            "Final space recovered: {}. Goodbye!",
            ByteSize(self.tracker.total_bytes())
        );
        println!("\n{}", farewell.green().bold());
        Ok(())
    }

    /// Rebuild both lists from the filesystem. Any indices the operator
    /// saw before this call are invalid afterward.
    fn rescan(&mut self) {
        let (groups, stats) = find_duplicates(&self.root, self.recursive);
        self.duplicates = groups;
        self.empty_folders = find_empty_folders(&self.root, self.recursive);

        if stats.skipped_entries > 0 {
            println!(
                "{}",
                format!("Skipped {} unreadable entr(ies).", stats.skipped_entries).yellow()
            );
        }
    }

    fn auto_clean(&mut self) {
        let warning = format!(
            "{}",
            "WARNING: delete ALL duplicates and ALL empty folders?".red()
        );
        if !confirm(&mut self.prompt, &warning) {
            return;
        }

        let outcome = full_auto_clean(
            &self.root,
            self.recursive,
            &mut self.duplicates,
            &self.trash,
            &mut self.tracker,
        );
        self.empty_folders = find_empty_folders(&self.root, self.recursive);

        println!(
            "Auto clean removed {} item(s), {} failure(s).",
            outcome.removed_count(),
            outcome.failure_count()
        );
    }

    fn render_menu(&self) {
        let title = format!("===== CLEANSCAN: {} =====", self.root.display());
        println!("\n{}", title.cyan().bold());
        println!(
            "Duplicate groups: {} | Empty folders: {}",
            self.duplicates.len().yellow(),
            self.empty_folders.len().yellow()
        );
        println!(
            "Total space recovered: {}",
            ByteSize(self.tracker.total_bytes()).green()
        );
        println!("{}", "-".repeat(40));
        println!("1) Review duplicates (largest first)");
        println!("2) Review empty folders");
        println!("3) Full auto clean");
        println!("4) Refresh scan");
        println!("5) Exit");
    }
}
