//! Paginated review sessions for duplicate groups and empty folders.
//!
//! # State machine
//!
//! A session has a single Browsing state parameterized by a page offset
//! over the live list (page size 10). Commands:
//!
//! - `q`: terminate, leaving remaining items unchanged
//! - `n` / `p`: page forward (no-op on the last page) / backward (floored)
//! - `page`: select every index on the current page
//! - `nuclear`: after explicit confirmation, select every remaining item
//!   and terminate once executed
//! - anything else: fed to the selection parser against the full list
//!   length
//!
//! Selections always resolve against the list as rendered at command
//! entry, and removals apply in descending index order so a shrinking list
//! never invalidates unprocessed indices. Indices are recomputed from the
//! live list on every render, never cached across a mutation.
//!
//! The empty-folder variant does not prune by index after a deletion: it
//! fully re-derives its list, because removing a folder can newly expose a
//! now-empty parent.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use bytesize::ByteSize;
use yansi::{Color, Paint, Painted};

use crate::actions::{DeletionExecutor, SpaceTracker, TrashService};
use crate::duplicates::DuplicateGroup;
use crate::scanner::find_empty_folders;

use super::selection::parse_selection;
use super::{confirm, Prompt};

/// Items shown per page.
pub const PAGE_SIZE: usize = 10;

/// Size above which a group is shown as large (red).
const TIER_LARGE: u64 = 100 * 1024 * 1024;
/// Size above which a group is shown as medium (yellow).
const TIER_MEDIUM: u64 = 10 * 1024 * 1024;

/// Interactively review duplicate groups.
///
/// Drives the Browsing loop over `groups` until the operator quits, the
/// list empties, or a confirmed `nuclear` runs.
pub fn review_duplicates<T, P>(
    groups: &mut Vec<DuplicateGroup>,
    trash: &T,
    tracker: &mut SpaceTracker,
    prompt: &mut P,
) where
    T: TrashService + ?Sized,
    P: Prompt + ?Sized,
{
    let mut offset = 0usize;

    while !groups.is_empty() {
        offset = clamp_offset(offset, groups.len());
        let end = (offset + PAGE_SIZE).min(groups.len());
        render_duplicate_page(groups, offset, end);

        let Some(line) = prompt.read_line("\nSelection > ") else {
            break;
        };
        let cmd = line.trim().to_lowercase();

        match cmd.as_str() {
            "q" => break,
            "n" => {
                if offset + PAGE_SIZE < groups.len() {
                    offset += PAGE_SIZE;
                } else {
                    println!("{}", "You are already on the last page.".yellow());
                }
            }
            "p" => offset = offset.saturating_sub(PAGE_SIZE),
            "nuclear" => {
                let warning = format!(
                    "{}",
                    "WARNING: delete ALL duplicate groups in the entire scan?".red()
                );
                if confirm(prompt, &warning) {
                    DeletionExecutor::new(trash, tracker).delete_groups(groups);
                    groups.clear();
                    break;
                }
            }
            "page" => {
                let indices: BTreeSet<usize> = (offset + 1..=end).collect();
                delete_selected_groups(groups, &indices, trash, tracker);
            }
            other => {
                let indices = parse_selection(other, groups.len());
                if !indices.is_empty() {
                    delete_selected_groups(groups, &indices, trash, tracker);
                }
            }
        }
    }
}

/// Interactively review empty folders.
///
/// Same command surface as the duplicate session, but after any deletion
/// the list is re-derived from the filesystem rather than pruned by index.
pub fn review_empty_folders<T, P>(
    root: &Path,
    recursive: bool,
    folders: &mut Vec<PathBuf>,
    trash: &T,
    tracker: &mut SpaceTracker,
    prompt: &mut P,
) where
    T: TrashService + ?Sized,
    P: Prompt + ?Sized,
{
    let mut offset = 0usize;

    while !folders.is_empty() {
        offset = clamp_offset(offset, folders.len());
        let end = (offset + PAGE_SIZE).min(folders.len());
        render_folder_page(folders, offset, end);

        let Some(line) = prompt.read_line("Selection > ") else {
            break;
        };
        let cmd = line.trim().to_lowercase();

        match cmd.as_str() {
            "q" => break,
            "n" => {
                if offset + PAGE_SIZE < folders.len() {
                    offset += PAGE_SIZE;
                } else {
                    println!("{}", "You are already on the last page.".yellow());
                }
            }
            "p" => offset = offset.saturating_sub(PAGE_SIZE),
            "nuclear" => {
                let warning =
                    format!("{}", "WARNING: delete ALL empty folders in the scan?".red());
                if confirm(prompt, &warning) {
                    DeletionExecutor::new(trash, tracker).delete_folders(folders);
                    *folders = find_empty_folders(root, recursive);
                    break;
                }
            }
            "page" => {
                let indices: BTreeSet<usize> = (offset + 1..=end).collect();
                delete_selected_folders(root, recursive, folders, &indices, trash, tracker);
            }
            other => {
                let indices = parse_selection(other, folders.len());
                if !indices.is_empty() {
                    delete_selected_folders(root, recursive, folders, &indices, trash, tracker);
                }
            }
        }
    }
}

/// Resolve indices against the current list snapshot, delete, then remove
/// the entries in descending order.
fn delete_selected_groups<T: TrashService + ?Sized>(
    groups: &mut Vec<DuplicateGroup>,
    indices: &BTreeSet<usize>,
    trash: &T,
    tracker: &mut SpaceTracker,
) {
    let selected: Vec<DuplicateGroup> = indices.iter().map(|&i| groups[i - 1].clone()).collect();
    DeletionExecutor::new(trash, tracker).delete_groups(&selected);

    for &i in indices.iter().rev() {
        groups.remove(i - 1);
    }
}

/// Delete the selected folders, then rebuild the whole list from the
/// filesystem so newly exposed parents show up.
fn delete_selected_folders<T: TrashService + ?Sized>(
    root: &Path,
    recursive: bool,
    folders: &mut Vec<PathBuf>,
    indices: &BTreeSet<usize>,
    trash: &T,
    tracker: &mut SpaceTracker,
) {
    let selected: Vec<PathBuf> = indices.iter().map(|&i| folders[i - 1].clone()).collect();
    DeletionExecutor::new(trash, tracker).delete_folders(&selected);
    *folders = find_empty_folders(root, recursive);
}

/// Keep the offset on a valid page of a non-empty list.
fn clamp_offset(offset: usize, len: usize) -> usize {
    let last_page_start = ((len - 1) / PAGE_SIZE) * PAGE_SIZE;
    offset.min(last_page_start)
}

fn tier_color(size: u64) -> Color {
    if size > TIER_LARGE {
        Color::Red
    } else if size > TIER_MEDIUM {
        Color::Yellow
    } else {
        Color::Green
    }
}

fn render_duplicate_page(groups: &[DuplicateGroup], offset: usize, end: usize) {
    let total_pages = (groups.len() + PAGE_SIZE - 1) / PAGE_SIZE;
    let page = offset / PAGE_SIZE + 1;
    let header = format!(
        "=== REVIEWING DUPLICATES {}-{} of {} (page {}/{}) ===",
        offset + 1,
        end,
        groups.len(),
        page,
        total_pages
    );
    println!("\n{}", header.cyan().bold());

    for (i, group) in groups[offset..end].iter().enumerate() {
        let label = format!(
            "[{}] {} copies - {} each",
            offset + i + 1,
            group.len(),
            ByteSize(group.size)
        );
        println!("\n{}", Painted::new(label).fg(tier_color(group.size)).bold());
        for file in &group.files {
            println!("    -> {}", file.path.display());
        }
    }

    println!("\n{}", "COMMAND OPTIONS:".bold());
    println!("  {}  -> delete selected groups", "1 3 5-7".yellow());
    println!("  {}     -> delete every group on this page", "page".yellow());
    println!("  {}  -> delete ALL duplicates in the scan", "nuclear".yellow());
    println!("  {}        -> next page", "n".yellow());
    println!("  {}        -> previous page", "p".yellow());
    println!("  {}        -> back to main menu", "q".yellow());
}

fn render_folder_page(folders: &[PathBuf], offset: usize, end: usize) {
    let total_pages = (folders.len() + PAGE_SIZE - 1) / PAGE_SIZE;
    let page = offset / PAGE_SIZE + 1;
    let header = format!(
        "--- EMPTY FOLDERS {}-{} of {} (page {}/{}) ---",
        offset + 1,
        end,
        folders.len(),
        page,
        total_pages
    );
    println!("\n{}", header.cyan());

    for (i, folder) in folders[offset..end].iter().enumerate() {
        println!("[{}] {}", offset + i + 1, folder.display());
    }

    println!(
        "\n{} [indices], [page], [nuclear], [n] next, [p] previous, [q] back",
        "COMMANDS:".bold()
    );
}
