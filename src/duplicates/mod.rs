//! Duplicate detection: size bucketing, prehash, and full-hash grouping.

pub mod finder;
pub mod groups;

pub use finder::{find_duplicates, ScanStats};
pub use groups::{group_by_size, DuplicateGroup, GroupingStats};
