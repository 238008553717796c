//! Deletion actions and space accounting.

pub mod delete;

pub use delete::{
    BatchOutcome, DeletionExecutor, SpaceTracker, SystemTrash, TrashError, TrashService,
};
