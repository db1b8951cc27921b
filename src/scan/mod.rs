//! Turns the flat record list into a nested folder tree.
//!
//! There is no insertion phase: the hierarchy is produced by repeatedly
//! partitioning the records still unplaced, directory by directory.
//! Records a folder cannot account for come back as orphan diagnostics
//! instead of being dropped.

mod split;
mod tree;

pub use split::{SplitResult, split_records};
pub use tree::{FolderNode, OrphanDiagnostic};
