//! Leaf - a small `ls` that can draw its recursive listings as a tree

pub mod error;
pub mod listing;
pub mod metadata;
pub mod output;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::ListError;
pub use listing::{DirEntry, DirectoryLister, ListOptions};
pub use metadata::{FileMetadata, NameResolver};
pub use output::OutputConfig;
