//! Directory listing
//!
//! `DirectoryLister` reads one directory at a time, orders its entries, writes
//! one formatted item per entry and recurses into subdirectories when asked.
//! Entries are collected in memory per directory; only the current descent
//! path is held at any time.

mod config;
mod entry;
mod lister;

pub use config::ListOptions;
pub use entry::{DirEntry, is_dot_entry, is_hidden, read_names, sort_entries};
pub use lister::DirectoryLister;
