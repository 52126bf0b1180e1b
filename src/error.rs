//! Error kinds for listing and argument handling

use std::io;
use std::path::PathBuf;

/// Errors that can occur while listing a directory.
///
/// The lister writes `DirectoryOpen` and `EntryMetadata` to the output stream
/// and carries on with the next sibling. `InvalidFlag` and `Io` end the
/// program.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("Cannot open directory: {}", path.display())]
    DirectoryOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot access: {}", path.display())]
    EntryMetadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid option: {0}")]
    InvalidFlag(char),

    #[error("error writing output: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ListError>;
