//! Test utilities for building temporary directory trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs::{self, File};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tempfile::TempDir;

/// A temporary directory tree for testing.
///
/// The directory is removed when dropped.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add a file with mode 0755.
    pub fn add_executable(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.add_file(path, content);
        fs::set_permissions(&full_path, fs::Permissions::from_mode(0o755))
            .expect("Failed to set permissions");
        full_path
    }

    /// Add an empty directory (and its parents).
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Set a file's modification time to `secs` seconds after the epoch.
    pub fn set_mtime(&self, path: &str, secs: u64) {
        let file = File::options()
            .write(true)
            .open(self.dir.path().join(path))
            .expect("Failed to open file");
        let time: SystemTime = UNIX_EPOCH + Duration::from_secs(secs);
        file.set_modified(time).expect("Failed to set mtime");
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}
