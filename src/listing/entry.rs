//! Directory enumeration, hidden-entry filtering and ordering

use std::ffi::{OsStr, OsString};
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use crate::error::{ListError, Result};
use crate::metadata::FileMetadata;

/// One entry of a directory listing together with its metadata.
#[derive(Debug, Clone)]
pub struct DirEntry {
    /// Name as stored on disk
    pub file_name: OsString,
    /// Printable form of `file_name`
    pub name: String,
    pub full_path: PathBuf,
    pub metadata: FileMetadata,
}

impl DirEntry {
    /// Stat `name` inside `dir`.
    pub fn load(dir: &Path, name: &OsStr) -> Result<Self> {
        let full_path = dir.join(name);
        let metadata =
            FileMetadata::read(&full_path).map_err(|source| ListError::EntryMetadata {
                path: full_path.clone(),
                source,
            })?;
        Ok(Self {
            file_name: name.to_os_string(),
            name: name.to_string_lossy().into_owned(),
            full_path,
            metadata,
        })
    }

    /// Whether the lister should descend into this entry.
    pub fn is_descendable(&self) -> bool {
        self.metadata.is_dir && !is_dot_entry(&self.file_name)
    }
}

/// Names starting with `.` are hidden unless `-a` is given.
pub fn is_hidden(name: &OsStr) -> bool {
    name.as_bytes().first() == Some(&b'.')
}

/// The self and parent links, which are shown but never descended into.
pub fn is_dot_entry(name: &OsStr) -> bool {
    name == "." || name == ".."
}

/// Read the entry names of `dir`, dropping hidden ones unless `show_hidden`.
///
/// `read_dir` never yields `.` and `..`; they are added here when hidden
/// entries are requested so the listing matches what `readdir` produces.
pub fn read_names(dir: &Path, show_hidden: bool) -> Result<Vec<OsString>> {
    let entries = fs::read_dir(dir).map_err(|source| ListError::DirectoryOpen {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut names = Vec::new();
    if show_hidden {
        names.push(OsString::from("."));
        names.push(OsString::from(".."));
    }

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                log::debug!("{}: skipping unreadable entry: {}", dir.display(), err);
                continue;
            }
        };
        let name = entry.file_name();
        if !show_hidden && is_hidden(&name) {
            continue;
        }
        names.push(name);
    }

    Ok(names)
}

/// Order entries by name, or newest first when `by_time` is set.
///
/// Entries with equal modification times fall back to name order so the
/// output is reproducible.
pub fn sort_entries(entries: &mut [DirEntry], by_time: bool) {
    if by_time {
        entries.sort_by(|a, b| {
            b.metadata
                .modified
                .cmp(&a.metadata.modified)
                .then_with(|| by_name(a, b))
        });
    } else {
        entries.sort_by(by_name);
    }
}

fn by_name(a: &DirEntry, b: &DirEntry) -> std::cmp::Ordering {
    a.file_name.as_bytes().cmp(b.file_name.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::TempDir;

    fn entry(name: &str, mtime_secs: u64) -> DirEntry {
        DirEntry {
            file_name: OsString::from(name),
            name: name.to_string(),
            full_path: PathBuf::from(name),
            metadata: FileMetadata {
                mode: 0o644,
                is_dir: false,
                nlink: 1,
                uid: 0,
                gid: 0,
                size: 0,
                modified: UNIX_EPOCH + Duration::from_secs(mtime_secs),
                blocks: 0,
                dev: 0,
                ino: 0,
            },
        }
    }

    fn names(entries: &[DirEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_sort_by_name_is_bytewise() {
        let mut entries = vec![entry("b.txt", 0), entry("B.txt", 0), entry("a.txt", 0)];
        sort_entries(&mut entries, false);
        assert_eq!(names(&entries), vec!["B.txt", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_sort_by_time_newest_first() {
        let mut entries = vec![entry("old", 10), entry("new", 30), entry("mid", 20)];
        sort_entries(&mut entries, true);
        assert_eq!(names(&entries), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_sort_by_time_ties_by_name() {
        let mut entries = vec![entry("c", 5), entry("a", 5), entry("b", 9)];
        sort_entries(&mut entries, true);
        assert_eq!(names(&entries), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_hidden_and_dot_entries() {
        assert!(is_hidden(OsStr::new(".git")));
        assert!(is_hidden(OsStr::new(".")));
        assert!(!is_hidden(OsStr::new("a.txt")));
        assert!(is_hidden(OsStr::from_bytes(b".\xff")));
        assert!(is_dot_entry(OsStr::new(".")));
        assert!(is_dot_entry(OsStr::new("..")));
        assert!(!is_dot_entry(OsStr::new("...")));
        assert!(!is_dot_entry(OsStr::new(".hidden")));
    }

    #[test]
    fn test_read_names_filters_hidden() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        fs::write(dir.path().join(".hidden"), "").unwrap();

        let names = read_names(dir.path(), false).unwrap();
        assert_eq!(names, vec![OsString::from("a.txt")]);
    }

    #[test]
    fn test_read_names_with_hidden_adds_dot_entries() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".hidden"), "").unwrap();

        let mut names = read_names(dir.path(), true).unwrap();
        names.sort();
        assert_eq!(
            names,
            vec![OsString::from("."), OsString::from(".."), OsString::from(".hidden")]
        );
    }

    #[test]
    fn test_read_names_keeps_non_utf8_bytes() {
        let dir = TempDir::new().unwrap();
        let raw = OsStr::from_bytes(b"b\xff.txt");
        fs::write(dir.path().join(raw), "").unwrap();

        let names = read_names(dir.path(), false).unwrap();
        assert_eq!(names, vec![raw.to_os_string()]);

        let entry = DirEntry::load(dir.path(), raw).unwrap();
        assert_eq!(entry.file_name.as_os_str(), raw);
        assert_eq!(entry.name, "b\u{FFFD}.txt");
        assert!(entry.full_path.exists());
    }

    #[test]
    fn test_sort_by_name_uses_raw_bytes() {
        let mut high = entry("x", 0);
        high.file_name = OsStr::from_bytes(b"\xfe").to_os_string();
        high.name = "\u{FFFD}".to_string();
        // U+FFFD encodes as EF BF BD, which sorts before FE
        let mut entries = vec![high, entry("\u{FFFD}", 0), entry("a", 0)];
        sort_entries(&mut entries, false);
        assert_eq!(entries[0].name, "a");
        assert_eq!(entries[1].file_name.as_os_str(), OsStr::new("\u{FFFD}"));
        assert_eq!(entries[2].file_name.as_bytes(), b"\xfe");
    }

    #[test]
    fn test_read_names_missing_dir() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let err = read_names(&missing, false).unwrap_err();
        assert!(matches!(err, ListError::DirectoryOpen { .. }));
    }

    #[test]
    fn test_read_names_on_file_fails() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file");
        fs::write(&file, "x").unwrap();
        assert!(read_names(&file, false).is_err());
    }

    #[test]
    fn test_dot_entries_are_not_descendable() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let load = |name: &str| DirEntry::load(dir.path(), OsStr::new(name)).unwrap();
        assert!(load("sub").is_descendable());
        assert!(!load(".").is_descendable());
        assert!(!load("..").is_descendable());
    }

    #[test]
    fn test_load_missing_entry() {
        let dir = TempDir::new().unwrap();
        let err = DirEntry::load(dir.path(), OsStr::new("gone")).unwrap_err();
        assert!(matches!(err, ListError::EntryMetadata { .. }));
    }
}
