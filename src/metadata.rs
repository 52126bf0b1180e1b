//! Per-entry file metadata and owner/group name resolution
//!
//! `FileMetadata` is a snapshot of the handful of `stat` fields the long
//! format needs. Owner and group ids are kept numeric here and turned into
//! names by `NameResolver` at format time.

use std::collections::HashMap;
use std::ffi::CStr;
use std::fs::{self, Metadata};
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

const S_IRUSR: u32 = 0o400;
const S_IWUSR: u32 = 0o200;
const S_IXUSR: u32 = 0o100;
const S_IRGRP: u32 = 0o040;
const S_IWGRP: u32 = 0o020;
const S_IXGRP: u32 = 0o010;
const S_IROTH: u32 = 0o004;
const S_IWOTH: u32 = 0o002;
const S_IXOTH: u32 = 0o001;

/// Largest buffer handed to `getpwuid_r`/`getgrgid_r` before giving up.
const MAX_LOOKUP_BUFFER: usize = 1 << 20;

/// Snapshot of the metadata of one directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMetadata {
    /// Raw `st_mode`
    pub mode: u32,
    pub is_dir: bool,
    pub nlink: u64,
    pub uid: u32,
    pub gid: u32,
    /// Size in bytes
    pub size: u64,
    pub modified: SystemTime,
    /// Allocated blocks in 512-byte units
    pub blocks: u64,
    pub dev: u64,
    pub ino: u64,
}

impl FileMetadata {
    /// Stat a path the way `stat(2)` does, following symlinks.
    ///
    /// A dangling symlink falls back to the metadata of the link itself so it
    /// still shows up in the listing.
    pub fn read(path: &Path) -> io::Result<Self> {
        match fs::metadata(path) {
            Ok(meta) => Ok(Self::from(&meta)),
            Err(err) => {
                let meta = fs::symlink_metadata(path).map_err(|_| err)?;
                log::debug!("{}: using link metadata", path.display());
                Ok(Self::from(&meta))
            }
        }
    }

    /// Whether any of the user, group or other execute bits is set.
    pub fn is_executable(&self) -> bool {
        is_executable(self.mode)
    }

    /// Block count as displayed: the 512-byte count halved.
    pub fn display_blocks(&self) -> u64 {
        self.blocks / 2
    }
}

impl From<&Metadata> for FileMetadata {
    fn from(meta: &Metadata) -> Self {
        Self {
            mode: meta.mode(),
            is_dir: meta.is_dir(),
            nlink: meta.nlink(),
            uid: meta.uid(),
            gid: meta.gid(),
            size: meta.size(),
            modified: meta.modified().unwrap_or(UNIX_EPOCH),
            blocks: meta.blocks(),
            dev: meta.dev(),
            ino: meta.ino(),
        }
    }
}

/// Whether any execute permission bit is set in `mode`.
pub fn is_executable(mode: u32) -> bool {
    mode & (S_IXUSR | S_IXGRP | S_IXOTH) != 0
}

/// Render the 10-character permission column, e.g. `drwxr-xr-x`.
///
/// Only directories get a type letter; everything else shows `-`.
pub fn permission_string(mode: u32, is_dir: bool) -> String {
    const BITS: [(u32, char); 9] = [
        (S_IRUSR, 'r'),
        (S_IWUSR, 'w'),
        (S_IXUSR, 'x'),
        (S_IRGRP, 'r'),
        (S_IWGRP, 'w'),
        (S_IXGRP, 'x'),
        (S_IROTH, 'r'),
        (S_IWOTH, 'w'),
        (S_IXOTH, 'x'),
    ];

    let mut out = String::with_capacity(10);
    out.push(if is_dir { 'd' } else { '-' });
    for (bit, ch) in BITS {
        out.push(if mode & bit != 0 { ch } else { '-' });
    }
    out
}

/// Resolves numeric user and group ids to account names.
///
/// Lookups are cached for the lifetime of the resolver, so a listing of a
/// large directory owned by one user only asks the system once. Ids without
/// an account resolve to their decimal form.
#[derive(Debug, Default)]
pub struct NameResolver {
    users: HashMap<u32, String>,
    groups: HashMap<u32, String>,
}

impl NameResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the user owning `uid`, or the id itself.
    pub fn user(&mut self, uid: u32) -> &str {
        self.users
            .entry(uid)
            .or_insert_with(|| lookup_user(uid).unwrap_or_else(|| uid.to_string()))
    }

    /// Name of the group `gid`, or the id itself.
    pub fn group(&mut self, gid: u32) -> &str {
        self.groups
            .entry(gid)
            .or_insert_with(|| lookup_group(gid).unwrap_or_else(|| gid.to_string()))
    }
}

fn lookup_user(uid: u32) -> Option<String> {
    let mut buf: Vec<libc::c_char> = vec![0; 1024];
    loop {
        // SAFETY: `pwd` and `buf` outlive the call, and `result` is only
        // dereferenced when getpwuid_r reports success with a non-null entry.
        let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
        let mut result: *mut libc::passwd = std::ptr::null_mut();
        let rc = unsafe {
            libc::getpwuid_r(
                uid as libc::uid_t,
                &mut pwd,
                buf.as_mut_ptr(),
                buf.len(),
                &mut result,
            )
        };
        if rc == libc::ERANGE && buf.len() < MAX_LOOKUP_BUFFER {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if rc != 0 || result.is_null() || pwd.pw_name.is_null() {
            return None;
        }
        let name = unsafe { CStr::from_ptr(pwd.pw_name) };
        return Some(name.to_string_lossy().into_owned());
    }
}

fn lookup_group(gid: u32) -> Option<String> {
    let mut buf: Vec<libc::c_char> = vec![0; 1024];
    loop {
        // SAFETY: same contract as getpwuid_r above.
        let mut grp: libc::group = unsafe { std::mem::zeroed() };
        let mut result: *mut libc::group = std::ptr::null_mut();
        let rc = unsafe {
            libc::getgrgid_r(
                gid as libc::gid_t,
                &mut grp,
                buf.as_mut_ptr(),
                buf.len(),
                &mut result,
            )
        };
        if rc == libc::ERANGE && buf.len() < MAX_LOOKUP_BUFFER {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if rc != 0 || result.is_null() || grp.gr_name.is_null() {
            return None;
        }
        let name = unsafe { CStr::from_ptr(grp.gr_name) };
        return Some(name.to_string_lossy().into_owned());
    }
}
