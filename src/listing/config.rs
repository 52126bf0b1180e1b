//! Configuration types for directory listing

/// Which parts of an entry to show and how to order and traverse entries.
///
/// Built once from the command line and copied into every recursive call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Include names starting with `.` (and the `.`/`..` entries)
    pub show_hidden: bool,
    /// Permissions, link count, owner, group, size and mtime before each name
    pub show_long: bool,
    /// Newest first instead of by name
    pub sort_by_time: bool,
    /// Allocated block count before each name
    pub show_blocks: bool,
    pub recursive: bool,
    pub one_per_line: bool,
}

impl ListOptions {
    /// One entry per line with a tree prefix, as opposed to a single row.
    pub fn line_mode(&self) -> bool {
        self.show_long || self.one_per_line
    }

    /// Whether the listed directory's own path is printed as a header.
    pub fn shows_header(&self) -> bool {
        self.line_mode() || self.recursive
    }
}
