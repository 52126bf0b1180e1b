//! Plain-text pieces of an entry line: tree prefix, block column, long columns

use std::fmt::Display;
use std::time::SystemTime;

use chrono::{DateTime, Local, TimeZone};

use crate::metadata::{FileMetadata, permission_string};

/// Width of a rendered timestamp, e.g. `Thu Jan  1 00:00:00 1970`.
pub const TIMESTAMP_WIDTH: usize = 24;

const TIMESTAMP_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Guides and branch connector drawn before an entry in line mode.
///
/// Each level of nesting adds a `│   ` guide, widened by four spaces when
/// the block column is shown so the guides line up under the names.
pub fn tree_prefix(depth: usize, is_last: bool, show_blocks: bool) -> String {
    let mut prefix = String::new();
    for _ in 0..depth {
        prefix.push_str("│   ");
        if show_blocks {
            prefix.push_str("    ");
        }
    }
    prefix.push_str(if is_last { "└── " } else { "├── " });
    prefix
}

/// Right-aligned block count followed by a space.
pub fn block_column(meta: &FileMetadata) -> String {
    format!("{:>4} ", meta.display_blocks())
}

/// Modification time in local time, `ctime` style.
pub fn format_timestamp(time: SystemTime) -> String {
    format_timestamp_in(time, &Local)
}

/// Modification time rendered in the given time zone.
pub fn format_timestamp_in<Tz>(time: SystemTime, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let utc: DateTime<chrono::Utc> = time.into();
    let rendered = utc.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string();
    rendered.chars().take(TIMESTAMP_WIDTH).collect()
}

/// The long-format columns that precede the name, trailing space included.
pub fn long_columns(meta: &FileMetadata, owner: &str, group: &str, timestamp: &str) -> String {
    format!(
        "{} {:>4} {:>8} {:>8} {:>8} {} ",
        permission_string(meta.mode, meta.is_dir),
        meta.nlink,
        owner,
        group,
        meta.size,
        timestamp
    )
}
