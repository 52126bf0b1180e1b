//! The directory lister: enumerate, order, format and recurse.

use std::io::{self, Write};
use std::path::Path;

use termcolor::WriteColor;

use crate::error::ListError;
use crate::metadata::{FileMetadata, NameResolver};
use crate::output::{
    block_column, format_timestamp, long_columns, tree_prefix, write_header, write_name,
};

use super::config::ListOptions;
use super::entry::{DirEntry, read_names, sort_entries};

/// Where the horizontal row stands in row mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    /// Nothing written since the listing started
    Empty,
    /// Entries written without a closing newline
    Open,
    /// The last thing written was a reported error line
    AfterReport,
}

/// Lists directories to a color-capable writer.
///
/// Directory and entry failures are reported in-band on the same writer and
/// never abort the listing; only write errors on the writer itself are
/// returned.
pub struct DirectoryLister<W: WriteColor> {
    options: ListOptions,
    out: W,
    names: NameResolver,
    /// (device, inode) of every directory on the current descent path
    ancestors: Vec<(u64, u64)>,
    row: Row,
}

impl<W: WriteColor> DirectoryLister<W> {
    pub fn new(options: ListOptions, out: W) -> Self {
        Self {
            options,
            out,
            names: NameResolver::new(),
            ancestors: Vec::new(),
            row: Row::Empty,
        }
    }

    /// Consume the lister and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Full listing of `path`: optional `total` line, optional header, the
    /// entries, and the newline ending a horizontal row.
    pub fn run(&mut self, path: &Path) -> io::Result<()> {
        if self.options.show_long {
            let total = self.count_blocks(path)?;
            writeln!(self.out, "total {}", total)?;
        }
        if self.options.shows_header() {
            write_header(&mut self.out, &path.display().to_string())?;
        }

        self.list(path, 0)?;

        // Row mode always ends with a newline unless an error line already did
        if !self.options.line_mode() && self.row != Row::AfterReport {
            writeln!(self.out)?;
        }
        self.row = Row::Empty;
        self.out.flush()
    }

    /// List the entries of `path` at nesting level `depth`, descending into
    /// subdirectories when recursive.
    pub fn list(&mut self, path: &Path, depth: usize) -> io::Result<()> {
        let names = match read_names(path, self.options.show_hidden) {
            Ok(names) => names,
            Err(err) => return self.report(&err),
        };
        log::debug!("listing {} ({} entries)", path.display(), names.len());

        let mut entries = Vec::with_capacity(names.len());
        for name in &names {
            match DirEntry::load(path, name) {
                Ok(entry) => entries.push(entry),
                Err(err) => self.report(&err)?,
            }
        }
        sort_entries(&mut entries, self.options.sort_by_time);

        let identity = FileMetadata::read(path).ok().map(|m| (m.dev, m.ino));
        if let Some(id) = identity {
            self.ancestors.push(id);
        }
        let result = self.list_entries(&entries, depth);
        if identity.is_some() {
            self.ancestors.pop();
        }
        result
    }

    /// Sum of the halved block counts of the entries of `path`.
    ///
    /// Entries whose metadata cannot be read count as zero. An unopenable
    /// directory is reported and counts as zero.
    pub fn count_blocks(&mut self, path: &Path) -> io::Result<u64> {
        let names = match read_names(path, self.options.show_hidden) {
            Ok(names) => names,
            Err(err) => {
                self.report(&err)?;
                return Ok(0);
            }
        };

        let total: u64 = names
            .iter()
            .filter_map(|name| {
                let entry_path = path.join(name);
                match FileMetadata::read(&entry_path) {
                    Ok(meta) => Some(meta.blocks),
                    Err(err) => {
                        log::debug!("{}: not counted: {}", entry_path.display(), err);
                        None
                    }
                }
            })
            .sum();

        Ok(total / 2)
    }

    fn list_entries(&mut self, entries: &[DirEntry], depth: usize) -> io::Result<()> {
        let count = entries.len();
        for (i, entry) in entries.iter().enumerate() {
            self.write_entry(entry, depth, i + 1 == count)?;

            if self.options.recursive && entry.is_descendable() {
                let id = (entry.metadata.dev, entry.metadata.ino);
                if self.ancestors.contains(&id) {
                    log::warn!(
                        "{}: directory cycle, not descending",
                        entry.full_path.display()
                    );
                    continue;
                }
                self.list(&entry.full_path, depth + 1)?;
            }
        }
        Ok(())
    }

    fn write_entry(&mut self, entry: &DirEntry, depth: usize, is_last: bool) -> io::Result<()> {
        let opts = self.options;
        let meta = &entry.metadata;

        if opts.line_mode() {
            write!(self.out, "{}", tree_prefix(depth, is_last, opts.show_blocks))?;
        }
        if opts.show_blocks {
            write!(self.out, "{}", block_column(meta))?;
        }
        if opts.show_long {
            let owner = self.names.user(meta.uid).to_string();
            let group = self.names.group(meta.gid).to_string();
            let timestamp = format_timestamp(meta.modified);
            write!(self.out, "{}", long_columns(meta, &owner, &group, &timestamp))?;
        }

        write_name(&mut self.out, &entry.name, meta)?;

        if opts.line_mode() {
            writeln!(self.out)
        } else {
            self.row = Row::Open;
            write!(self.out, "  ")
        }
    }

    /// Write a recoverable error on its own line.
    fn report(&mut self, err: &ListError) -> io::Result<()> {
        if let Some(source) = std::error::Error::source(err) {
            log::debug!("{}: {}", err, source);
        }
        if self.row == Row::Open {
            writeln!(self.out)?;
        }
        self.row = Row::AfterReport;
        writeln!(self.out, "{}", err)
    }
}
