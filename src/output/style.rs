//! Colored rendering of entry names and the header line

use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

use crate::metadata::FileMetadata;

/// Color for an entry name: bold blue for directories, bold green for
/// executables, nothing otherwise.
pub fn name_color(meta: &FileMetadata) -> Option<ColorSpec> {
    let color = if meta.is_dir {
        Color::Blue
    } else if meta.is_executable() {
        Color::Green
    } else {
        return None;
    };
    let mut spec = ColorSpec::new();
    spec.set_fg(Some(color)).set_bold(true);
    Some(spec)
}

/// Write an entry name, colored when the stream supports it.
pub fn write_name<W: WriteColor>(out: &mut W, name: &str, meta: &FileMetadata) -> io::Result<()> {
    match name_color(meta) {
        Some(spec) => {
            out.set_color(&spec)?;
            write!(out, "{}", name)?;
            out.reset()
        }
        None => write!(out, "{}", name),
    }
}

/// Write the listed directory's path on its own line, in blue.
pub fn write_header<W: WriteColor>(out: &mut W, path: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)))?;
    write!(out, "{}", path)?;
    out.reset()?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::UNIX_EPOCH;
    use termcolor::Buffer;

    fn meta(mode: u32, is_dir: bool) -> FileMetadata {
        FileMetadata {
            mode,
            is_dir,
            nlink: 1,
            uid: 0,
            gid: 0,
            size: 0,
            modified: UNIX_EPOCH,
            blocks: 0,
            dev: 0,
            ino: 0,
        }
    }

    fn render(name: &str, meta: &FileMetadata, mut buf: Buffer) -> String {
        write_name(&mut buf, name, meta).unwrap();
        String::from_utf8(buf.into_inner()).unwrap()
    }

    #[test]
    fn test_plain_buffer_has_no_escapes() {
        let out = render("src", &meta(0o755, true), Buffer::no_color());
        assert_eq!(out, "src");
    }

    #[test]
    fn test_directory_is_blue() {
        let out = render("src", &meta(0o755, true), Buffer::ansi());
        assert!(out.contains("\x1b[34m"), "got {:?}", out);
        assert!(out.contains("\x1b[1m"), "got {:?}", out);
        assert!(out.contains("src"));
        assert!(out.ends_with("\x1b[0m"));
    }

    #[test]
    fn test_executable_is_green() {
        let out = render("run.sh", &meta(0o744, false), Buffer::ansi());
        assert!(out.contains("\x1b[32m"), "got {:?}", out);
    }

    #[test]
    fn test_regular_file_uncolored_even_on_ansi() {
        let out = render("notes.txt", &meta(0o644, false), Buffer::ansi());
        assert_eq!(out, "notes.txt");
    }

    #[test]
    fn test_header_plain() {
        let mut buf = Buffer::no_color();
        write_header(&mut buf, "./src").unwrap();
        assert_eq!(String::from_utf8(buf.into_inner()).unwrap(), "./src\n");
    }
}
