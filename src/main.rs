//! CLI entry point for leaf

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Parser, ValueEnum};
use termcolor::BufferedStandardStream;

use leaf::{DirectoryLister, ListError, ListOptions, OutputConfig};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Color when stdout is a terminal
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and terminal attachment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    }
}

#[derive(Parser, Debug)]
#[command(name = "leaf")]
#[command(about = "List directory contents, optionally as a tree")]
#[command(version)]
#[command(args_override_self = true)]
struct Args {
    /// Directory to list; when several are given the last one wins
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Long format: permissions, links, owner, group, size and modification time
    #[arg(short = 'l')]
    long: bool,

    /// List subdirectories recursively
    #[arg(short = 'R')]
    recursive: bool,

    /// Include entries starting with '.'
    #[arg(short = 'a')]
    all: bool,

    /// Sort by modification time, newest first
    #[arg(short = 't')]
    time: bool,

    /// Show allocated blocks for each entry
    #[arg(short = 's')]
    size: bool,

    /// One entry per line
    #[arg(short = '1')]
    one_per_line: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,
}

impl Args {
    fn target(&self) -> PathBuf {
        self.paths.last().cloned().unwrap_or_else(|| PathBuf::from("."))
    }

    fn list_options(&self) -> ListOptions {
        ListOptions {
            show_hidden: self.all,
            show_long: self.long,
            sort_by_time: self.time,
            show_blocks: self.size,
            recursive: self.recursive,
            one_per_line: self.one_per_line,
        }
    }
}

/// The offending character of an unknown short flag, e.g. `z` for `-lz`.
fn invalid_flag(err: &clap::Error) -> Option<char> {
    if err.kind() != ErrorKind::UnknownArgument {
        return None;
    }
    match err.get(ContextKind::InvalidArg)? {
        ContextValue::String(arg) => {
            let rest = arg.strip_prefix('-')?;
            if rest.starts_with('-') {
                return None;
            }
            rest.chars().next()
        }
        _ => None,
    }
}

fn parse_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                if let Some(c) = invalid_flag(&e) {
                    println!("{}", ListError::InvalidFlag(c));
                } else {
                    eprintln!("leaf: argument parsing error: {}", e);
                }
                process::exit(1);
            }
        },
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = parse_args();
    let options = args.list_options();
    let output = OutputConfig {
        use_color: should_use_color(args.color),
    };
    log::debug!("{:?}, {:?}", options, output);

    let stdout = BufferedStandardStream::stdout(output.color_choice());
    let mut lister = DirectoryLister::new(options, stdout);

    if let Err(e) = lister.run(&args.target()) {
        eprintln!("leaf: {}", ListError::from(e));
        process::exit(1);
    }
}
