//! Command-line interface definitions for dupe-handler.
//!
//! The tool takes exactly one positional argument, the directory to scan.
//! Everything else about a run (suffix filter, sort order, what to delete)
//! is asked interactively.
//!
//! # Example
//!
//! ```bash
//! # Scan a directory
//! dupe-handler ~/Downloads
//!
//! # Verbose logging on stderr
//! dupe-handler -vv ~/Downloads
//! ```

use clap::builder::FalseyValueParser;
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;

/// Usage line printed when the argument count is wrong.
pub const USAGE: &str = "Usage: dupe-handler <directory path>";

/// Interactive duplicate file finder.
///
/// Scans a directory, lists files by size, shows groups of files with
/// identical content and deletes the copies you pick.
#[derive(Debug, Parser)]
#[command(name = "dupe-handler")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory path to scan for duplicates
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Increase verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors, and the progress spinner
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    ///
    /// `NO_COLOR` set to any value other than a falsey one (`0`, `false`,
    /// `no`, `off`, empty) also disables it.
    #[arg(long, env = "NO_COLOR", value_parser = FalseyValueParser::new())]
    pub no_color: bool,

    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Follow symbolic links during scan
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Report errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Whether a parse failure means the positional argument count was wrong.
///
/// Those are answered with [`USAGE`] on stdout instead of clap's own
/// error message.
#[must_use]
pub fn is_usage_error(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::MissingRequiredArgument
            | ErrorKind::UnknownArgument
            | ErrorKind::TooManyValues
            | ErrorKind::WrongNumberOfValues
    )
}
