//! dupe-handler - Interactive Duplicate File Finder
//!
//! Scans a directory tree, fingerprints file contents with BLAKE3, groups
//! byte-identical files and lets an operator review and permanently delete
//! the redundant copies, reporting the space reclaimed.
//!
//! Pipeline: [`scanner`] -> [`duplicates`] -> [`output`] -> [`session`] ->
//! [`actions`].

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod session;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::actions::DeleteConfig;
use crate::cli::Cli;
use crate::config::Config;
use crate::error::ExitCode;
use crate::output::Palette;
use crate::progress::Progress;
use crate::session::{Session, SessionError, SessionOptions};

/// Run the interactive session described by the parsed command line.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the directory cannot
/// be scanned, or terminal I/O fails.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let config = Config::load(cli.config.as_deref())?;
    log::debug!("Effective config: {:?}", config);

    let options = SessionOptions {
        follow_symlinks: cli.follow_symlinks || config.follow_symlinks,
        hash_buffer_size: Some(config.hash_buffer_size),
        delete: DeleteConfig::default().with_verify_size(config.verify_before_delete),
        palette: Palette::from_enabled(config.color && !cli.no_color),
        progress: Some(Arc::new(Progress::new(cli.quiet))),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let session = Session::new(stdin.lock(), stdout.lock(), &cli.path, options);

    match session.run() {
        Ok(outcome) => {
            log::info!(
                "Session finished: {} file(s) scanned, {} bytes freed",
                outcome.files_scanned,
                outcome.bytes_freed()
            );
            Ok(outcome.exit_code())
        }
        Err(SessionError::InputClosed(state)) => {
            log::warn!("Input closed while waiting at {:?}", state);
            Ok(ExitCode::Interrupted)
        }
        Err(e) => Err(e).with_context(|| format!("failed to process {}", cli.path.display())),
    }
}
