//! The interactive session driver.
//!
//! [`Session`] walks the [`PromptState`] machine: it asks for a suffix
//! filter, scans, asks for a sort order, prints the listing, then offers the
//! duplicate report and deletion. Input comes from any [`LineSource`] and
//! output goes to any [`Write`], which is how the tests script whole runs.

use std::io::{self, Write};
use std::mem;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use super::input::{parse_confirmation, LineSource};
use super::selection::{parse_selection, DeletionRequest};
use super::state::PromptState;
use crate::actions::{delete_records, BatchDeleteResult, DeleteConfig};
use crate::duplicates::{find_duplicates, sort_by_size, GroupingStats, SortOrder};
use crate::error::ExitCode;
use crate::output::{self, Palette};
use crate::progress::ProgressCallback;
use crate::scanner::{FileRecord, ScanError, ScanReport, Walker, WalkerConfig};

/// Errors that end a session early.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading input or writing the report failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Input ran out while a prompt was waiting for an answer.
    #[error("input closed while waiting at {0:?}")]
    InputClosed(PromptState),

    /// The root directory could not be scanned at all.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Knobs for a session that do not come from the prompts.
#[derive(Clone, Default)]
pub struct SessionOptions {
    /// Follow symbolic links while scanning
    pub follow_symlinks: bool,
    /// Hash buffer size override
    pub hash_buffer_size: Option<usize>,
    /// Deletion behavior
    pub delete: DeleteConfig,
    /// Report colors
    pub palette: Palette,
    /// Scan progress reporting
    pub progress: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for SessionOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionOptions")
            .field("follow_symlinks", &self.follow_symlinks)
            .field("hash_buffer_size", &self.hash_buffer_size)
            .field("delete", &self.delete)
            .field("palette", &self.palette)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

/// What happened during a finished session.
#[derive(Debug, Default)]
pub struct SessionOutcome {
    /// Files scanned and fingerprinted
    pub files_scanned: usize,
    /// Per-item problems met while scanning
    pub scan_errors: Vec<ScanError>,
    /// Grouping statistics over the scanned files
    pub stats: GroupingStats,
    /// Number of entries in the duplicate report
    pub duplicates_listed: usize,
    /// Whether the duplicate report was shown
    pub duplicates_shown: bool,
    /// Deletion results, if the operator chose to delete
    pub deletion: Option<BatchDeleteResult>,
}

impl SessionOutcome {
    /// Whether anything went wrong along the way without ending the session.
    #[must_use]
    pub fn has_problems(&self) -> bool {
        !self.scan_errors.is_empty()
            || self
                .deletion
                .as_ref()
                .is_some_and(|d| !d.all_succeeded())
    }

    /// Process exit code for a session that ran to completion.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        if self.has_problems() {
            ExitCode::PartialSuccess
        } else {
            ExitCode::Success
        }
    }

    /// Bytes actually freed by the deletion pass.
    #[must_use]
    pub fn bytes_freed(&self) -> u64 {
        self.deletion.as_ref().map_or(0, |d| d.bytes_freed)
    }
}

/// One interactive run over a directory.
pub struct Session<R, W> {
    input: R,
    out: W,
    root: PathBuf,
    options: SessionOptions,
}

impl<R: LineSource, W: Write> Session<R, W> {
    /// Create a session reading answers from `input` and writing to `out`.
    pub fn new(input: R, out: W, root: &Path, options: SessionOptions) -> Self {
        Self {
            input,
            out,
            root: root.to_path_buf(),
            options,
        }
    }

    /// Run the prompt sequence to completion.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Scan`] if the root cannot be scanned
    /// - [`SessionError::InputClosed`] if input ends mid-prompt
    /// - [`SessionError::Io`] on terminal I/O failure
    pub fn run(mut self) -> Result<SessionOutcome, SessionError> {
        let mut outcome = SessionOutcome::default();
        let mut state = PromptState::AwaitFormat;
        let mut records: Vec<FileRecord> = Vec::new();
        let mut duplicates: Vec<FileRecord> = Vec::new();

        while !state.is_done() {
            log::debug!("Session state: {:?}", state);

            state = match state {
                PromptState::AwaitFormat => {
                    let suffix = self.ask(state)?;
                    let report = self.scan(suffix.trim())?;
                    output::render_diagnostics(&mut self.out, &report.errors, &self.options.palette)?;

                    outcome.files_scanned = report.records.len();
                    outcome.scan_errors = report.errors;
                    records = report.records;
                    PromptState::AwaitSortOrder
                }
                PromptState::AwaitSortOrder => {
                    let order = self.ask_until(state, SortOrder::from_choice)?;
                    log::debug!("Sorting {}", order);

                    records = sort_by_size(mem::take(&mut records), order);
                    if records.is_empty() {
                        writeln!(self.out, "\nNo files found.")?;
                    }
                    output::render_listing(&mut self.out, &records, &self.options.palette)?;

                    let (found, stats) = find_duplicates(&records);
                    outcome.stats = stats;
                    duplicates = sort_by_size(found, order);
                    outcome.duplicates_listed = duplicates.len();
                    PromptState::AwaitCheckDuplicates
                }
                PromptState::AwaitCheckDuplicates => {
                    if !self.ask_until(state, parse_confirmation)? {
                        PromptState::Done
                    } else if duplicates.is_empty() {
                        writeln!(self.out, "No duplicates found. Bye!")?;
                        PromptState::Done
                    } else {
                        output::render_duplicates(&mut self.out, &duplicates, &self.options.palette)?;
                        outcome.duplicates_shown = true;
                        PromptState::AwaitDeleteConfirmation
                    }
                }
                PromptState::AwaitDeleteConfirmation => {
                    if self.ask_until(state, parse_confirmation)? {
                        PromptState::AwaitIndices
                    } else {
                        PromptState::Done
                    }
                }
                PromptState::AwaitIndices => {
                    let len = duplicates.len();
                    let request = self.ask_until(state, |answer| match parse_selection(answer, len) {
                        Ok(request) => Some(request),
                        Err(e) => {
                            log::debug!("Rejected selection {:?}: {}", answer, e);
                            None
                        }
                    })?;

                    outcome.deletion = Some(self.delete(&request, &duplicates)?);
                    PromptState::Done
                }
                PromptState::Done => PromptState::Done,
            };
        }

        self.out.flush()?;
        Ok(outcome)
    }

    /// Show the prompt for `state` and read one answer.
    fn ask(&mut self, state: PromptState) -> Result<String, SessionError> {
        write!(self.out, "{}", self.options.palette.prompt(state.prompt()))?;
        self.read_answer(state)
    }

    /// Show the prompt for `state` and keep asking until `accept` takes an answer.
    fn ask_until<T, F>(&mut self, state: PromptState, mut accept: F) -> Result<T, SessionError>
    where
        F: FnMut(&str) -> Option<T>,
    {
        let mut answer = self.ask(state)?;
        loop {
            if let Some(value) = accept(&answer) {
                return Ok(value);
            }
            write!(self.out, "{}", state.retry_prompt())?;
            answer = self.read_answer(state)?;
        }
    }

    fn read_answer(&mut self, state: PromptState) -> Result<String, SessionError> {
        self.out.flush()?;
        self.input
            .next_line()?
            .ok_or(SessionError::InputClosed(state))
    }

    fn scan(&self, suffix: &str) -> Result<ScanReport, ScanError> {
        let mut config = WalkerConfig::new(suffix, self.options.follow_symlinks);
        if let Some(size) = self.options.hash_buffer_size {
            config = config.with_hash_buffer_size(size);
        }

        let mut walker = Walker::new(&self.root, config);
        if let Some(progress) = &self.options.progress {
            walker = walker.with_progress(Arc::clone(progress));
        }
        walker.scan()
    }

    fn delete(
        &mut self,
        request: &DeletionRequest,
        duplicates: &[FileRecord],
    ) -> Result<BatchDeleteResult, SessionError> {
        let targets = request.resolve(duplicates);
        let result = delete_records(&targets, &self.options.delete);

        output::render_deletion_failures(&mut self.out, &result, &self.options.palette)?;
        output::render_freed_space(&mut self.out, result.bytes_freed, &self.options.palette)?;
        Ok(result)
    }
}
