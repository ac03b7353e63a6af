//! Scan progress on stderr.
//!
//! [`Progress`] draws an indicatif spinner while the tree is walked and
//! clears it before the first prompt, so nothing lands on stdout.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Receives notifications from [`Walker::scan`](crate::scanner::Walker::scan).
pub trait ProgressCallback: Send + Sync {
    /// A phase such as `"scanning"` begins. `total` is 0 when unknown.
    fn on_phase_start(&self, phase: &str, total: usize);

    /// The `current`th file (1-based) is at `path`.
    fn on_progress(&self, current: usize, path: &str);

    /// A file of `bytes` bytes was fingerprinted.
    fn on_item_completed(&self, _bytes: u64) {}

    /// The phase is over.
    fn on_phase_end(&self, phase: &str);
}

/// Spinner-based progress reporter.
pub struct Progress {
    bar: Mutex<Option<ProgressBar>>,
    bytes: Mutex<u64>,
    quiet: bool,
}

impl Progress {
    /// Create a reporter. A quiet one never draws.
    ///
    /// ```
    /// use dupe_handler::progress::Progress;
    ///
    /// let progress = Progress::new(false);
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            bytes: Mutex::new(0),
            quiet,
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}] {pos} files")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
    }
}

impl ProgressCallback for Progress {
    fn on_phase_start(&self, phase: &str, _total: usize) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        pb.set_style(Self::spinner_style());
        pb.set_message(format!("{phase}..."));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_progress(&self, current: usize, path: &str) {
        if self.quiet {
            return;
        }

        if let Ok(bar) = self.bar.lock() {
            if let Some(pb) = bar.as_ref() {
                pb.set_position(current as u64);
                pb.set_message(truncate_path(path, 40));
            }
        }
    }

    fn on_item_completed(&self, bytes: u64) {
        if let Ok(mut total) = self.bytes.lock() {
            *total += bytes;
        }
    }

    fn on_phase_end(&self, phase: &str) {
        if self.quiet {
            return;
        }

        let bytes = self.bytes.lock().map(|b| *b).unwrap_or_default();
        if let Ok(mut bar) = self.bar.lock() {
            if let Some(pb) = bar.take() {
                // Must not linger between the prompts
                pb.finish_and_clear();
                log::debug!("{} complete: {} files, {} bytes", phase, pb.position(), bytes);
            }
        }
    }
}

/// Shorten `path` to at most `max_len` characters, keeping the file name.
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.chars().count() <= max_len {
        return path.to_string();
    }

    let file_name = std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name_len = file_name.chars().count();
    if name_len + 4 > max_len {
        let tail: String = file_name.chars().skip(name_len + 3 - max_len).collect();
        return format!("...{tail}");
    }

    format!(".../{file_name}")
}
