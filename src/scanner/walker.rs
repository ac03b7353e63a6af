//! Directory walker implementation using walkdir for sequential traversal.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and turning every matching regular file into a [`FileRecord`].
//!
//! # Features
//!
//! - Name-sorted traversal for reproducible scans
//! - Literal suffix filtering on the traversed path, checked before hashing
//! - Optional symlink following (cycles are reported, not followed)
//! - Canonical record paths, each file recorded once even when reached
//!   through several links
//! - Best-effort: a failing entry is reported and its subtree skipped,
//!   everything else is still scanned
//!
//! # Example
//!
//! ```no_run
//! use dupe_handler::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), WalkerConfig::default());
//! for entry in walker.walk().unwrap() {
//!     match entry {
//!         Ok(path) => println!("{}", path.display()),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::WalkDir;

use super::{FileRecord, Hasher, ScanError, ScanReport, WalkerConfig};
use crate::progress::ProgressCallback;

/// Check whether `path`, as traversed, ends with the literal `suffix`.
///
/// The comparison covers the whole path, not just the file name, and is
/// done on raw bytes so non-UTF-8 paths still match. An empty suffix
/// matches everything.
#[must_use]
pub fn matches_suffix(path: &Path, suffix: &str) -> bool {
    suffix.is_empty()
        || path
            .as_os_str()
            .as_encoded_bytes()
            .ends_with(suffix.as_bytes())
}

/// Directory walker for file discovery and fingerprinting.
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
    /// Optional progress reporting
    progress: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for Walker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Walker")
            .field("root", &self.root)
            .field("config", &self.config)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - Root directory to scan
    /// * `config` - Walker configuration options
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
            progress: None,
        }
    }

    /// Attach a progress callback notified once per scanned file.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Check that the root exists and resolves to a directory.
    fn check_root(&self) -> Result<(), ScanError> {
        let metadata = fs::metadata(&self.root).map_err(|e| ScanError::from_io(&self.root, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(self.root.clone()));
        }
        Ok(())
    }

    /// Walk the directory tree, yielding canonical paths of matching
    /// regular files.
    ///
    /// The suffix is matched against the path as traversed from the root
    /// given to [`Walker::new`]. Matches are then canonicalized, and a
    /// canonical path already yielded (a followed symlink to a file seen
    /// before, or the file behind a link seen before) is dropped, so every
    /// path appears at most once.
    ///
    /// Directories are never yielded. When an entry fails, the error is
    /// yielded and walkdir does not descend into it; iteration carries on
    /// with the remaining branches.
    ///
    /// # Errors
    ///
    /// Fails up front if the root does not exist or is not a directory.
    pub fn walk(
        &self,
    ) -> Result<impl Iterator<Item = Result<PathBuf, ScanError>> + '_, ScanError> {
        self.check_root()?;
        log::debug!("Walking {}", self.root.display());

        let walk_dir = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();
        let mut seen: HashSet<PathBuf> = HashSet::new();

        Ok(walk_dir.into_iter().filter_map(move |entry_result| {
            match entry_result {
                Ok(entry) => {
                    let file_type = entry.file_type();

                    // Skip directories (we only want files)
                    if file_type.is_dir() {
                        return None;
                    }

                    if !file_type.is_file() {
                        log::trace!("Skipping non-regular entry: {}", entry.path().display());
                        return None;
                    }

                    if !matches_suffix(entry.path(), &self.config.suffix) {
                        log::trace!("Suffix mismatch: {}", entry.path().display());
                        return None;
                    }

                    let canonical = match fs::canonicalize(entry.path()) {
                        Ok(path) => path,
                        Err(e) => return Some(Err(ScanError::from_io(entry.path(), e))),
                    };
                    if !seen.insert(canonical.clone()) {
                        log::debug!(
                            "Already seen as {}: {}",
                            canonical.display(),
                            entry.path().display()
                        );
                        return None;
                    }

                    Some(Ok(canonical))
                }
                Err(e) => Some(Err(convert_walk_error(&self.root, e))),
            }
        }))
    }

    /// Walk the tree and fingerprint every matching file.
    ///
    /// Per-item failures (unreadable directories, files that vanish or
    /// cannot be read) are collected into [`ScanReport::errors`]; files
    /// that fail to hash are left out of the records rather than given a
    /// placeholder fingerprint.
    ///
    /// # Errors
    ///
    /// Only fails if the root itself is unusable.
    pub fn scan(&self) -> Result<ScanReport, ScanError> {
        let hasher = self
            .config
            .hash_buffer_size
            .map_or_else(Hasher::new, Hasher::with_buffer_size);
        let mut report = ScanReport::default();
        let entries = self.walk()?;

        if let Some(cb) = &self.progress {
            cb.on_phase_start("scanning", 0);
        }

        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    log::warn!("{}", e);
                    report.errors.push(e);
                    continue;
                }
            };

            match fingerprint_file(&hasher, path) {
                Ok(record) => {
                    if let Some(cb) = &self.progress {
                        cb.on_progress(report.records.len() + 1, &record.path.to_string_lossy());
                        cb.on_item_completed(record.size);
                    }
                    report.records.push(record);
                }
                Err(e) => {
                    log::warn!("Skipping file: {}", e);
                    report.errors.push(e);
                }
            }
        }

        if let Some(cb) = &self.progress {
            cb.on_phase_end("scanning");
        }

        log::info!(
            "Scanned {} file(s), {} error(s)",
            report.records.len(),
            report.errors.len()
        );
        Ok(report)
    }
}

/// Stat and hash one file into a record.
fn fingerprint_file(hasher: &Hasher, path: PathBuf) -> Result<FileRecord, ScanError> {
    let metadata = fs::metadata(&path).map_err(|e| ScanError::from_io(&path, e))?;
    let fingerprint = hasher.hash_file(&path)?;
    Ok(FileRecord::new(path, metadata.len(), fingerprint))
}

/// Convert a walkdir error into a [`ScanError`].
fn convert_walk_error(root: &Path, err: walkdir::Error) -> ScanError {
    let path = err.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);

    if let Some(ancestor) = err.loop_ancestor() {
        return ScanError::Loop {
            path,
            ancestor: ancestor.to_path_buf(),
        };
    }

    let io_err = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other("directory walk failed"));
    ScanError::from_io(&path, io_err)
}
