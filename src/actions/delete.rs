//! Permanent file deletion with pre-delete verification.
//!
//! # Overview
//!
//! This module provides the deletion half of the resolver:
//! - Permanent removal (there is no trash or undo)
//! - Size verification against the scan before removing (TOCTOU guard)
//! - Best-effort batch operation: one failure never stops the rest
//! - Freed-space accounting that only counts confirmed removals
//!
//! # Example
//!
//! ```no_run
//! use dupe_handler::actions::delete::{delete_records, DeleteConfig};
//! use dupe_handler::scanner::{FileRecord, Hasher};
//! use std::path::PathBuf;
//!
//! let path = PathBuf::from("/path/to/duplicate.txt");
//! let fingerprint = Hasher::new().hash_file(&path).unwrap();
//! let record = FileRecord::new(path, 5, fingerprint);
//!
//! let result = delete_records(&[&record], &DeleteConfig::default());
//! println!("{}", result.summary());
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::scanner::FileRecord;

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The path is no longer a regular file (e.g. replaced by a symlink).
    #[error("not a regular file: {0}")]
    NotAFile(PathBuf),

    /// File size changed since the scan.
    #[error("file modified since scan: {path} (expected {expected} bytes, found {actual})")]
    Modified {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    /// The remove call itself failed.
    #[error("permanent delete failed for {path}: {message}")]
    PermanentDeleteFailed { path: PathBuf, message: String },

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p)
            | Self::PermissionDenied(p)
            | Self::NotAFile(p)
            | Self::Modified { path: p, .. }
            | Self::PermanentDeleteFailed { path: p, .. }
            | Self::Io { path: p, .. } => p,
        }
    }
}

/// Result of a successful deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResult {
    /// Path that was deleted.
    pub path: PathBuf,
    /// Size of the deleted file in bytes.
    pub size: u64,
}

impl DeleteResult {
    /// Create a new delete result.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// Results of a batch deletion operation.
#[derive(Debug, Clone, Default)]
pub struct BatchDeleteResult {
    /// Successfully deleted files.
    pub successes: Vec<DeleteResult>,
    /// Failed deletions with their errors.
    pub failures: Vec<(PathBuf, String)>,
    /// Total bytes freed by the successful deletions.
    pub bytes_freed: u64,
}

impl BatchDeleteResult {
    /// Number of successful deletions.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    /// Number of failed deletions.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Check if all deletions succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.all_succeeded() {
            format!(
                "Deleted {} file(s), freed {} bytes",
                self.success_count(),
                self.bytes_freed
            )
        } else {
            format!(
                "Deleted {} file(s), {} failed, freed {} bytes",
                self.success_count(),
                self.failure_count(),
                self.bytes_freed
            )
        }
    }
}

/// How a batch treats the files it removes.
#[derive(Debug, Clone)]
pub struct DeleteConfig {
    /// Check the file still has its scanned size before removing it.
    pub verify_size: bool,
}

impl Default for DeleteConfig {
    fn default() -> Self {
        Self { verify_size: true }
    }
}

impl DeleteConfig {
    /// Enable/disable size verification.
    #[must_use]
    pub fn with_verify_size(mut self, verify: bool) -> Self {
        self.verify_size = verify;
        self
    }
}

/// File metadata snapshot for TOCTOU verification.
#[derive(Debug, Clone)]
pub struct FileSnapshot {
    /// Path to the file.
    pub path: PathBuf,
    /// File size in bytes.
    pub size: u64,
}

impl FileSnapshot {
    /// Capture the current state of the path itself, without following
    /// a symlink.
    ///
    /// # Errors
    ///
    /// - [`DeleteError::NotAFile`] if the path is not a regular file
    /// - `NotFound` or `PermissionDenied` if it can't be inspected
    pub fn capture(path: &Path) -> Result<Self, DeleteError> {
        let metadata = fs::symlink_metadata(path).map_err(|e| DeleteError::from_io(path, e))?;
        if !metadata.is_file() {
            return Err(DeleteError::NotAFile(path.to_path_buf()));
        }

        Ok(Self {
            path: path.to_path_buf(),
            size: metadata.len(),
        })
    }

    /// Check the snapshot against the size recorded at scan time.
    ///
    /// # Errors
    ///
    /// Returns [`DeleteError::Modified`] on a size mismatch.
    pub fn verify_size(&self, expected: u64) -> Result<(), DeleteError> {
        if self.size != expected {
            log::warn!(
                "File modified since scan: {} (size changed from {} to {})",
                self.path.display(),
                expected,
                self.size
            );
            return Err(DeleteError::Modified {
                path: self.path.clone(),
                expected,
                actual: self.size,
            });
        }
        Ok(())
    }
}

/// Permanently delete a single file.
///
/// **WARNING**: This operation cannot be undone.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if deletion is not allowed
/// - `PermanentDeleteFailed` if the remove call fails
pub fn permanent_delete(path: &Path) -> Result<DeleteResult, DeleteError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| DeleteError::from_io(path, e))?;
    let size = metadata.len();

    fs::remove_file(path).map_err(|e| {
        log::error!("Permanent delete failed for {}: {}", path.display(), e);
        match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                DeleteError::from_io(path, e)
            }
            _ => DeleteError::PermanentDeleteFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            },
        }
    })?;

    log::info!("Permanently deleted: {} ({} bytes)", path.display(), size);

    Ok(DeleteResult::new(path.to_path_buf(), size))
}

/// Delete the file behind a scanned record, verifying it first.
///
/// The reported size is the one recorded at scan time.
///
/// # Errors
///
/// - `NotAFile` if the path is no longer a regular file
/// - `Modified` if verification is enabled and the size changed
/// - Any error from [`permanent_delete`]
pub fn delete_verified(record: &FileRecord, config: &DeleteConfig) -> Result<DeleteResult, DeleteError> {
    let snapshot = FileSnapshot::capture(&record.path)?;
    if config.verify_size {
        snapshot.verify_size(record.size)?;
    }

    permanent_delete(&record.path)?;
    Ok(DeleteResult::new(record.path.clone(), record.size))
}

/// Delete several records, one after another.
///
/// A failure is recorded and the batch moves on to the next file.
/// `bytes_freed` only includes files that were actually removed.
pub fn delete_records(records: &[&FileRecord], config: &DeleteConfig) -> BatchDeleteResult {
    let mut result = BatchDeleteResult::default();

    for record in records {
        match delete_verified(record, config) {
            Ok(del) => {
                result.bytes_freed += del.size;
                result.successes.push(del);
            }
            Err(e) => {
                log::warn!("Failed to delete {}: {}", record.path.display(), e);
                result.failures.push((record.path.clone(), e.to_string()));
            }
        }
    }

    log::info!("{}", result.summary());

    result
}
