//! Scanner module for directory traversal and file fingerprinting.
//!
//! Responsibilities:
//! - Sequential directory walking using walkdir
//! - Suffix filtering applied before any file is read
//! - Content fingerprinting with BLAKE3
//!
//! # Architecture
//!
//! - [`walker`] finds the files and drives the scan
//! - [`hasher`] turns file contents into a [`Fingerprint`]
//!
//! # Example
//!
//! ```no_run
//! use dupe_handler::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let config = WalkerConfig::new(".txt", false);
//! let report = Walker::new(Path::new("."), config).scan().unwrap();
//! for record in &report.records {
//!     println!("{}: {} bytes", record.path.display(), record.size);
//! }
//! for err in &report.errors {
//!     eprintln!("Warning: {}", err);
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::io;
use std::path::{Path, PathBuf};

// Re-export main types
pub use hasher::{hash_to_hex, Fingerprint, Hasher, DEFAULT_BUFFER_SIZE};
pub use walker::{matches_suffix, Walker};

/// One file considered for duplicate analysis.
///
/// Created once during the scan and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Canonical absolute path to the file
    pub path: PathBuf,
    /// File size in bytes at scan time
    pub size: u64,
    /// BLAKE3 content fingerprint computed at scan time
    pub fingerprint: Fingerprint,
}

impl FileRecord {
    /// Create a new FileRecord.
    ///
    /// # Arguments
    ///
    /// * `path` - Absolute path to the file
    /// * `size` - File size in bytes
    /// * `fingerprint` - Content fingerprint
    #[must_use]
    pub fn new(path: PathBuf, size: u64, fingerprint: Fingerprint) -> Self {
        Self {
            path,
            size,
            fingerprint,
        }
    }
}

/// What to look for and how to traverse.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Only paths ending with this literal string are kept.
    /// An empty suffix keeps every file.
    pub suffix: String,

    /// Descend through symbolic links.
    /// walkdir detects cycles and reports them as errors.
    pub follow_symlinks: bool,

    /// Read buffer size used when fingerprinting.
    /// `None` uses [`DEFAULT_BUFFER_SIZE`].
    pub hash_buffer_size: Option<usize>,
}

impl WalkerConfig {
    /// Create a configuration with a suffix filter and symlink policy.
    #[must_use]
    pub fn new(suffix: impl Into<String>, follow_symlinks: bool) -> Self {
        Self {
            suffix: suffix.into(),
            follow_symlinks,
            hash_buffer_size: None,
        }
    }

    /// Override the hashing buffer size.
    #[must_use]
    pub fn with_hash_buffer_size(mut self, size: usize) -> Self {
        self.hash_buffer_size = Some(size);
        self
    }
}

/// Outcome of a scan: every record produced plus the per-item problems
/// encountered on the way.
///
/// A non-empty `errors` list means the record list may be incomplete.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Successfully fingerprinted files
    pub records: Vec<FileRecord>,
    /// Traversal and hashing failures, in the order they occurred
    pub errors: Vec<ScanError>,
}

impl ScanReport {
    /// Whether the scan finished without any per-item errors.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Sum of the sizes of all scanned files.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.records.iter().map(|r| r.size).sum()
    }
}

/// A traversal or fingerprinting problem.
///
/// Only a bad root aborts [`Walker::scan`]; every other variant is
/// collected into [`ScanReport::errors`].
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// An entry could not be read for lack of permission.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The root or an entry disappeared.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The root is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Following a symlink led back to one of its ancestors.
    #[error("Symlink loop at {path} (points to {ancestor})")]
    Loop {
        /// Path of the offending link
        path: PathBuf,
        /// Ancestor directory it resolves to
        ancestor: PathBuf,
    },

    /// Any other I/O failure.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Entry that failed
        path: PathBuf,
        /// Cause
        #[source]
        source: io::Error,
    },

    /// A matching file could not be fingerprinted.
    #[error(transparent)]
    Hash(#[from] HashError),
}

impl ScanError {
    /// Classify an I/O error for `path`.
    pub(crate) fn from_io(path: &Path, err: io::Error) -> Self {
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
            Self::PermissionDenied(p)
            | Self::NotFound(p)
            | Self::NotADirectory(p)
            | Self::Loop { path: p, .. }
            | Self::Io { path: p, .. } => p,
            Self::Hash(e) => e.path(),
        }
    }
}

/// Failure to fingerprint one file. The file is left out of the scan.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// Removed between discovery and hashing.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Not readable.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Open or read failed otherwise.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// File being hashed
        path: PathBuf,
        /// Cause
        #[source]
        source: io::Error,
    },
}

impl HashError {
    pub(crate) fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// Get the path of the file that failed.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) | Self::Io { path: p, .. } => p,
        }
    }
}
