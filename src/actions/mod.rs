//! File actions module.
//!
//! The delete module provides permanent file deletion with:
//! - Size verification against the scan before removal
//! - Best-effort batch operations
//! - Freed-space accounting over confirmed removals only
//!
//! ```no_run
//! use dupe_handler::actions::delete::permanent_delete;
//! use std::path::PathBuf;
//!
//! let path = PathBuf::from("/path/to/duplicate.txt");
//! let result = permanent_delete(&path);
//! ```

pub mod delete;

// Re-export commonly used types
pub use delete::{
    delete_records, delete_verified, permanent_delete, BatchDeleteResult, DeleteConfig,
    DeleteError, DeleteResult, FileSnapshot,
};
