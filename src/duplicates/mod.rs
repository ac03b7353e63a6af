//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Fingerprint partitioning and duplicate extraction
//! - Size ordering of record lists

pub mod groups;
pub mod order;

pub use groups::{
    extract_duplicates, find_duplicates, partition_by_fingerprint, GroupingStats, Partition,
};
pub use order::{sort_by_size, SortOrder};
