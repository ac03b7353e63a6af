//! Duplicate grouping by content fingerprint.
//!
//! # Overview
//!
//! Records are partitioned by fingerprint. Every partition with two or more
//! members is a duplicate group; singletons are unique files and never show
//! up in the duplicate list.
//!
//! The partition is a [`BTreeMap`], so groups come out in ascending
//! fingerprint order. That order only matters for reproducibility: the
//! duplicate list is re-sorted by size before it is shown.
//!
//! # Example
//!
//! ```
//! use dupe_handler::duplicates::find_duplicates;
//! use dupe_handler::scanner::{FileRecord, Fingerprint};
//! use std::path::PathBuf;
//!
//! let hello = Fingerprint::from_bytes(*blake3::hash(b"hello").as_bytes());
//! let hey = Fingerprint::from_bytes(*blake3::hash(b"hey").as_bytes());
//! let records = vec![
//!     FileRecord::new(PathBuf::from("/a"), 5, hello),
//!     FileRecord::new(PathBuf::from("/b"), 5, hello),
//!     FileRecord::new(PathBuf::from("/c"), 3, hey),
//! ];
//!
//! let (duplicates, stats) = find_duplicates(&records);
//! assert_eq!(duplicates.len(), 2);
//! assert_eq!(stats.duplicate_groups, 1);
//! assert_eq!(stats.unique_files, 1);
//! ```

use std::collections::BTreeMap;

use crate::scanner::{FileRecord, Fingerprint};

/// Records keyed by fingerprint. Each input record appears exactly once.
pub type Partition = BTreeMap<Fingerprint, Vec<FileRecord>>;

/// Statistics from grouping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Total number of records grouped
    pub total_files: usize,
    /// Records whose fingerprint no other record shares
    pub unique_files: usize,
    /// Number of fingerprints shared by 2+ records
    pub duplicate_groups: usize,
    /// Records that belong to a duplicate group
    pub duplicate_files: usize,
    /// Bytes reclaimable by keeping one copy per group
    pub reclaimable_bytes: u64,
}

impl GroupingStats {
    /// Compute statistics over an existing partition.
    #[must_use]
    pub fn from_partition(partition: &Partition) -> Self {
        let mut stats = Self::default();

        for members in partition.values() {
            stats.total_files += members.len();
            if members.len() > 1 {
                stats.duplicate_groups += 1;
                stats.duplicate_files += members.len();
                stats.reclaimable_bytes += members[1..].iter().map(|r| r.size).sum::<u64>();
            } else {
                stats.unique_files += members.len();
            }
        }

        stats
    }
}

/// Partition records by fingerprint.
///
/// Input order is preserved within each partition.
#[must_use]
pub fn partition_by_fingerprint(records: Vec<FileRecord>) -> Partition {
    let mut partition = Partition::new();
    for record in records {
        partition.entry(record.fingerprint).or_default().push(record);
    }

    log::debug!("Partitioned into {} fingerprint(s)", partition.len());
    partition
}

/// Concatenate every partition with two or more members.
///
/// Groups appear in fingerprint order, members in the order they were
/// partitioned, so each group is contiguous in the result.
#[must_use]
pub fn extract_duplicates(partition: &Partition) -> Vec<FileRecord> {
    partition
        .values()
        .filter(|members| members.len() > 1)
        .flat_map(|members| members.iter().cloned())
        .collect()
}

/// Group records and return the duplicate subset plus statistics.
///
/// The input is left untouched; the scan result stays usable for the full
/// listing.
#[must_use]
pub fn find_duplicates(records: &[FileRecord]) -> (Vec<FileRecord>, GroupingStats) {
    let partition = partition_by_fingerprint(records.to_vec());
    let stats = GroupingStats::from_partition(&partition);
    let duplicates = extract_duplicates(&partition);

    log::info!(
        "Found {} duplicate group(s) covering {} file(s), {} bytes reclaimable",
        stats.duplicate_groups,
        stats.duplicate_files,
        stats.reclaimable_bytes
    );
    (duplicates, stats)
}
