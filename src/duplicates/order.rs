//! Size ordering for record lists.
//!
//! Sorting is stable: records of equal size keep their relative order.
//! Fed the output of [`extract_duplicates`](super::extract_duplicates),
//! this keeps each fingerprint group contiguous inside its size block,
//! which the duplicate report relies on.

use std::fmt;

use crate::scanner::FileRecord;

/// Size sorting direction chosen by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Largest files first (menu option 1)
    #[default]
    Descending,
    /// Smallest files first (menu option 2)
    Ascending,
}

impl SortOrder {
    /// Map a menu answer to an order: `1` is descending, `2` ascending.
    ///
    /// Surrounding whitespace is ignored; anything else is `None`.
    #[must_use]
    pub fn from_choice(input: &str) -> Option<Self> {
        match input.trim().parse::<i64>() {
            Ok(1) => Some(Self::Descending),
            Ok(2) => Some(Self::Ascending),
            _ => None,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Descending => f.write_str("Descending"),
            Self::Ascending => f.write_str("Ascending"),
        }
    }
}

/// Return `records` ordered by size in the given direction.
#[must_use]
pub fn sort_by_size(mut records: Vec<FileRecord>, order: SortOrder) -> Vec<FileRecord> {
    match order {
        SortOrder::Ascending => records.sort_by(|a, b| a.size.cmp(&b.size)),
        SortOrder::Descending => records.sort_by(|a, b| b.size.cmp(&a.size)),
    }
    records
}
