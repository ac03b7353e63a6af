//! Operator index selection.
//!
//! The operator answers the delete prompt with whitespace-separated,
//! 1-based numbers taken from the duplicate report. Validation is
//! all-or-nothing: a single bad token rejects the whole answer and nothing
//! is deleted.

use thiserror::Error;

use crate::scanner::FileRecord;

/// Why an index answer was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Nothing but whitespace was entered.
    #[error("no file numbers entered")]
    Empty,

    /// A token is not an integer.
    #[error("'{0}' is not an integer")]
    NotAnInteger(String),

    /// A number does not name a listed file.
    #[error("file number {index} does not match any of the {len} listed file(s)")]
    OutOfRange { index: i64, len: usize },
}

/// A validated set of 1-based positions in the duplicate list.
///
/// Every index resolved to a listed record when the request was built.
/// Repeated numbers are collapsed, keeping the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionRequest {
    indices: Vec<usize>,
}

impl DeletionRequest {
    /// The selected 1-based indices, in the order entered.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of distinct files selected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Never true for a request built by [`parse_selection`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Look up the selected records.
    ///
    /// `duplicates` must be the list the request was validated against;
    /// indices past its end are skipped.
    #[must_use]
    pub fn resolve<'a>(&self, duplicates: &'a [FileRecord]) -> Vec<&'a FileRecord> {
        self.indices
            .iter()
            .filter_map(|&i| duplicates.get(i - 1))
            .collect()
    }
}

/// Validate an index answer against a list of `len` entries.
///
/// # Errors
///
/// - [`SelectionError::Empty`] for blank input
/// - [`SelectionError::NotAnInteger`] for the first non-numeric token
/// - [`SelectionError::OutOfRange`] for the first number outside `1..=len`
pub fn parse_selection(input: &str, len: usize) -> Result<DeletionRequest, SelectionError> {
    let mut indices: Vec<usize> = Vec::new();

    for token in input.split_whitespace() {
        let index: i64 = token
            .parse()
            .map_err(|_| SelectionError::NotAnInteger(token.to_string()))?;

        let position = usize::try_from(index)
            .ok()
            .filter(|&i| (1..=len).contains(&i))
            .ok_or(SelectionError::OutOfRange { index, len })?;

        if !indices.contains(&position) {
            indices.push(position);
        }
    }

    if indices.is_empty() {
        return Err(SelectionError::Empty);
    }

    Ok(DeletionRequest { indices })
}
