//! Prompt states of the interactive session.
//!
//! ```text
//! AwaitFormat -> AwaitSortOrder -> AwaitCheckDuplicates -> AwaitDeleteConfirmation -> AwaitIndices -> Done
//!                                        |  no / nothing found      |  no
//!                                        +--------> Done            +--------> Done
//! ```
//!
//! Every waiting state repeats its prompt until it gets an answer it
//! accepts. There is no way to cancel from inside a state.

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptState {
    /// Waiting for the file suffix filter
    #[default]
    AwaitFormat,
    /// Waiting for the size sort option
    AwaitSortOrder,
    /// Waiting for "check for duplicates?"
    AwaitCheckDuplicates,
    /// Waiting for "delete files?"
    AwaitDeleteConfirmation,
    /// Waiting for the file numbers to delete
    AwaitIndices,
    /// Session finished
    Done,
}

impl PromptState {
    /// Check if the session is finished.
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Text shown when the state is entered.
    #[must_use]
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::AwaitFormat => "Enter file format (enter nothing to search all files):\n",
            Self::AwaitSortOrder => {
                "\nSize sorting options:\n1.Descending\n2.Ascending\n\nEnter a sorting option:\n"
            }
            Self::AwaitCheckDuplicates => "\nCheck for duplicates?\n",
            Self::AwaitDeleteConfirmation => {
                "\nDelete files? (You will be prompted to select which files to delete)\n"
            }
            Self::AwaitIndices => "\nEnter file numbers to delete (space separated integers):\n",
            Self::Done => "",
        }
    }

    /// Text shown after an answer was rejected.
    #[must_use]
    pub fn retry_prompt(&self) -> &'static str {
        match self {
            Self::AwaitSortOrder => {
                "\nPlease enter an integer representing one of the options\n\nEnter a sorting option:\n"
            }
            Self::AwaitCheckDuplicates => "\nEnter 'yes' or 'no'\n\nCheck for duplicates?\n",
            Self::AwaitDeleteConfirmation => "\nEnter 'yes' or 'no'\n\nDelete files?\n",
            Self::AwaitIndices => {
                "\nPlease enter space separated integers only, corresponding to the duplicate files above.\n\nEnter file numbers to delete:\n"
            }
            Self::AwaitFormat | Self::Done => "",
        }
    }
}
