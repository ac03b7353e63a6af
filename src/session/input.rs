//! Line-oriented operator input.
//!
//! The session never touches the console directly; it pulls answers from a
//! [`LineSource`]. Any [`BufRead`] is a line source, so a locked stdin and a
//! byte slice of scripted answers are interchangeable.

use std::io::{self, BufRead};

/// Source of operator answers, one line at a time.
pub trait LineSource {
    /// Read the next line without its line terminator.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    ///
    /// # Errors
    ///
    /// Propagates the underlying read error.
    fn next_line(&mut self) -> io::Result<Option<String>>;
}

impl<R: BufRead> LineSource for R {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

/// Interpret a yes/no answer. Only the exact words `yes` and `no` count.
#[must_use]
pub fn parse_confirmation(answer: &str) -> Option<bool> {
    match answer.trim() {
        "yes" => Some(true),
        "no" => Some(false),
        _ => None,
    }
}
