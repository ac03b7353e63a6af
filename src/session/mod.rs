//! Interactive review session.
//!
//! This module provides:
//! - [`state`]: the prompt state machine
//! - [`input`]: line-oriented answers from any `BufRead`
//! - [`selection`]: all-or-nothing validation of file numbers
//! - [`run`]: the session driver tying scan, report and deletion together
//!
//! # Example
//!
//! ```no_run
//! use dupe_handler::session::{Session, SessionOptions};
//! use std::io;
//! use std::path::Path;
//!
//! let stdin = io::stdin();
//! let stdout = io::stdout();
//! let session = Session::new(stdin.lock(), stdout.lock(), Path::new("."), SessionOptions::default());
//! let outcome = session.run().unwrap();
//! println!("freed {} bytes", outcome.bytes_freed());
//! ```

pub mod input;
pub mod run;
pub mod selection;
pub mod state;

pub use input::{parse_confirmation, LineSource};
pub use run::{Session, SessionError, SessionOptions, SessionOutcome};
pub use selection::{parse_selection, DeletionRequest, SelectionError};
pub use state::PromptState;
