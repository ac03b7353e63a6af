//! Operator-facing report output.
//!
//! - [`report`]: listing, duplicate report, diagnostics and freed-space summary
//! - [`palette`]: explicit color configuration passed to every renderer

pub mod palette;
pub mod report;

pub use palette::Palette;
pub use report::{
    render_deletion_failures, render_diagnostics, render_duplicates, render_freed_space,
    render_listing,
};
