//! Text report rendering.
//!
//! Headers are emitted whenever a value differs from the previous entry, so
//! the input must already be ordered (see
//! [`sort_by_size`](crate::duplicates::sort_by_size)); unsorted input yields
//! repeated headers rather than an error.
//!
//! Layout of a duplicate report:
//!
//! ```text
//!
//! 5 bytes
//! Hash: 2cf24dba...
//! 1. /data/a.txt
//! 2. /data/b.txt
//! ```

use std::io::{self, Write};

use super::Palette;
use crate::actions::BatchDeleteResult;
use crate::scanner::{FileRecord, ScanError};

/// Render every scanned file, one size block at a time.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_listing<W: Write>(
    out: &mut W,
    records: &[FileRecord],
    palette: &Palette,
) -> io::Result<()> {
    let mut current_size = None;

    for record in records {
        if current_size != Some(record.size) {
            writeln!(out)?;
            writeln!(out, "{}", palette.size_header(&format!("{} bytes", record.size)))?;
            current_size = Some(record.size);
        }
        writeln!(out, "{}", record.path.display())?;
    }

    Ok(())
}

/// Render the duplicate list with size and fingerprint breaks.
///
/// Entries are numbered from 1 in rendered order; those numbers are what
/// the operator types when selecting files to delete.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_duplicates<W: Write>(
    out: &mut W,
    records: &[FileRecord],
    palette: &Palette,
) -> io::Result<()> {
    let mut current_size = None;
    let mut current_hash = None;

    for (i, record) in records.iter().enumerate() {
        if current_size != Some(record.size) {
            writeln!(out)?;
            writeln!(out, "{}", palette.size_header(&format!("{} bytes", record.size)))?;
            current_size = Some(record.size);
        }
        if current_hash != Some(record.fingerprint) {
            writeln!(out, "{}", palette.hash_header(&format!("Hash: {}", record.fingerprint)))?;
            current_hash = Some(record.fingerprint);
        }
        writeln!(out, "{}. {}", i + 1, record.path.display())?;
    }

    Ok(())
}

/// Render one line per file or directory the scan had to skip.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_diagnostics<W: Write>(
    out: &mut W,
    errors: &[ScanError],
    palette: &Palette,
) -> io::Result<()> {
    if errors.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    for err in errors {
        writeln!(out, "{}", palette.warning(&format!("Skipped: {err}")))?;
    }
    Ok(())
}

/// Render the deletions that did not go through.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_deletion_failures<W: Write>(
    out: &mut W,
    result: &BatchDeleteResult,
    palette: &Palette,
) -> io::Result<()> {
    for (path, message) in &result.failures {
        writeln!(
            out,
            "{}",
            palette.warning(&format!("Could not delete {}: {}", path.display(), message))
        )?;
    }
    Ok(())
}

/// Render the freed-space summary line.
///
/// # Errors
///
/// Propagates write failures.
pub fn render_freed_space<W: Write>(out: &mut W, bytes: u64, palette: &Palette) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        palette.prompt(&format!("Total freed up space: {bytes} bytes"))
    )?;
    writeln!(out)
}
