//! Diagnostic logging on stderr.
//!
//! stdout belongs to the interactive prompts and the report, so every log
//! record goes to stderr through `env_logger`. The filter comes from, in
//! order of precedence:
//!
//! 1. `RUST_LOG`, parsed with `env_logger`'s own syntax
//! 2. `--quiet` (errors only) or the `-v` count
//! 3. `warn`
//!
//! ```rust,no_run
//! use dupe_handler::logging::init_logging;
//!
//! init_logging(2, false);
//! log::debug!("walking {}", "/data");
//! ```

use env_logger::{Builder, Target};
use log::LevelFilter;
use std::env;
use std::io::Write;

/// Install the global logger.
///
/// # Panics
///
/// Panics if a logger is already installed for this process.
pub fn init_logging(verbose: u8, quiet: bool) {
    let env_filter = env::var("RUST_LOG").ok();

    let mut builder = Builder::new();
    builder.target(Target::Stderr);
    match &env_filter {
        Some(filter) => {
            builder.parse_filters(filter);
        }
        None => {
            builder.filter_level(level_for(verbose, quiet));
        }
    }
    apply_format(&mut builder, verbose >= 2);
    builder.init();

    match env_filter {
        Some(filter) => log::debug!("Log filter taken from RUST_LOG={}", filter),
        None => log::debug!("Log level {}", level_for(verbose, quiet)),
    }
}

/// Map the CLI flags to a level filter.
fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Debug builds get timestamps; `with_module` adds the record's module path.
fn apply_format(builder: &mut Builder, with_module: bool) {
    builder.format(move |buf, record| {
        let level = record.level();
        let style = buf.default_level_style(level);

        if cfg!(debug_assertions) {
            write!(buf, "{} ", buf.timestamp_seconds())?;
        }
        write!(buf, "{style}{level:<5}{style:#} ")?;
        if with_module {
            write!(buf, "[{}] ", record.module_path().unwrap_or("?"))?;
        }
        writeln!(buf, "{}", record.args())
    });
}
