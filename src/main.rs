//! dupe-handler - Interactive Duplicate File Finder
//!
//! Entry point for the dupe-handler CLI application.

use clap::Parser;
use dupe_handler::{
    cli::{is_usage_error, Cli, USAGE},
    error::{ExitCode, StructuredError},
    logging::init_logging,
};

fn main() {
    // Wrong argument count is a graceful no-op, not a failure
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if is_usage_error(err.kind()) => {
            println!("{USAGE}");
            return;
        }
        Err(err) => err.exit(),
    };
    let json_errors = cli.json_errors;

    init_logging(cli.verbose, cli.quiet);

    match dupe_handler::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::GeneralError;

            if json_errors {
                let structured = StructuredError::new(&err, exit_code);
                if let Ok(json) = serde_json::to_string_pretty(&structured) {
                    eprintln!("{}", json);
                } else {
                    eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err);
                }
            } else {
                eprintln!("[{}] Error: {:#}", exit_code.code_prefix(), err);
            }

            std::process::exit(exit_code.as_i32());
        }
    }
}
