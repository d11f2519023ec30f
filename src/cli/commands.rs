//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::io::{self, IsTerminal};

use crate::harness::Harness;
use crate::report::ConsoleReporter;

use super::{Cli, CliError, CliResult, ExitCode};

/// Run the whole suite described by `cli` and map the tally to an exit code.
pub fn run_suite(cli: &Cli) -> CliResult<ExitCode> {
    let harness = Harness::for_suite(cli.layout(), cli.toolchain());

    let stdout = io::stdout();
    let color = stdout.is_terminal();
    let mut reporter = ConsoleReporter::new(stdout.lock())
        .with_verbose(cli.verbose)
        .with_color(color);

    let summary = harness
        .run(&mut reporter)
        .map_err(|e| CliError::failure(format!("Error: {}", e)))?;

    if summary.all_passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        // Summary already printed
        Err(CliError::new("", ExitCode::FAILURE))
    }
}
