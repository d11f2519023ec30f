//! CLI module for the conformance harness
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::layout::SuiteLayout;
use crate::toolchain::Toolchain;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Golden-file conformance harness for the bf compiler
#[derive(Parser, Debug)]
#[command(name = "bfc-conformance")]
#[command(version = VERSION)]
#[command(about = "Compile, assemble, link and run every example and compare against golden files", long_about = None)]
pub struct Cli {
    /// Suite root containing src/, err/, out/ and asm/
    #[arg(long, value_name = "DIR", default_value = "examples")]
    pub suite: PathBuf,

    /// Compiler under test, invoked as `<compiler> -f <source> -o <asm>`
    #[arg(long, value_name = "PATH", default_value = "./main")]
    pub compiler: PathBuf,

    /// Assembler program
    #[arg(long, value_name = "PROG", default_value = "nasm")]
    pub assembler: PathBuf,

    /// Assembler flag placed before the input file (repeatable)
    #[arg(
        long = "assembler-arg",
        value_name = "ARG",
        allow_hyphen_values = true,
        default_values = ["-g", "-felf64"]
    )]
    pub assembler_args: Vec<String>,

    /// Linker program
    #[arg(long, value_name = "PROG", default_value = "ld")]
    pub linker: PathBuf,

    /// Linker flag placed before the object file (repeatable)
    #[arg(long = "linker-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub linker_args: Vec<String>,

    /// Source file extension used for discovery
    #[arg(long, value_name = "EXT", default_value = "bf")]
    pub extension: String,

    /// Shell command that builds the compiler before testing, e.g. "gcc main.c -o main"
    #[arg(long = "build-cmd", value_name = "CMD")]
    pub build_cmd: Option<String>,

    /// Also list passing examples
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn layout(&self) -> SuiteLayout {
        SuiteLayout::new(&self.suite).with_extension(&self.extension)
    }

    pub fn toolchain(&self) -> Toolchain {
        let toolchain = Toolchain::new()
            .with_compiler(&self.compiler)
            .with_assembler(&self.assembler, self.assembler_args.clone())
            .with_linker(&self.linker, self.linker_args.clone());
        match &self.build_cmd {
            Some(cmd) => toolchain.with_prebuild_command(cmd),
            None => toolchain,
        }
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called.
pub fn run() {
    let cli = Cli::parse();

    match commands::run_suite(&cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
