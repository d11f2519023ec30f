#![forbid(unsafe_code)]
//! Golden-file conformance harness for the bf ahead-of-time compiler
//!
//! Every example under `<suite>/src` is compiled to NASM assembly, assembled,
//! linked and executed. The compiler's stderr and the program's stdout are
//! compared byte for byte against golden files, and the run ends with
//! `Passed X/N tests` and an exit status for CI.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod error;
pub mod golden;
pub mod harness;
pub mod layout;
pub mod pipeline;
pub mod report;
pub mod stage;
pub mod toolchain;

pub use error::HarnessError;
pub use golden::{FsGoldenStore, GoldenStore, MemoryGoldenStore};
pub use harness::{Harness, RunSummary};
pub use layout::{Example, SuiteLayout};
pub use pipeline::{PassKind, PipelineExecutor, PipelineOutcome, Verdict};
pub use report::{ConsoleReporter, Reporter};
pub use stage::{Invocation, ProcessRunner, Stage, StageResult, StageRunner};
pub use toolchain::Toolchain;
