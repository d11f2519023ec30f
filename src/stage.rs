//! Stage execution: one external process per call
//!
//! [`StageRunner`] is the only place the harness touches the operating system's
//! process API. The pipeline builds an [`Invocation`], hands it to a runner and
//! gets back a [`StageResult`]. Tests substitute a scripted runner.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::HarnessError;

/// One step of the build-and-run pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Compiler build command run once before discovery
    Prebuild,
    Compile,
    Assemble,
    Link,
    Execute,
}

impl Stage {
    /// The stages every clean-compiling example goes through, in order.
    pub const PIPELINE: [Stage; 4] = [Stage::Compile, Stage::Assemble, Stage::Link, Stage::Execute];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Prebuild => "compiler build",
            Stage::Compile => "compiler",
            Stage::Assemble => "assembler",
            Stage::Link => "linker",
            Stage::Execute => "execution",
        };
        f.write_str(name)
    }
}

/// A fully resolved command line for one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub stage: Stage,
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new(stage: Stage, program: impl Into<PathBuf>) -> Self {
        Self {
            stage,
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Captured outcome of one finished process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StageResult {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl StageResult {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Human-readable exit status for failure reports.
    pub fn status_text(&self) -> String {
        match self.code {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Runs a single external process to completion.
pub trait StageRunner {
    /// Spawn `invocation`, wait for it, and capture its exit status and both
    /// output streams. A process that cannot be started is an error, not a
    /// nonzero exit.
    fn run(&self, invocation: &Invocation) -> Result<StageResult, HarnessError>;
}

impl<R: StageRunner + ?Sized> StageRunner for &R {
    fn run(&self, invocation: &Invocation) -> Result<StageResult, HarnessError> {
        (**self).run(invocation)
    }
}

/// Real process execution through `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl StageRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<StageResult, HarnessError> {
        tracing::debug!(stage = %invocation.stage, command = %invocation, "launching");

        // `output()` drains stdout and stderr concurrently before waiting.
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| HarnessError::Launch {
                stage: invocation.stage,
                program: invocation.program.clone(),
                source,
            })?;

        Ok(StageResult {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
