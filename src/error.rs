//! Errors raised while driving the conformance pipeline
//!
//! Mismatches and nonzero tool exits are not errors: they are ordinary
//! [`PipelineOutcome`](crate::pipeline::PipelineOutcome) values. `HarnessError`
//! covers the cases where the harness cannot judge an example at all (a tool
//! that never started, a golden file that is not there) and the setup steps
//! that run before any example.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::stage::Stage;

/// Which golden file a read refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoldenKind {
    Diagnostic,
    Output,
}

impl std::fmt::Display for GoldenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoldenKind::Diagnostic => write!(f, "diagnostic"),
            GoldenKind::Output => write!(f, "output"),
        }
    }
}

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("failed to launch {stage} `{}`: {source}", program.display())]
    Launch {
        stage: Stage,
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("expected {kind} file not found: {}", path.display())]
    GoldenMissing { kind: GoldenKind, path: PathBuf },

    #[error("failed to read expected {kind} file {}: {source}", path.display())]
    GoldenUnreadable {
        kind: GoldenKind,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to list examples in {}: {source}", path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create build directory {}: {source}", path.display())]
    BuildDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("compiler build command failed ({status})\n{stderr}")]
    Prebuild { status: String, stderr: String },

    #[error("failed to write report: {0}")]
    Report(#[source] io::Error),
}

impl HarnessError {
    /// Map a golden-file read error, keeping NotFound distinct.
    pub(crate) fn golden(kind: GoldenKind, path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            HarnessError::GoldenMissing { kind, path }
        } else {
            HarnessError::GoldenUnreadable { kind, path, source }
        }
    }
}
