//! Four-stage pipeline for a single example
//!
//! ```text
//! compile ──► diagnostic check ──► assemble ──► link ──► execute ──► output check
//!                  │
//!                  └─ matched, non-empty: expected rejection, stop with Pass
//! ```
//!
//! The first divergence ends the pipeline. Both checks are byte-exact.

use crate::error::HarnessError;
use crate::golden::GoldenStore;
use crate::layout::{Example, SuiteLayout};
use crate::stage::{Stage, StageResult, StageRunner};
use crate::toolchain::Toolchain;

/// How an example passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// The compiler rejected the program with exactly the expected diagnostic
    ExpectedRejection,
    /// The program built, ran and printed exactly the expected output
    OutputMatched,
}

/// Terminal classification of one example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    Pass(PassKind),
    FailCompileDiagnosticMismatch { expected: Vec<u8>, actual: Vec<u8> },
    FailAssemble(StageResult),
    FailLink(StageResult),
    FailExecuteNonZero(StageResult),
    FailOutputMismatch { expected: Vec<u8>, actual: Vec<u8> },
}

impl PipelineOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, PipelineOutcome::Pass(_))
    }

    /// The stage whose check failed, if any.
    pub fn failed_stage(&self) -> Option<Stage> {
        match self {
            PipelineOutcome::Pass(_) => None,
            PipelineOutcome::FailCompileDiagnosticMismatch { .. } => Some(Stage::Compile),
            PipelineOutcome::FailAssemble(_) => Some(Stage::Assemble),
            PipelineOutcome::FailLink(_) => Some(Stage::Link),
            PipelineOutcome::FailExecuteNonZero(_) | PipelineOutcome::FailOutputMismatch { .. } => {
                Some(Stage::Execute)
            }
        }
    }
}

/// Result of judging one example: an outcome, or the reason it could not be judged.
pub type Verdict = Result<PipelineOutcome, HarnessError>;

/// Runs the pipeline for examples of one suite.
pub struct PipelineExecutor<'a, R, G> {
    runner: R,
    goldens: G,
    toolchain: &'a Toolchain,
    layout: &'a SuiteLayout,
}

impl<'a, R: StageRunner, G: GoldenStore> PipelineExecutor<'a, R, G> {
    pub fn new(runner: R, goldens: G, toolchain: &'a Toolchain, layout: &'a SuiteLayout) -> Self {
        Self {
            runner,
            goldens,
            toolchain,
            layout,
        }
    }

    #[tracing::instrument(skip_all, fields(example = %example.name))]
    pub fn run(&self, example: &Example) -> Verdict {
        let artifacts = self.layout.artifacts(&example.name);

        let compiled = self.runner.run(&self.toolchain.compile(example, &artifacts))?;
        let expected = self.goldens.expected_diagnostic(example)?;
        if compiled.stderr != expected {
            tracing::debug!(exit = %compiled.status_text(), "compiler diagnostics differ from golden");
            return Ok(PipelineOutcome::FailCompileDiagnosticMismatch {
                expected,
                actual: compiled.stderr,
            });
        }
        if !expected.is_empty() {
            // Compiler exit status is deliberately ignored here.
            tracing::debug!("expected rejection matched");
            return Ok(PipelineOutcome::Pass(PassKind::ExpectedRejection));
        }

        let assembled = self.runner.run(&self.toolchain.assemble(&artifacts))?;
        if !assembled.success() {
            tracing::debug!(exit = %assembled.status_text(), "assembler failed");
            return Ok(PipelineOutcome::FailAssemble(assembled));
        }

        let linked = self.runner.run(&self.toolchain.link(&artifacts))?;
        if !linked.success() {
            tracing::debug!(exit = %linked.status_text(), "linker failed");
            return Ok(PipelineOutcome::FailLink(linked));
        }

        let executed = self.runner.run(&self.toolchain.execute(&artifacts))?;
        if !executed.success() {
            tracing::debug!(exit = %executed.status_text(), "executable failed");
            return Ok(PipelineOutcome::FailExecuteNonZero(executed));
        }

        let expected = self.goldens.expected_output(example)?;
        if executed.stdout != expected {
            tracing::debug!("program output differs from golden");
            return Ok(PipelineOutcome::FailOutputMismatch {
                expected,
                actual: executed.stdout,
            });
        }

        Ok(PipelineOutcome::Pass(PassKind::OutputMatched))
    }
}
