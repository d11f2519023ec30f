//! Suite orchestration
//!
//! [`Harness::run`] prepares the toolchain, discovers the examples, runs the
//! pipeline over each one in sorted order, and folds the verdicts into a
//! [`RunSummary`]. One example's failure never stops the run.

use std::fmt;
use std::time::Instant;

use crate::error::HarnessError;
use crate::golden::{FsGoldenStore, GoldenStore};
use crate::layout::{Example, SuiteLayout};
use crate::pipeline::{PipelineExecutor, Verdict};
use crate::report::Reporter;
use crate::stage::{ProcessRunner, StageRunner};
use crate::toolchain::Toolchain;

/// Passed count over total count for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub passed: usize,
    pub total: usize,
}

impl RunSummary {
    /// Fold one verdict into the tally.
    pub fn record(self, verdict: &Verdict) -> Self {
        let passed = matches!(verdict, Ok(outcome) if outcome.is_pass());
        Self {
            passed: self.passed + usize::from(passed),
            total: self.total + 1,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Passed {}/{} tests", self.passed, self.total)
    }
}

/// A configured conformance run.
pub struct Harness<R, G> {
    runner: R,
    goldens: G,
    toolchain: Toolchain,
    layout: SuiteLayout,
}

impl Harness<ProcessRunner, FsGoldenStore> {
    /// Real processes, goldens read from the suite directory.
    pub fn for_suite(layout: SuiteLayout, toolchain: Toolchain) -> Self {
        let goldens = FsGoldenStore::new(layout.clone());
        Self::new(ProcessRunner, goldens, toolchain, layout)
    }
}

impl<R: StageRunner, G: GoldenStore> Harness<R, G> {
    pub fn new(runner: R, goldens: G, toolchain: Toolchain, layout: SuiteLayout) -> Self {
        Self {
            runner,
            goldens,
            toolchain,
            layout,
        }
    }

    pub fn layout(&self) -> &SuiteLayout {
        &self.layout
    }

    /// Build the compiler if a build command is configured, then make sure the
    /// artifact directory exists.
    pub fn prepare(&self) -> Result<(), HarnessError> {
        if let Some(build) = self.toolchain.prebuild() {
            tracing::info!(command = %build, "building compiler");
            let result = self.runner.run(&build)?;
            if !result.success() {
                return Err(HarnessError::Prebuild {
                    status: result.status_text(),
                    stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
                });
            }
        }
        self.layout.ensure_build_dir()
    }

    /// Run every example and report as it goes.
    pub fn run(&self, reporter: &mut dyn Reporter) -> Result<RunSummary, HarnessError> {
        self.prepare()?;
        let examples = self.layout.discover()?;
        tracing::info!(count = examples.len(), suite = %self.layout.root.display(), "running examples");
        self.run_examples(&examples, reporter)
    }

    /// Run the given examples in order. Only reporter I/O errors abort.
    pub fn run_examples(&self, examples: &[Example], reporter: &mut dyn Reporter) -> Result<RunSummary, HarnessError> {
        let executor = PipelineExecutor::new(&self.runner, &self.goldens, &self.toolchain, &self.layout);
        reporter.on_run_start(examples.len()).map_err(HarnessError::Report)?;

        let summary = examples.iter().try_fold(RunSummary::default(), |summary, example| {
            let start = Instant::now();
            let verdict = executor.run(example);
            reporter
                .on_example_complete(example, &verdict, start.elapsed())
                .map_err(HarnessError::Report)?;
            Ok::<_, HarnessError>(summary.record(&verdict))
        })?;

        tracing::debug!(passed = summary.passed, total = summary.total, "run complete");
        reporter.on_run_complete(&summary).map_err(HarnessError::Report)?;
        Ok(summary)
    }
}
