//! Console reporting
//!
//! ## Reporter Trait
//!
//! The harness hands every verdict to a [`Reporter`] and never prints on its
//! own, so the report can be captured in tests or redirected. The console
//! format is plain text:
//!
//! ```text
//! Failed in compiler stage for examples/src/c.bf
//! Expected:
//!
//! Got:
//! segmentation fault
//!
//! Passed 3/4 tests
//! ```

use std::io::{self, Write};
use std::time::Duration;

use crate::error::HarnessError;
use crate::harness::RunSummary;
use crate::layout::Example;
use crate::pipeline::{PipelineOutcome, Verdict};
use crate::stage::StageResult;

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";

/// Receives harness progress.
pub trait Reporter {
    /// Called once after discovery.
    fn on_run_start(&mut self, _total: usize) -> io::Result<()> {
        Ok(())
    }

    /// Called after each example, in processing order.
    fn on_example_complete(&mut self, example: &Example, verdict: &Verdict, elapsed: Duration) -> io::Result<()>;

    /// Called once after the last example.
    fn on_run_complete(&mut self, summary: &RunSummary) -> io::Result<()>;
}

/// Writes the plain-text report to any writer.
pub struct ConsoleReporter<W> {
    out: W,
    /// Also print passing examples with their duration
    pub verbose: bool,
    /// Wrap per-example headlines in ANSI colors
    pub color: bool,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            verbose: false,
            color: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.color {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn headline(&mut self, text: String) -> io::Result<()> {
        let line = self.paint(&text, RED);
        writeln!(self.out, "{}", line)
    }

    fn expected_got(&mut self, expected: &[u8], actual: &[u8]) -> io::Result<()> {
        writeln!(self.out, "Expected:\n{}", String::from_utf8_lossy(expected))?;
        writeln!(self.out, "Got:\n{}", String::from_utf8_lossy(actual))
    }

    fn tool_stderr(&mut self, result: &StageResult) -> io::Result<()> {
        if result.stderr.is_empty() {
            return Ok(());
        }
        write!(self.out, "{}", String::from_utf8_lossy(&result.stderr))?;
        if !result.stderr.ends_with(b"\n") {
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn failure(&mut self, source: &str, outcome: &PipelineOutcome) -> io::Result<()> {
        match outcome {
            PipelineOutcome::Pass(_) => Ok(()),
            PipelineOutcome::FailCompileDiagnosticMismatch { expected, actual } => {
                self.headline(format!("Failed in compiler stage for {}", source))?;
                self.expected_got(expected, actual)
            }
            PipelineOutcome::FailAssemble(result) => {
                self.headline(format!(
                    "Failed during assembler stage for {} ({})",
                    source,
                    result.status_text()
                ))?;
                self.tool_stderr(result)
            }
            PipelineOutcome::FailLink(result) => {
                self.headline(format!(
                    "Failed during linker stage for {} ({})",
                    source,
                    result.status_text()
                ))?;
                self.tool_stderr(result)
            }
            PipelineOutcome::FailExecuteNonZero(result) => {
                self.headline(format!(
                    "Failed during execution stage for {} ({})",
                    source,
                    result.status_text()
                ))?;
                self.tool_stderr(result)
            }
            PipelineOutcome::FailOutputMismatch { expected, actual } => {
                self.headline(format!("Failed in output check for {}", source))?;
                self.expected_got(expected, actual)
            }
        }
    }

    fn error(&mut self, source: &str, error: &HarnessError) -> io::Result<()> {
        self.headline(format!("Error while testing {}", source))?;
        writeln!(self.out, "{}", error)
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn on_example_complete(&mut self, example: &Example, verdict: &Verdict, elapsed: Duration) -> io::Result<()> {
        let source = example.source.display().to_string();
        match verdict {
            Ok(outcome) if outcome.is_pass() => {
                if self.verbose {
                    let status = self.paint("PASSED", GREEN);
                    writeln!(self.out, "{} {} ({}ms)", status, source, elapsed.as_millis())?;
                }
                Ok(())
            }
            Ok(outcome) => self.failure(&source, outcome),
            Err(e) => self.error(&source, e),
        }
    }

    fn on_run_complete(&mut self, summary: &RunSummary) -> io::Result<()> {
        writeln!(self.out, "{}", summary)?;
        self.out.flush()
    }
}
