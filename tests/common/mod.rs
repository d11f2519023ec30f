//! Shared fakes for the integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use bfc_conformance::{HarnessError, Invocation, Stage, StageResult, StageRunner};

/// A toolchain that never spawns anything.
///
/// Every stage succeeds silently unless a result was scripted for the
/// `(example, stage)` pair. Every call is recorded.
#[derive(Default)]
pub struct FakeToolchain {
    scripted: HashMap<(String, Stage), StageResult>,
    calls: RefCell<Vec<(String, Stage)>>,
}

impl FakeToolchain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, example: &str, stage: Stage, code: i32, stdout: &str, stderr: &str) -> Self {
        self.scripted.insert(
            (example.to_string(), stage),
            StageResult {
                code: Some(code),
                stdout: stdout.as_bytes().to_vec(),
                stderr: stderr.as_bytes().to_vec(),
            },
        );
        self
    }

    /// Compiler prints `stderr` for `example`.
    pub fn diagnoses(self, example: &str, stderr: &str) -> Self {
        self.on(example, Stage::Compile, 1, "", stderr)
    }

    /// Produced executable for `example` prints `stdout` and exits 0.
    pub fn prints(self, example: &str, stdout: &str) -> Self {
        self.on(example, Stage::Execute, 0, stdout, "")
    }

    pub fn calls(&self) -> Vec<(String, Stage)> {
        self.calls.borrow().clone()
    }

    pub fn stages_for(&self, example: &str) -> Vec<Stage> {
        self.calls
            .borrow()
            .iter()
            .filter(|(name, _)| name == example)
            .map(|(_, stage)| *stage)
            .collect()
    }

    pub fn reset(&self) {
        self.calls.borrow_mut().clear();
    }
}

/// Recover the example name from the command line of any stage.
fn example_of(invocation: &Invocation) -> String {
    let path = match invocation.stage {
        Stage::Compile => invocation.args.get(1).map(Path::new),
        Stage::Assemble | Stage::Link => invocation.args.last().map(Path::new),
        Stage::Execute => Some(invocation.program.as_path()),
        Stage::Prebuild => None,
    };
    path.and_then(|p| p.file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl StageRunner for FakeToolchain {
    fn run(&self, invocation: &Invocation) -> Result<StageResult, HarnessError> {
        let name = example_of(invocation);
        self.calls.borrow_mut().push((name.clone(), invocation.stage));
        Ok(self
            .scripted
            .get(&(name, invocation.stage))
            .cloned()
            .unwrap_or(StageResult {
                code: Some(0),
                ..Default::default()
            }))
    }
}
