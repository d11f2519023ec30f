//! Golden-file access
//!
//! Goldens are compared as raw bytes. Nothing here trims, decodes or
//! normalizes line endings.

use std::collections::HashMap;
use std::fs;

use crate::error::{GoldenKind, HarnessError};
use crate::layout::{Example, SuiteLayout};

/// Read-only source of expected results.
pub trait GoldenStore {
    /// Expected compiler stderr. Empty means the example must compile cleanly.
    fn expected_diagnostic(&self, example: &Example) -> Result<Vec<u8>, HarnessError>;

    /// Expected stdout of the produced executable.
    fn expected_output(&self, example: &Example) -> Result<Vec<u8>, HarnessError>;
}

impl<G: GoldenStore + ?Sized> GoldenStore for &G {
    fn expected_diagnostic(&self, example: &Example) -> Result<Vec<u8>, HarnessError> {
        (**self).expected_diagnostic(example)
    }

    fn expected_output(&self, example: &Example) -> Result<Vec<u8>, HarnessError> {
        (**self).expected_output(example)
    }
}

/// Goldens stored under a [`SuiteLayout`].
#[derive(Debug, Clone)]
pub struct FsGoldenStore {
    layout: SuiteLayout,
}

impl FsGoldenStore {
    pub fn new(layout: SuiteLayout) -> Self {
        Self { layout }
    }
}

impl GoldenStore for FsGoldenStore {
    fn expected_diagnostic(&self, example: &Example) -> Result<Vec<u8>, HarnessError> {
        let path = self.layout.diagnostic_golden(&example.name);
        fs::read(&path).map_err(|e| HarnessError::golden(GoldenKind::Diagnostic, path, e))
    }

    fn expected_output(&self, example: &Example) -> Result<Vec<u8>, HarnessError> {
        let path = self.layout.output_golden(&example.name);
        fs::read(&path).map_err(|e| HarnessError::golden(GoldenKind::Output, path, e))
    }
}

/// In-memory goldens keyed by example name.
#[derive(Debug, Clone, Default)]
pub struct MemoryGoldenStore {
    diagnostics: HashMap<String, Vec<u8>>,
    outputs: HashMap<String, Vec<u8>>,
}

impl MemoryGoldenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_diagnostic(mut self, name: impl Into<String>, text: impl Into<Vec<u8>>) -> Self {
        self.diagnostics.insert(name.into(), text.into());
        self
    }

    pub fn with_output(mut self, name: impl Into<String>, text: impl Into<Vec<u8>>) -> Self {
        self.outputs.insert(name.into(), text.into());
        self
    }
}

impl GoldenStore for MemoryGoldenStore {
    fn expected_diagnostic(&self, example: &Example) -> Result<Vec<u8>, HarnessError> {
        self.diagnostics
            .get(&example.name)
            .cloned()
            .ok_or_else(|| HarnessError::GoldenMissing {
                kind: GoldenKind::Diagnostic,
                path: format!("{}.txt", example.name).into(),
            })
    }

    fn expected_output(&self, example: &Example) -> Result<Vec<u8>, HarnessError> {
        self.outputs
            .get(&example.name)
            .cloned()
            .ok_or_else(|| HarnessError::GoldenMissing {
                kind: GoldenKind::Output,
                path: format!("{}.txt", example.name).into(),
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn suite() -> (tempfile::TempDir, SuiteLayout) {
        let dir = tempfile::tempdir().unwrap();
        let layout = SuiteLayout::new(dir.path());
        fs::create_dir_all(layout.diagnostics_dir()).unwrap();
        fs::create_dir_all(layout.outputs_dir()).unwrap();
        (dir, layout)
    }

    #[test]
    fn test_reads_bytes_verbatim() {
        let (_dir, layout) = suite();
        fs::write(layout.diagnostic_golden("add"), "").unwrap();
        fs::write(layout.output_golden("add"), "3\r\n\n").unwrap();

        let store = FsGoldenStore::new(layout);
        let example = Example::new("add", "add.bf");

        assert_eq!(store.expected_diagnostic(&example).unwrap(), b"");
        assert_eq!(store.expected_output(&example).unwrap(), b"3\r\n\n");
    }

    #[test]
    fn test_missing_diagnostic_is_golden_missing() {
        let (_dir, layout) = suite();
        let store = FsGoldenStore::new(layout);

        let err = store.expected_diagnostic(&Example::new("ghost", "ghost.bf")).unwrap_err();
        assert!(matches!(
            err,
            HarnessError::GoldenMissing {
                kind: GoldenKind::Diagnostic,
                ..
            }
        ));
    }

    #[test]
    fn test_output_is_independent_of_diagnostic() {
        let (_dir, layout) = suite();
        fs::write(layout.diagnostic_golden("bad"), "Error: unmatched brackets\n").unwrap();
        let store = FsGoldenStore::new(layout);
        let example = Example::new("bad", "bad.bf");

        assert!(store.expected_diagnostic(&example).is_ok());
        assert!(matches!(
            store.expected_output(&example),
            Err(HarnessError::GoldenMissing {
                kind: GoldenKind::Output,
                ..
            })
        ));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryGoldenStore::new().with_diagnostic("a", "").with_output("a", "hi\n");
        let example = Example::new("a", "a.bf");

        assert_eq!(store.expected_diagnostic(&example).unwrap(), b"");
        assert_eq!(store.expected_output(&example).unwrap(), b"hi\n");
        assert!(store.expected_diagnostic(&Example::new("b", "b.bf")).is_err());
    }
}
