//! Suite directory layout and example discovery
//!
//! A suite is a directory with four children:
//!
//! ```text
//! <suite>/src/<name>.bf     source programs (discovery input)
//! <suite>/err/<name>.txt    expected compiler stderr
//! <suite>/out/<name>.txt    expected program stdout
//! <suite>/asm/<name>{.s,.o,} generated artifacts, overwritten every run
//! ```

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::HarnessError;

/// One test case, named by its source-file stem.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Example {
    pub name: String,
    pub source: PathBuf,
}

impl Example {
    pub fn new(name: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

/// Paths of the artifacts produced for one example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub assembly: PathBuf,
    pub object: PathBuf,
    pub executable: PathBuf,
}

/// Naming convention for a suite rooted at one directory.
#[derive(Debug, Clone)]
pub struct SuiteLayout {
    pub root: PathBuf,
    /// Source extension used for discovery, without the dot
    pub extension: String,
}

impl Default for SuiteLayout {
    fn default() -> Self {
        Self {
            root: PathBuf::from("examples"),
            extension: "bf".to_string(),
        }
    }
}

impl SuiteLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn source_dir(&self) -> PathBuf {
        self.root.join("src")
    }

    pub fn diagnostics_dir(&self) -> PathBuf {
        self.root.join("err")
    }

    pub fn outputs_dir(&self) -> PathBuf {
        self.root.join("out")
    }

    pub fn build_dir(&self) -> PathBuf {
        self.root.join("asm")
    }

    pub fn diagnostic_golden(&self, name: &str) -> PathBuf {
        self.diagnostics_dir().join(format!("{name}.txt"))
    }

    pub fn output_golden(&self, name: &str) -> PathBuf {
        self.outputs_dir().join(format!("{name}.txt"))
    }

    pub fn artifacts(&self, name: &str) -> Artifacts {
        let build = self.build_dir();
        Artifacts {
            assembly: build.join(format!("{name}.s")),
            object: build.join(format!("{name}.o")),
            executable: runnable_path(build.join(name)),
        }
    }

    /// List the examples in the source directory, sorted by name.
    ///
    /// Only regular files with the configured extension count; the order is
    /// independent of how the filesystem enumerates entries.
    pub fn discover(&self) -> Result<Vec<Example>, HarnessError> {
        let dir = self.source_dir();
        let entries = fs::read_dir(&dir).map_err(|source| HarnessError::Discovery {
            path: dir.clone(),
            source,
        })?;

        let mut examples = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| HarnessError::Discovery {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() || !has_extension(&path, &self.extension) {
                continue;
            }
            // Non UTF-8 stems get a lossy name but keep their real path.
            if let Some(stem) = path.file_stem() {
                examples.push(Example::new(stem.to_string_lossy(), &path));
            }
        }

        examples.sort();
        tracing::debug!(count = examples.len(), dir = %dir.display(), "discovered examples");
        Ok(examples)
    }

    /// Create the artifact directory if it does not exist yet.
    pub fn ensure_build_dir(&self) -> Result<(), HarnessError> {
        let dir = self.build_dir();
        fs::create_dir_all(&dir).map_err(|source| HarnessError::BuildDir { path: dir, source })
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension() == Some(OsStr::new(extension))
}

/// A bare file name would be looked up on `PATH`; anchor it to the cwd.
fn runnable_path(path: PathBuf) -> PathBuf {
    if path.components().count() == 1 {
        Path::new(".").join(path)
    } else {
        path
    }
}
