//! External tool configuration and command lines for each stage

use std::path::PathBuf;

use crate::layout::{Artifacts, Example};
use crate::stage::{Invocation, Stage};

/// Programs used by the pipeline and their leading flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    /// Compiler under test
    pub compiler: PathBuf,
    pub assembler: PathBuf,
    pub assembler_args: Vec<String>,
    pub linker: PathBuf,
    pub linker_args: Vec<String>,
    /// Shell command that builds the compiler, run once before discovery
    pub prebuild: Option<String>,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            compiler: PathBuf::from("./main"),
            assembler: PathBuf::from("nasm"),
            assembler_args: vec!["-g".to_string(), "-felf64".to_string()],
            linker: PathBuf::from("ld"),
            linker_args: Vec::new(),
            prebuild: None,
        }
    }
}

impl Toolchain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compiler(mut self, compiler: impl Into<PathBuf>) -> Self {
        self.compiler = compiler.into();
        self
    }

    pub fn with_assembler(mut self, assembler: impl Into<PathBuf>, args: Vec<String>) -> Self {
        self.assembler = assembler.into();
        self.assembler_args = args;
        self
    }

    pub fn with_linker(mut self, linker: impl Into<PathBuf>, args: Vec<String>) -> Self {
        self.linker = linker.into();
        self.linker_args = args;
        self
    }

    /// Set the compiler build command. It runs through `sh -c`, so quoting
    /// and `&&` behave as in a shell. A blank string clears it.
    pub fn with_prebuild_command(mut self, command: &str) -> Self {
        self.prebuild = if command.trim().is_empty() {
            None
        } else {
            Some(command.to_string())
        };
        self
    }

    /// `sh -c <build command>`
    pub fn prebuild(&self) -> Option<Invocation> {
        let command = self.prebuild.as_ref()?;
        Some(Invocation::new(Stage::Prebuild, "sh").arg("-c").arg(command))
    }

    /// `<compiler> -f <source> -o <asm>`
    pub fn compile(&self, example: &Example, artifacts: &Artifacts) -> Invocation {
        Invocation::new(Stage::Compile, &self.compiler)
            .arg("-f")
            .arg(&example.source)
            .arg("-o")
            .arg(&artifacts.assembly)
    }

    /// `<assembler> <flags> <asm> -o <object>`
    pub fn assemble(&self, artifacts: &Artifacts) -> Invocation {
        Invocation::new(Stage::Assemble, &self.assembler)
            .args(&self.assembler_args)
            .arg(&artifacts.assembly)
            .arg("-o")
            .arg(&artifacts.object)
    }

    /// `<linker> <flags> <object> -o <executable>`
    pub fn link(&self, artifacts: &Artifacts) -> Invocation {
        Invocation::new(Stage::Link, &self.linker)
            .args(&self.linker_args)
            .arg(&artifacts.object)
            .arg("-o")
            .arg(&artifacts.executable)
    }

    /// The produced executable, no arguments.
    pub fn execute(&self, artifacts: &Artifacts) -> Invocation {
        Invocation::new(Stage::Execute, &artifacts.executable)
    }
}
