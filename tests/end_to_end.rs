//! End-to-end run with real processes
//!
//! The "toolchain" is three shell scripts: the compiler copies the source to
//! the assembly path (or rejects sources containing `]]`), the assembler
//! copies it to the object path, and the linker prepends a shebang and marks
//! it executable. Sources are therefore shell snippets.
//!
//! Kept as the only test in this binary: it writes scripts and then executes
//! them, which must not race with forks from other test threads.

#![cfg(unix)]

use std::fs;
use std::path::Path;

use bfc_conformance::{ConsoleReporter, Harness, RunSummary, SuiteLayout, Toolchain};

const COMPILER: &str = r#"#!/bin/sh
if grep -q ']]' "$2"; then
  printf 'Error: unmatched brackets\n' >&2
  exit 1
fi
cp "$2" "$4"
"#;

const ASSEMBLER: &str = r#"#!/bin/sh
cp "$1" "$3"
"#;

const LINKER: &str = r#"#!/bin/sh
{ printf '#!/bin/sh\n'; cat "$1"; } > "$3" && chmod +x "$3"
"#;

fn write_case(root: &Path, name: &str, source: &str, diagnostic: &str, output: Option<&str>) {
    fs::write(root.join("src").join(format!("{name}.bf")), source).unwrap();
    fs::write(root.join("err").join(format!("{name}.txt")), diagnostic).unwrap();
    if let Some(output) = output {
        fs::write(root.join("out").join(format!("{name}.txt")), output).unwrap();
    }
}

#[test]
fn test_full_pipeline_with_shell_toolchain() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("suite");
    let tools = dir.path().join("tools");
    for sub in ["src", "err", "out"] {
        fs::create_dir_all(root.join(sub)).unwrap();
    }
    fs::create_dir_all(&tools).unwrap();

    let compiler = tools.join("cc.sh");
    let assembler = tools.join("as.sh");
    let linker = tools.join("ld.sh");
    fs::write(&compiler, COMPILER).unwrap();
    fs::write(&assembler, ASSEMBLER).unwrap();
    fs::write(&linker, LINKER).unwrap();

    write_case(&root, "add", "printf '3\\n'\n", "", Some("3\n"));
    write_case(&root, "bad", "+[]]\n", "Error: unmatched brackets\n", None);
    write_case(&root, "crash", "exit 7\n", "", Some(""));
    write_case(&root, "off", "printf '4\\n'\n", "", Some("3\n"));

    // The scripts are written without the executable bit; the build command fixes that.
    let toolchain = Toolchain::new()
        .with_compiler(&compiler)
        .with_assembler(&assembler, Vec::new())
        .with_linker(&linker, Vec::new())
        .with_prebuild_command(&format!(
            "chmod +x {} {} {}",
            compiler.display(),
            assembler.display(),
            linker.display()
        ));
    let harness = Harness::for_suite(SuiteLayout::new(&root), toolchain);

    let mut reporter = ConsoleReporter::new(Vec::new());
    let summary = harness.run(&mut reporter).unwrap();
    let report = String::from_utf8(reporter.into_inner()).unwrap();

    assert_eq!(summary, RunSummary { passed: 2, total: 4 });
    assert!(root.join("asm").join("add").is_file());
    assert!(!root.join("asm").join("bad.o").exists());
    assert!(
        report.contains(&format!(
            "Failed during execution stage for {} (exit status 7)",
            root.join("src").join("crash.bf").display()
        )),
        "{report}"
    );
    assert!(report.contains("Expected:\n3\n\nGot:\n4\n"), "{report}");
    assert!(report.ends_with("Passed 2/4 tests\n"), "{report}");

    // Artifacts are overwritten in place on a second run.
    let mut again = ConsoleReporter::new(Vec::new());
    assert_eq!(harness.run(&mut again).unwrap(), summary);
}
