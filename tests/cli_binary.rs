//
// cli_binary.rs
// Toolsuite-rs
//
// Process-level tests of the toolsuite binary: exit statuses and what lands on stdout/stderr.
//
// Thales Matheus Mendonça Santos - November 2025

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

/// Install root holding a version resource.
fn install_root() -> TempDir {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("VERSION.txt"), "0.3.0-test\nsecond line\n").expect("write version");
    dir
}

fn toolsuite(root: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("toolsuite").expect("binary");
    cmd.env("TOOLSUITE_HOME", root.path()).env_remove("TOOLSUITE_LOG");
    cmd
}

#[test]
fn no_arguments_prints_help_and_exits_zero() {
    let root = install_root();
    toolsuite(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("toolsuite"))
        .stdout(predicate::str::contains("remove-background"));
}

#[test]
fn version_prints_the_bare_token() {
    let root = install_root();
    for flag in ["--version", "-v"] {
        toolsuite(&root).arg(flag).assert().success().stdout("0.3.0-test\n");
    }
}

#[test]
fn version_wins_over_an_incomplete_subcommand() {
    let root = install_root();
    toolsuite(&root)
        .args(["-v", "remove-background"])
        .assert()
        .success()
        .stdout("0.3.0-test\n");
}

#[test]
fn bare_separator_reports_the_missing_tool() {
    let root = install_root();
    toolsuite(&root)
        .arg("--")
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("<TOOL>"));
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    let root = install_root();
    toolsuite(&root)
        .arg("make-coffee")
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("make-coffee"));
}

#[test]
fn missing_required_flag_is_a_usage_error() {
    let root = install_root();
    toolsuite(&root)
        .args(["remove-background", "--output", "out.csv"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--input"));
}

#[test]
fn validation_failure_exits_non_zero_with_message() {
    let root = install_root();
    let missing = root.path().join("missing.csv");
    toolsuite(&root)
        .args(["remove-background", "--input"])
        .arg(&missing)
        .args(["--output"])
        .arg(root.path().join("out.csv"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn missing_version_resource_fails_startup() {
    let root = tempdir().expect("tempdir");
    let mut cmd = Command::cargo_bin("toolsuite").expect("binary");
    cmd.env("TOOLSUITE_HOME", root.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("VERSION.txt"));
}

#[test]
fn successful_run_exits_zero() {
    let root = install_root();
    let input = root.path().join("raw.csv");
    fs::write(
        &input,
        "barcode,GeneA,GeneB\nCELL1,90,80\nCELL2,70,95\nEMPTY1,1,6\nEMPTY2,0,7\n",
    )
    .expect("write matrix");
    let output = root.path().join("denoised.csv");

    toolsuite(&root)
        .args(["remove-background", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("cells: 2"));

    assert!(output.exists());
    assert!(root.path().join("denoised_metrics.json").exists());
}
