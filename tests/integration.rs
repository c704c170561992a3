// Integration tests for the guardfi CLI surface.
//
// These tests use assert_cmd to invoke the binary and verify
// exit codes and stdout/stderr output.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn guardfi() -> Command {
    Command::cargo_bin("guardfi").expect("binary should exist")
}

#[test]
fn cli_version_flag() {
    guardfi()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("guardfi"));
}

#[test]
fn cli_help_flag() {
    guardfi()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("security scoring"));
}

#[test]
fn cli_without_subcommand_is_usage_error() {
    guardfi().assert().code(2);
}

#[test]
fn analyze_requires_path() {
    guardfi()
        .arg("analyze")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("required"));
}

#[test]
fn analyze_rejects_unknown_format() {
    guardfi()
        .args(["analyze", "tests/fixtures/Minimal.sol", "--format", "xml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn analyze_rejects_unknown_profile() {
    guardfi()
        .args(["analyze", "tests/fixtures/Minimal.sol", "--profile", "paranoid"])
        .assert()
        .code(2);
}

#[test]
fn quiet_conflicts_with_verbose() {
    guardfi()
        .args(["-q", "-v", "signals", "tests/fixtures/Minimal.sol"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn signals_requires_path() {
    guardfi()
        .arg("signals")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn signals_reports_missing_file() {
    guardfi()
        .args(["signals", "does/not/exist.sol"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("contract source not found"));
}
