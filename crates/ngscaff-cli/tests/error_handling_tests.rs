//! Tests for error messages, suggestions and exit codes.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn offline_config(temp: &TempDir) -> std::path::PathBuf {
    let path = temp.path().join("ngscaff-test.toml");
    fs::write(
        &path,
        "[registry]\nurl = \"http://127.0.0.1:9\"\n\n[install]\nskip = true\n",
    )
    .unwrap();
    path
}

#[test]
fn test_error_invalid_project_name() {
    let temp = TempDir::new().unwrap();
    let config = offline_config(&temp);

    Command::cargo_bin("ngscaff")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .args(["new", "!!!", "--yes"])
        .arg("--dir")
        .arg(temp.path().join("out"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid application name"))
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn test_error_existing_project_suggests_force() {
    let temp = TempDir::new().unwrap();
    let config = offline_config(&temp);
    let out = temp.path().join("twice");

    let run = || {
        let mut cmd = Command::cargo_bin("ngscaff").unwrap();
        cmd.arg("--config")
            .arg(&config)
            .args(["new", "twice", "--yes", "--angular-version", "1.3.0"])
            .arg("--dir")
            .arg(&out);
        cmd
    };

    run().assert().success();
    run()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));

    run().arg("--force").assert().success();
}

#[test]
fn test_error_missing_config_file() {
    let temp = TempDir::new().unwrap();

    Command::cargo_bin("ngscaff")
        .unwrap()
        .arg("--config")
        .arg(temp.path().join("missing.toml"))
        .args(["config", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_error_unknown_config_key() {
    let temp = TempDir::new().unwrap();
    let config = offline_config(&temp);

    Command::cargo_bin("ngscaff")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "nope.nothing"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_error_quiet_conflicts_with_verbose() {
    Command::cargo_bin("ngscaff")
        .unwrap()
        .args(["-q", "-v", "config", "path"])
        .assert()
        .code(2);
}
