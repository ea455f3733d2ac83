//! Corruption recovery tests for the bloom binary.
//!
//! These tests verify the system can handle:
//! - Corrupted state files
//! - State written by an unversioned layout
//! - Missing data directories

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cli(data_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("bloom"));
    cmd.env("XDG_CONFIG_HOME", data_dir.join("config"))
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--today")
        .arg("2025-06-01");
    cmd
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_corrupted_state_file_falls_back_to_defaults() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    let state_path = data_dir.join("state.json");
    fs::write(&state_path, "{ invalid json }}}}").expect("Failed to write corrupted state");

    cli(data_dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello there!"));
}

#[test]
fn test_write_after_corruption_produces_valid_state() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    let state_path = data_dir.join("state.json");
    fs::write(&state_path, "{\"version\": 1, \"user\": ").expect("Failed to write partial state");

    cli(data_dir)
        .args(["symptoms", "log", "Nausea"])
        .assert()
        .success();

    let content = fs::read_to_string(&state_path).unwrap();
    let state: serde_json::Value = serde_json::from_str(&content).expect("State should be valid JSON");
    assert_eq!(state["version"], 1);
    assert_eq!(state["logs"]["symptomsByDate"]["2025-06-01"][0], "Nausea");
}

#[test]
fn test_unversioned_state_is_replaced() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::write(
        data_dir.join("state.json"),
        r#"{"user": {"name": "Legacy", "isPregnant": true, "edd": "2025-09-01"}}"#,
    )
    .unwrap();

    cli(data_dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello there!"))
        .stdout(predicate::str::contains("Legacy").not());
}

#[test]
fn test_missing_data_dir_is_created_on_write() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("nested").join("bloom");

    cli(&data_dir)
        .args(["premium", "enable"])
        .assert()
        .success();

    assert!(data_dir.join("state.json").exists());
}
