//! Integration tests for the bloom binary.
//!
//! These tests verify end-to-end behavior including:
//! - Onboarding and the dashboard for both pregnancy and cycle tracking
//! - Daily check-ins and weekly trends
//! - Symptoms, notes, appointments and period logs
//! - Export and reset

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const TODAY: &str = "2025-06-01";

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// CLI bound to `data_dir`, a fixed clock and an isolated config home
fn cli(data_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("bloom"));
    cmd.env("XDG_CONFIG_HOME", data_dir.join("config"))
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--today")
        .arg(TODAY);
    cmd
}

fn read_state(data_dir: &Path) -> Value {
    let content = fs::read_to_string(data_dir.join("state.json")).expect("Failed to read state");
    serde_json::from_str(&content).expect("State is not valid JSON")
}

#[test]
fn test_cli_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("bloom"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pregnancy and cycle tracker"));
}

#[test]
fn test_default_command_shows_empty_dashboard() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello there!"))
        .stdout(predicate::str::contains("No period logged yet"))
        .stdout(predicate::str::contains("Stay hydrated with plenty of water"));

    // Reading never creates state
    assert!(!temp_dir.path().join("state.json").exists());
}

#[test]
fn test_onboard_pregnancy_from_due_date() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args(["onboard", "--name", "Ada", "--pregnant", "--edd", "2025-09-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile saved"))
        .stdout(predicate::str::contains("Hello, Ada!"))
        .stdout(predicate::str::contains("Week 26, Day 7"))
        .stdout(predicate::str::contains("Second Trimester"))
        .stdout(predicate::str::contains("Due: September 1, 2025 (92 days to go)"))
        .stdout(predicate::str::contains("Progress: 65%"))
        .stdout(predicate::str::contains("Red onion"));

    let state = read_state(data_dir);
    assert_eq!(state["version"], 1);
    assert_eq!(state["user"]["isPregnant"], true);
    assert_eq!(state["user"]["edd"], "2025-09-01");
    assert_eq!(state["user"]["name"], "Ada");

    cli(data_dir)
        .arg("tips")
        .assert()
        .success()
        .stdout(predicate::str::contains("Week 26 tips:"));
}

#[test]
fn test_redating_pregnancy_by_lmp_replaces_due_date() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args(["onboard", "--pregnant", "--edd", "2025-09-01"])
        .assert()
        .success();

    cli(data_dir)
        .args(["onboard", "--lmp", "2025-03-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Due: December 6, 2025"));

    let state = read_state(data_dir);
    assert_eq!(state["user"]["lmp"], "2025-03-01");
    assert!(state["user"]["edd"].is_null());
}

#[test]
fn test_onboard_cycle_tracking() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args(["onboard", "--lmp", "2025-05-25", "--cycle-length", "28"])
        .assert()
        .success();

    cli(data_dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cycle progress: 25%"))
        .stdout(predicate::str::contains("Next period: 2025-06-22 (in 21 days)"))
        .stdout(predicate::str::contains("Fertile window: 2025-06-03 to 2025-06-09"))
        .stdout(predicate::str::contains("You are in your fertile window").not());
}

#[test]
fn test_onboard_rejects_bad_input() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args(["onboard", "--email", "not-an-email"])
        .assert()
        .failure();

    cli(data_dir)
        .args(["onboard", "--cycle-length", "0"])
        .assert()
        .failure();

    cli(data_dir)
        .args(["onboard", "--lmp", "June 1st"])
        .assert()
        .failure();

    assert!(!data_dir.join("state.json").exists());
}

#[test]
fn test_analyze_red_flag_is_saved() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args([
            "analyze",
            "--bleeding",
            "--water-cups",
            "8",
            "--sleep-hours",
            "8",
            "--exercise-mins",
            "200",
            "--vitamin",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Attention Needed (score 5)"))
        .stdout(predicate::str::contains(
            "Unexpected bleeding should be evaluated immediately",
        ))
        .stdout(predicate::str::contains("This is not medical advice"));

    let state = read_state(data_dir);
    let entry = &state["logs"]["analyzerByDate"][TODAY];
    assert_eq!(entry["score"], 5);
    assert_eq!(entry["level"], "red_flag");
    assert_eq!(entry["bleeding"], true);
}

#[test]
fn test_analyze_healthy_day() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args([
            "analyze",
            "--water-cups",
            "8",
            "--sleep-hours",
            "8",
            "--exercise-mins",
            "200",
            "--caffeine-mg",
            "0",
            "--alcohol-drinks",
            "0",
            "--vitamin",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("All Good (score 0)"))
        .stdout(predicate::str::contains("Excellent hydration!"));
}

#[test]
fn test_analyze_accepts_negative_counts() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args([
            "analyze",
            "--water-cups",
            "-2",
            "--sleep-hours",
            "8",
            "--exercise-mins",
            "200",
            "--vitamin",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Low water intake"));

    let state = read_state(data_dir);
    let entry = &state["logs"]["analyzerByDate"][TODAY];
    assert_eq!(entry["waterCups"], -2);
    assert_eq!(entry["score"], 1);

    // Later commands still see the saved state
    cli(data_dir)
        .arg("trends")
        .assert()
        .success();
}

#[test]
fn test_analyze_no_save() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args([
            "analyze",
            "--caffeine-mg",
            "250",
            "--sleep-hours",
            "5",
            "--no-save",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Heads Up (score 3)"))
        .stdout(predicate::str::contains("High caffeine intake detected"));

    assert!(!data_dir.join("state.json").exists());
}

#[test]
fn test_trends() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .arg("trends")
        .assert()
        .success()
        .stdout(predicate::str::contains("Water:    0 cups"))
        .stdout(predicate::str::contains("Risk trend: stable"));

    for (day, water) in [("2025-05-30", "6"), ("2025-05-31", "8"), ("2025-06-01", "10")] {
        cli(data_dir)
            .args(["analyze", "--date", day, "--water-cups", water, "--sleep-hours", "7.5"])
            .assert()
            .success();
    }

    cli(data_dir)
        .arg("trends")
        .assert()
        .success()
        .stdout(predicate::str::contains("Water:    8 cups"))
        .stdout(predicate::str::contains("Sleep:    7.5 hours"));
}

#[test]
fn test_symptom_suggestions_follow_tracking_mode() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args(["symptoms", "suggest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Period symptoms:"))
        .stdout(predicate::str::contains("Cramps"))
        .stdout(predicate::str::contains("Heartburn").not());

    cli(data_dir)
        .args(["onboard", "--pregnant", "--edd", "2025-09-01"])
        .assert()
        .success();

    cli(data_dir)
        .args(["symptoms", "suggest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pregnancy symptoms:"))
        .stdout(predicate::str::contains("Heartburn"))
        .stdout(predicate::str::contains("Irritability").not());
}

#[test]
fn test_symptom_log_and_history() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args(["symptoms", "log", "Cramps", "Bloating", "--date", "2025-05-30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged 2 symptoms for 2025-05-30"));

    cli(data_dir)
        .args(["symptoms", "log", "Fatigue"])
        .assert()
        .success();

    let output = cli(data_dir)
        .args(["symptoms", "history"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let output = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines, vec!["2025-06-01: Fatigue", "2025-05-30: Cramps, Bloating"]);
}

#[test]
fn test_period_log_updates_lmp() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args(["period", "2025-05-25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Period start logged for 2025-05-25"))
        .stdout(predicate::str::contains("Next period: 2025-06-22"));

    let state = read_state(data_dir);
    assert_eq!(state["user"]["lmp"], "2025-05-25");
    assert_eq!(state["logs"]["periodLogs"][0], "2025-05-25");
}

#[test]
fn test_notes_lifecycle() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args(["note", "add", "Felt the first kick", "--tag", "baby"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note added"));

    let state = read_state(data_dir);
    let id = state["logs"]["notes"][0]["id"].as_str().unwrap().to_string();

    cli(data_dir).args(["note", "pin", id.as_str()]).assert().success();
    cli(data_dir)
        .args(["note", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("★ 2025-06-01  Felt the first kick"))
        .stdout(predicate::str::contains("tags: baby"));

    cli(data_dir).args(["note", "delete", id.as_str()]).assert().success();
    cli(data_dir)
        .args(["note", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes yet."));

    // Deleting again reports the missing note
    cli(data_dir).args(["note", "delete", id.as_str()]).assert().failure();
}

#[test]
fn test_appointments() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args(["appointment", "add", "Anatomy scan", "--date", "2025-06-20"])
        .assert()
        .success();
    cli(data_dir)
        .args(["appointment", "add", "Booking visit", "--date", "2025-05-01", "--notes", "Bloods"])
        .assert()
        .success();

    cli(data_dir)
        .args(["appointment", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-05-01  Booking visit (past)"))
        .stdout(predicate::str::contains("2025-06-20  Anatomy scan"))
        .stdout(predicate::str::contains("Bloods"));
}

#[test]
fn test_premium_and_settings() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir).args(["premium", "enable"]).assert().success();
    assert_eq!(read_state(data_dir)["user"]["premiumActive"], true);
    cli(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Premium active"));

    cli(data_dir).args(["premium", "disable"]).assert().success();
    assert_eq!(read_state(data_dir)["user"]["premiumActive"], false);

    cli(data_dir)
        .args(["settings", "--units", "imperial", "--theme", "dark"])
        .assert()
        .success();
    let state = read_state(data_dir);
    assert_eq!(state["settings"]["units"], "imperial");
    assert_eq!(state["settings"]["theme"], "dark");
}

#[test]
fn test_export_csv() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir)
        .args(["analyze", "--fever"])
        .assert()
        .success();

    let csv_path = data_dir.join("export").join("checkins.csv");
    cli(data_dir)
        .arg("export")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 check-ins"));

    let content = fs::read_to_string(&csv_path).unwrap();
    let mut lines = content.lines();
    assert!(lines.next().unwrap().starts_with("date,water_cups"));
    let row = lines.next().unwrap();
    assert!(row.starts_with("2025-06-01"));
    assert!(row.ends_with(",5,red_flag"));
}

#[test]
fn test_reset_deletes_state() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir).args(["premium", "enable"]).assert().success();
    assert!(data_dir.join("state.json").exists());

    cli(data_dir)
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("All data deleted"));
    assert!(!data_dir.join("state.json").exists());
}
