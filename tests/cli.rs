use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pomotrack(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pomotrack").unwrap();
    cmd.env("POMOTRACK_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_status_on_fresh_home() {
    let home = TempDir::new().unwrap();

    let value = json_output(pomotrack(&home).args(["status", "--output", "json"]));

    assert_eq!(value["minutes_completed"], 0);
    assert_eq!(value["goal_minutes"], 240);
    assert_eq!(value["band"], "low");
    assert_eq!(value["color"], "#2166d6");
}

#[test]
fn test_log_then_stats() {
    let home = TempDir::new().unwrap();

    pomotrack(&home)
        .args(["log", "work", "25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged 25 minutes of WORK"));
    pomotrack(&home).args(["log", "break", "5"]).assert().success();

    let value = json_output(pomotrack(&home).args(["stats", "-o", "json"]));
    assert_eq!(value["total_work_minutes"], 25);
    assert_eq!(value["total_break_minutes"], 5);

    let value = json_output(pomotrack(&home).args(["status", "-o", "json"]));
    assert_eq!(value["minutes_completed"], 25);
}

#[test]
fn test_history_file_format() {
    let home = TempDir::new().unwrap();
    pomotrack(&home).args(["log", "work", "50"]).assert().success();

    let text = std::fs::read_to_string(home.path().join("history.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(value["total_work_time"], 50);
    assert_eq!(value["daily_records"][0]["work_time"], 50);
    assert_eq!(value["current_progress"]["minutes_completed"], 50);
}

#[test]
fn test_history_days() {
    let home = TempDir::new().unwrap();
    pomotrack(&home).args(["log", "work", "25"]).assert().success();

    let value = json_output(pomotrack(&home).args(["history", "--days", "3", "-o", "json"]));

    assert_eq!(value["days"].as_array().unwrap().len(), 3);
    assert_eq!(value["days"][0]["work_minutes"], 25);
    assert_eq!(value["days"][1]["work_minutes"], 0);
    assert_eq!(value["streak_days"], 1);
}

#[test]
fn test_history_pretty() {
    let home = TempDir::new().unwrap();

    pomotrack(&home)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("last 7 days"))
        .stdout(predicate::str::contains("Current streak"));
}

#[test]
fn test_goal_persists() {
    let home = TempDir::new().unwrap();

    pomotrack(&home).args(["goal", "2"]).assert().success();
    pomotrack(&home).args(["log", "work", "90"]).assert().success();

    let value = json_output(pomotrack(&home).args(["status", "-o", "json"]));
    assert_eq!(value["goal_minutes"], 120);
    assert_eq!(value["percent"], 75.0);
    assert_eq!(value["band"], "high");

    let config = std::fs::read_to_string(home.path().join("config.yaml")).unwrap();
    assert!(config.contains("daily_goal_hours: 2"));
}

#[test]
fn test_goal_out_of_range_fails() {
    let home = TempDir::new().unwrap();

    pomotrack(&home)
        .args(["goal", "25"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_progress_capped_at_goal() {
    let home = TempDir::new().unwrap();
    pomotrack(&home).args(["goal", "1"]).assert().success();
    pomotrack(&home).args(["log", "work", "45"]).assert().success();
    pomotrack(&home).args(["log", "work", "45"]).assert().success();

    let value = json_output(pomotrack(&home).args(["status", "-o", "json"]));
    assert_eq!(value["minutes_completed"], 60);

    let value = json_output(pomotrack(&home).args(["stats", "-o", "json"]));
    assert_eq!(value["total_work_minutes"], 90);
}

#[test]
fn test_reset_progress() {
    let home = TempDir::new().unwrap();
    pomotrack(&home).args(["log", "work", "25"]).assert().success();

    pomotrack(&home).arg("reset-progress").assert().success();

    let value = json_output(pomotrack(&home).args(["status", "-o", "json"]));
    assert_eq!(value["minutes_completed"], 0);
    let value = json_output(pomotrack(&home).args(["stats", "-o", "json"]));
    assert_eq!(value["total_work_minutes"], 25);
}

#[test]
fn test_corrupt_history_is_replaced() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("history.json"), "{ not json").unwrap();

    let value = json_output(pomotrack(&home).args(["stats", "-o", "json"]));
    assert_eq!(value["total_work_minutes"], 0);

    pomotrack(&home).args(["log", "work", "10"]).assert().success();
    let text = std::fs::read_to_string(home.path().join("history.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["total_work_time"], 10);
}

#[test]
fn test_config_reads_yaml() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "timer:\n  work_duration_minutes: 50\n  break_duration_minutes: 500\n",
    )
    .unwrap();

    let value = json_output(pomotrack(&home).args(["config", "-o", "json"]));

    assert_eq!(value["config"]["timer"]["work_duration_minutes"], 50);
    // Clamped into range
    assert_eq!(value["config"]["timer"]["break_duration_minutes"], 30);
    assert_eq!(value["config"]["goal"]["daily_goal_hours"], 4);
}

#[test]
fn test_home_flag_overrides_env() {
    let env_home = TempDir::new().unwrap();
    let flag_home = TempDir::new().unwrap();

    pomotrack(&env_home)
        .args(["log", "work", "5", "--home"])
        .arg(flag_home.path())
        .assert()
        .success();

    assert!(flag_home.path().join("history.json").exists());
    assert!(!env_home.path().join("history.json").exists());
}

#[test]
fn test_start_rejects_bad_duration() {
    let home = TempDir::new().unwrap();

    pomotrack(&home)
        .args(["start", "--work", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 120"));
}

#[test]
fn test_log_unknown_mode() {
    let home = TempDir::new().unwrap();

    pomotrack(&home)
        .args(["log", "nap", "20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown session kind"));
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();

    pomotrack(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pomotrack"));

    pomotrack(&home)
        .args(["completions", "tcsh"])
        .assert()
        .failure();
}
