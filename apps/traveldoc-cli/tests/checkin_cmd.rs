//! Integration tests for the `checkin` subcommand.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("traveldoc").unwrap()
}

#[test]
fn unparseable_time_prints_not_available() {
    cmd()
        .args(["checkin", "--time", "whenever"])
        .assert()
        .success()
        .stdout(predicate::str::contains("N/A"));
}

#[test]
fn past_event_is_closed() {
    cmd()
        .args(["checkin", "--time", "2000-01-01 12:00:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CLOSED"));
}

#[test]
fn international_prefix_is_selected_by_flag() {
    cmd()
        .args(["checkin", "--time", "2000-01-01", "--international"])
        .assert()
        .success()
        .stdout(predicate::str::contains("International check-in"));
}

#[test]
fn json_output_carries_the_flags() {
    let output = cmd()
        .args(["checkin", "--time", "2000-01-01 12:00:00", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["is_closed"], serde_json::Value::Bool(true));
    assert_eq!(parsed["is_open"], serde_json::Value::Bool(false));
}
