//! End-to-end tests for the chatstat binary.
//!
//! These spawn the real executable against real files.

#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn write_transcript(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

const SAMPLE: &str = "[01/01/2020, 10:00:00] Alice: hello\n\
[01/01/2020, 10:00:05] Bob: hi there\n\
[01/01/2020, 10:00:10] Alice: how are you\n";

#[test]
fn ranks_members_by_messages() {
    let dir = TempDir::new().unwrap();
    let input = write_transcript(&dir, "chat.txt", SAMPLE);

    let mut cmd = Command::cargo_bin("chatstat").unwrap();
    cmd.arg(&input)
        .arg("--no-progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("Members:  2"))
        .stdout(predicate::str::contains("Alice"))
        .stdout(predicate::str::contains("Bob"))
        .stdout(predicate::str::contains("Ranking by messages"));
}

#[test]
fn words_metric_changes_ranking_header() {
    let dir = TempDir::new().unwrap();
    let input = write_transcript(&dir, "chat.txt", SAMPLE);

    let mut cmd = Command::cargo_bin("chatstat").unwrap();
    cmd.arg(&input)
        .arg("--metric")
        .arg("words")
        .arg("--no-progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ranking by words"));
}

#[test]
fn json_report_is_valid_json() {
    let dir = TempDir::new().unwrap();
    let input = write_transcript(&dir, "chat.txt", SAMPLE);

    let mut cmd = Command::cargo_bin("chatstat").unwrap();
    let output = cmd
        .arg(&input)
        .arg("--json")
        .arg("--no-progress")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["members"], 2);
    assert_eq!(report["messages"], 3);
    assert_eq!(report["ranking"][0]["name"], "Alice");
    assert_eq!(report["ranking"][0]["count"], 2);
}

#[test]
fn date_window_narrows_counts() {
    let dir = TempDir::new().unwrap();
    let two_days = "[01/01/2020, 10:00:00] Alice: hello\n\
                    [02/01/2020, 10:00:00] Bob: next day\n";
    let input = write_transcript(&dir, "chat.txt", two_days);

    let mut cmd = Command::cargo_bin("chatstat").unwrap();
    let output = cmd
        .arg(&input)
        .arg("--after")
        .arg("2020-01-02")
        .arg("--json")
        .arg("--no-progress")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["messages"], 1);
    assert_eq!(report["ranking"][0]["name"], "Bob");
}

#[test]
fn invalid_transcript_fails_with_message() {
    let dir = TempDir::new().unwrap();
    let input = write_transcript(&dir, "not_a_chat.txt", "just some\nplain text\n");

    let mut cmd = Command::cargo_bin("chatstat").unwrap();
    cmd.arg(&input)
        .arg("--no-progress")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid transcript format"));
}

#[test]
fn missing_file_fails_with_io_error() {
    let mut cmd = Command::cargo_bin("chatstat").unwrap();
    cmd.arg("definitely/not/here.txt")
        .arg("--no-progress")
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn bad_date_argument_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_transcript(&dir, "chat.txt", SAMPLE);

    let mut cmd = Command::cargo_bin("chatstat").unwrap();
    cmd.arg(&input)
        .arg("--after")
        .arg("01/01/2020")
        .arg("--no-progress")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn no_arguments_shows_usage() {
    let mut cmd = Command::cargo_bin("chatstat").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
