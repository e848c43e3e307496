//! Integration tests for the reelcut binary.
//!
//! None of these invoke a real ffmpeg; engine-failure paths point the
//! configured engine binary at `/bin/false`.

use assert_cmd::cargo::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Command with a scratch HOME so user configuration cannot leak in.
fn reelcut_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("reelcut"));
    cmd.env("HOME", home)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("REELCUT_EVENTS")
        .env_remove("REELCUT_GROUP")
        .env_remove("REELCUT_PADDING")
        .env_remove("REELCUT_OUTPUT_DIR");
    cmd
}

fn write_fixture(dir: &Path) -> (PathBuf, PathBuf) {
    let events = dir.join("events.csv");
    fs::write(
        &events,
        "groupId,startTime,stopTime,subjectId,included\n\
         game1,00:10,00:25,Alice,\n\
         game1,00:20,00:40,Alice,\n\
         game1,00:30,00:44,Bob,\n",
    )
    .unwrap();
    let media = dir.join("game1.mp4");
    fs::write(&media, b"media").unwrap();
    (events, media)
}

fn write_config(home: &Path, contents: &str) {
    let config_dir = home.join(".config").join("reelcut");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), contents).unwrap();
}

#[test]
fn test_dry_run_prints_plan_and_creates_nothing() {
    let dir = TempDir::new().unwrap();
    let (events, media) = write_fixture(dir.path());
    let out_dir = dir.path().join("reels");

    reelcut_cmd(dir.path())
        .arg(&media)
        .arg("--events")
        .arg(&events)
        .arg("--group")
        .arg("game1")
        .arg("--output-dir")
        .arg(&out_dir)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Subject: Alice | Clips: 1"))
        .stdout(predicate::str::contains("Clip 1: 10.00s - 40.00s"))
        .stdout(predicate::str::contains("Subject: Bob | Clips: 1"));

    assert!(!out_dir.exists(), "dry run must not create the output dir");
}

#[test]
fn test_json_dry_run_emits_parseable_envelope() {
    let dir = TempDir::new().unwrap();
    let (events, media) = write_fixture(dir.path());

    let output = reelcut_cmd(dir.path())
        .arg(&media)
        .arg("-e")
        .arg(&events)
        .arg("-g")
        .arg("game1")
        .arg("--dry-run")
        .arg("--json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["spec_version"], "1.0");
    assert_eq!(parsed["event"], "result");
    assert_eq!(parsed["payload"]["dry_run"], true);
    assert_eq!(parsed["payload"]["group_id"], "game1");
    assert_eq!(parsed["payload"]["subjects"][0]["subject"], "Alice");
    assert_eq!(parsed["payload"]["subjects"][0]["status"], "planned");
    assert_eq!(parsed["payload"]["subjects"][1]["subject"], "Bob");
}

#[test]
fn test_json_error_envelope_on_missing_media() {
    let dir = TempDir::new().unwrap();
    let (events, _) = write_fixture(dir.path());

    let output = reelcut_cmd(dir.path())
        .arg(dir.path().join("nope.mp4"))
        .arg("-e")
        .arg(&events)
        .arg("-g")
        .arg("game1")
        .arg("--json")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["event"], "error");
    assert_eq!(parsed["payload"]["code"], "source_media_not_found");
    assert_eq!(parsed["payload"]["severity"], "fatal");
}

#[test]
fn test_missing_events_argument_fails() {
    let dir = TempDir::new().unwrap();
    let (_, media) = write_fixture(dir.path());

    reelcut_cmd(dir.path())
        .arg(&media)
        .arg("-g")
        .arg("game1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required argument --events"));
}

#[test]
fn test_missing_media_fails() {
    let dir = TempDir::new().unwrap();
    let (events, _) = write_fixture(dir.path());

    reelcut_cmd(dir.path())
        .arg(dir.path().join("nope.mp4"))
        .arg("-e")
        .arg(&events)
        .arg("-g")
        .arg("game1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("source media file does not exist"));
}

#[test]
fn test_unrecognized_sheet_url_fails() {
    let dir = TempDir::new().unwrap();
    let (_, media) = write_fixture(dir.path());

    reelcut_cmd(dir.path())
        .arg(&media)
        .arg("-e")
        .arg("https://example.com/data.csv")
        .arg("-g")
        .arg("game1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a recognized spreadsheet link"));
}

#[test]
fn test_out_of_range_padding_rejected_by_parser() {
    let dir = TempDir::new().unwrap();
    let (events, media) = write_fixture(dir.path());

    reelcut_cmd(dir.path())
        .arg(&media)
        .arg("-e")
        .arg(&events)
        .arg("-g")
        .arg("game1")
        .arg("-p")
        .arg("500")
        .assert()
        .failure()
        .stderr(predicate::str::contains("padding must be between"));
}

#[test]
fn test_group_from_environment_variable() {
    let dir = TempDir::new().unwrap();
    let (events, media) = write_fixture(dir.path());

    reelcut_cmd(dir.path())
        .env("REELCUT_GROUP", "game1")
        .arg(&media)
        .arg("-e")
        .arg(&events)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Subject: Alice"));
}

#[test]
fn test_failing_engine_exits_nonzero_but_runs_all_subjects() {
    let dir = TempDir::new().unwrap();
    let (events, media) = write_fixture(dir.path());
    write_config(dir.path(), "[engine]\nffmpeg = \"/bin/false\"\n");

    reelcut_cmd(dir.path())
        .arg(&media)
        .arg("-e")
        .arg(&events)
        .arg("-g")
        .arg("game1")
        .arg("-o")
        .arg(dir.path().join("reels"))
        .arg("-q")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Alice:"))
        .stderr(predicate::str::contains("Bob:"))
        .stderr(predicate::str::contains("2 of 2 subjects failed"));
}

#[test]
fn test_bare_invocation_prints_usage() {
    let dir = TempDir::new().unwrap();

    reelcut_cmd(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: reelcut"));
}

#[test]
fn test_config_init_and_path() {
    let dir = TempDir::new().unwrap();

    reelcut_cmd(dir.path())
        .arg("config")
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains("reelcut"));

    reelcut_cmd(dir.path())
        .arg("config")
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    assert!(
        dir.path()
            .join(".config")
            .join("reelcut")
            .join("config.toml")
            .is_file()
    );

    reelcut_cmd(dir.path())
        .arg("config")
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
