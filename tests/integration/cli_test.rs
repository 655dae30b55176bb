//! Integration tests for the csv2glozz binary

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

use crate::helpers::temp_fixture;

fn csv2glozz() -> Command {
    let mut cmd = Command::cargo_bin("csv2glozz").expect("binary is built");
    cmd.env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_exits_0_and_shows_usage() {
    csv2glozz()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Glozz"))
        .stdout(predicate::str::contains("--file <FILE>"));
}

#[test]
fn version_includes_package_version() {
    csv2glozz()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_file_argument_is_usage_error() {
    csv2glozz()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--file"));
}

// ============================================================================
// Conversion Tests
// ============================================================================

#[test]
fn converts_fixture_and_reports_pair() {
    let (dir, path) = temp_fixture("pilot.soclog.seg.csv");

    csv2glozz()
        .args(["--timestamp", "1700000000", "-f"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("pilot.ac"))
        .stdout(predicate::str::contains("pilot.aa"))
        .stdout(predicate::str::contains("4 turns, 7 segments, 2 dialogues"));

    let xml = fs::read_to_string(dir.path().join("pilot.aa")).unwrap();
    assert!(xml.contains("<creation-date>1700000000</creation-date>"));
    assert!(dir.path().join("pilot.ac").exists());
}

#[test]
fn file_name_words_are_joined() {
    let (dir, path) = temp_fixture("pilot.soclog.seg.csv");
    let spaced = dir.path().join("pilot game.csv");
    fs::rename(&path, &spaced).unwrap();

    csv2glozz()
        .arg("-f")
        .arg(dir.path().join("pilot"))
        .arg("game.csv")
        .assert()
        .success();

    assert!(dir.path().join("pilot game.ac").exists());
    assert!(dir.path().join("pilot game.aa").exists());
}

#[test]
fn output_dir_receives_pair() {
    let (_dir, path) = temp_fixture("pilot.soclog.seg.csv");
    let out = tempfile::TempDir::new().unwrap();

    csv2glozz()
        .arg("-f")
        .arg(&path)
        .arg("-o")
        .arg(out.path())
        .assert()
        .success();

    assert!(out.path().join("pilot.ac").exists());
    assert!(out.path().join("pilot.aa").exists());
}

#[test]
fn config_file_can_disable_paragraphs() {
    let (dir, path) = temp_fixture("pilot.soclog.seg.csv");
    let config = dir.path().join("config.toml");
    fs::write(&config, "[annotation]\nparagraphs = false\n").unwrap();

    csv2glozz()
        .arg("-c")
        .arg(&config)
        .arg("-f")
        .arg(&path)
        .assert()
        .success();

    let xml = fs::read_to_string(dir.path().join("pilot.aa")).unwrap();
    assert!(!xml.contains("<type>paragraph</type>"));
    assert!(xml.contains("<type>Turn</type>"));
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn malformed_row_exits_1_with_row_number() {
    let (dir, path) = temp_fixture("malformed.csv");

    csv2glozz()
        .arg("-f")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("row 2"))
        .stderr(predicate::str::contains("malformed.csv"));

    assert!(!dir.path().join("malformed.aa").exists());
    assert!(!dir.path().join("malformed.ac").exists());
}

#[test]
fn nonexistent_input_exits_1() {
    csv2glozz()
        .args(["-f", "/nonexistent/path/game.csv"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("game.csv"));
}

#[test]
fn invalid_config_exits_1() {
    let (dir, path) = temp_fixture("pilot.soclog.seg.csv");
    let config = dir.path().join("config.toml");
    fs::write(&config, "[transcript]\nserver_emitter = \"\"\n").unwrap();

    csv2glozz()
        .arg("-c")
        .arg(&config)
        .arg("-f")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("server_emitter"));
}
