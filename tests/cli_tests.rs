//! Tests for the command-line surface: argument handling, exit codes
//! and the standard streams.

mod common;

use std::process::Command;

fn litestat() -> Command {
    Command::new(env!("CARGO_BIN_EXE_litestat"))
}

#[test]
fn no_arguments_is_a_usage_error() {
    let output = litestat().output().unwrap();

    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(stderr.contains("Usage"));
}

#[test]
fn extra_arguments_are_a_usage_error() {
    let output = litestat().args(["first.db", "second.db"]).output().unwrap();

    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(stderr.contains("Usage"));
}

#[test]
fn missing_file_mentions_the_path_on_stderr() {
    let dir = tempfile::tempdir().unwrap();

    let output = litestat()
        .arg(dir.path().join("missing.db"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(stderr.contains("missing.db"));
}

#[test]
fn non_database_file_fails_with_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.db");

    std::fs::write(&path, vec![b'x'; 4096]).unwrap();

    let output = litestat().arg(&path).output().unwrap();

    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(stderr.contains("garbage.db"));
}

#[test]
fn valid_database_prints_the_report_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let db = common::sample_db(dir.path());

    let output = litestat().arg(&db).output().unwrap();

    assert!(output.status.success());
    assert!(output.stderr.is_empty());

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.starts_with("/** Disk-Space Utilization Report For "));
    assert!(stdout.contains("USERS"));
    assert!(stdout.ends_with("COMMIT;\n"));
}
