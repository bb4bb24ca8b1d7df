//! End-to-end tests of the movpress binary surface

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn movpress() -> Command {
    Command::cargo_bin("movpress").expect("binary builds")
}

#[test]
fn help_documents_the_input_flag() {
    movpress()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("-i"))
        .stdout(predicate::str::contains("Input folder location"));
}

#[test]
fn version_flag_works() {
    movpress()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("movpress"));
}

#[test]
fn missing_input_flag_is_a_usage_error() {
    movpress()
        .assert()
        .failure()
        .stderr(predicate::str::contains("-i"));
}

#[test]
fn nonexistent_source_directory_fails() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing");

    movpress()
        .arg("-i")
        .arg(&missing)
        .assert()
        .failure()
        .code(1);

    assert!(!missing.exists());
}

#[test]
fn empty_source_directory_succeeds() {
    let temp = TempDir::new().unwrap();

    movpress()
        .arg("-i")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted 0 file(s)"));

    // Output directory creation is idempotent and happens even for an
    // empty batch
    assert!(temp.path().join("videoOutput").is_dir());
}
