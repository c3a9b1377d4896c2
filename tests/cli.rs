// ABOUTME: Integration tests for the wocker CLI commands.
// ABOUTME: Covers help, usage errors raised before any engine call, init and version.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn wocker_cmd(dir: &std::path::Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("wocker"));
    cmd.current_dir(dir).env_remove("WOCKER_CONFIG");
    cmd
}

#[test]
fn help_shows_commands() {
    let temp_dir = tempfile::tempdir().unwrap();

    wocker_cmd(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("image"))
        .stdout(predicate::str::contains("volume"))
        .stdout(predicate::str::contains("version"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn image_help_lists_actions() {
    let temp_dir = tempfile::tempdir().unwrap();

    wocker_cmd(temp_dir.path())
        .args(["image", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--list"))
        .stdout(predicate::str::contains("--save"))
        .stdout(predicate::str::contains("--load"))
        .stdout(predicate::str::contains("--keep-going"));
}

#[test]
fn image_save_without_names_is_usage_error() {
    let temp_dir = tempfile::tempdir().unwrap();

    wocker_cmd(temp_dir.path())
        .args(["image", "--save"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("please specify the image to save"));
}

#[test]
fn volume_load_without_files_is_usage_error() {
    let temp_dir = tempfile::tempdir().unwrap();

    wocker_cmd(temp_dir.path())
        .args(["volume", "--load"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("please specify the volume to load"));
}

#[test]
fn usage_error_in_json_mode_is_a_json_line() {
    let temp_dir = tempfile::tempdir().unwrap();

    wocker_cmd(temp_dir.path())
        .args(["--json", "image", "--save"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(r#""event":"error""#));
}

#[test]
fn operands_without_action_are_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();

    wocker_cmd(temp_dir.path())
        .args(["image", "nginx"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--list, --save or --load"));
}

#[test]
fn actions_are_mutually_exclusive() {
    let temp_dir = tempfile::tempdir().unwrap();

    wocker_cmd(temp_dir.path())
        .args(["image", "--save", "--load", "nginx"])
        .assert()
        .failure();
}

#[test]
fn missing_explicit_config_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    wocker_cmd(temp_dir.path())
        .args(["--config", "nope.yml", "image", "--list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn invalid_config_fails_before_engine_access() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("wocker.yml"), "on_save_error: maybe\n").unwrap();

    wocker_cmd(temp_dir.path())
        .args(["volume", "--list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("YAML parse error"));
}

#[test]
fn init_creates_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("wocker.yml");

    wocker_cmd(temp_dir.path()).arg("init").assert().success();

    assert!(config_path.exists(), "wocker.yml should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("archive_dir:"));
    assert!(content.contains("helper_image: busybox"));
}

#[test]
fn init_refuses_to_overwrite_existing_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("wocker.yml");

    fs::write(&config_path, "archive_dir: /backups\n").unwrap();

    wocker_cmd(temp_dir.path())
        .arg("init")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    let content = fs::read_to_string(&config_path).unwrap();
    assert_eq!(content, "archive_dir: /backups\n");
}

#[test]
fn init_force_overwrites() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("wocker.yml");

    fs::write(&config_path, "archive_dir: /backups\n").unwrap();

    wocker_cmd(temp_dir.path())
        .args(["init", "--force"])
        .assert()
        .success();

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("on_save_error: abort"));
}

#[test]
fn version_only_prints_bare_version() {
    let temp_dir = tempfile::tempdir().unwrap();

    wocker_cmd(temp_dir.path())
        .args(["version", "--only"])
        .assert()
        .success()
        .stdout(format!("{}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_prints_build_metadata() {
    let temp_dir = tempfile::tempdir().unwrap();

    wocker_cmd(temp_dir.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wocker"))
        .stdout(predicate::str::contains("Build rev:"))
        .stdout(predicate::str::contains("Built by:"));
}
