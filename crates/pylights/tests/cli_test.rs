//! Integration tests for the `pylights` CLI binary.
//!
//! These tests cover argument parsing, help output, shell completions,
//! config handling and connection errors without a live device.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `pylights` binary with env isolation.
///
/// Clears all `PYLIGHTS_*` env vars and points the config file at a
/// nonexistent path so tests never touch the user's real configuration.
fn pylights_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("pylights");
    cmd.env("HOME", "/tmp/pylights-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/pylights-cli-test-nonexistent")
        .env(
            "PYLIGHTS_CONFIG",
            "/tmp/pylights-cli-test-nonexistent/config.toml",
        )
        .env_remove("PYLIGHTS_PROFILE")
        .env_remove("PYLIGHTS_HOST")
        .env_remove("PYLIGHTS_PORT")
        .env_remove("PYLIGHTS_OUTPUT")
        .env_remove("PYLIGHTS_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = pylights_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    pylights_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("songs")
            .and(predicate::str::contains("lights"))
            .and(predicate::str::contains("presets"))
            .and(predicate::str::contains("remap")),
    );
}

#[test]
fn test_version_flag() {
    pylights_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pylights"));
}

#[test]
fn test_volume_help_mentions_range() {
    pylights_cmd()
        .args(["songs", "volume", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0-100"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    pylights_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pylights"));
}

#[test]
fn test_completions_zsh() {
    pylights_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Argument errors ─────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = pylights_cmd().arg("disco").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("unrecognized subcommand"));
}

#[test]
fn test_invalid_output_format() {
    let output = pylights_cmd()
        .args(["--output", "xml", "info"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("invalid value"));
}

#[test]
fn test_preset_add_requires_lights() {
    let output = pylights_cmd()
        .args(["presets", "add", "party"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--lights"));
}

// ── Config commands ─────────────────────────────────────────────────

#[test]
fn test_config_path_honors_override() {
    pylights_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "/tmp/pylights-cli-test-nonexistent/config.toml",
        ));
}

#[test]
fn test_config_show_without_file_prints_defaults() {
    pylights_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]").and(predicate::str::contains("5001")));
}

#[test]
fn test_config_show_reads_profiles_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "default_profile = \"garage\"\n\n[profiles.garage]\nhost = \"10.0.0.7\"\n",
    )
    .unwrap();

    pylights_cmd()
        .env("PYLIGHTS_CONFIG", &path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10.0.0.7"));
}

// ── Device-bound commands ───────────────────────────────────────────

#[test]
fn test_unknown_profile_is_not_found() {
    let output = pylights_cmd()
        .args(["--profile", "attic", "info"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("attic"));
}

#[test]
fn test_unreachable_device_is_connection_error() {
    let output = pylights_cmd()
        .args(["--host", "127.0.0.1", "--port", "1", "--timeout", "2", "info"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7));
    assert!(combined_output(&output).contains("127.0.0.1"));
}
