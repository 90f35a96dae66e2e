//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Each run gets
//! a scratch config directory so nothing touches the real user config.

use std::path::PathBuf;
use std::process::Command;

fn scratch_config_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pulseweave-cli-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("Failed to create scratch config dir");
    dir
}

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "pulseweave-cli", "--"])
        .args(args)
        .env("PULSEWEAVE_CONFIG_DIR", scratch_config_dir())
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_pattern_list() {
    let (stdout, _, code) = run_cli(&["pattern", "list"]);
    assert_eq!(code, 0, "pattern list failed");
    assert!(stdout.contains("heartbeat"));
    assert!(stdout.contains("shuffle"));
}

#[test]
fn test_pattern_list_json() {
    let (stdout, _, code) = run_cli(&["pattern", "list", "--json"]);
    assert_eq!(code, 0, "pattern list --json failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("pattern list --json is not valid JSON");
    let entries = parsed.as_array().expect("expected a JSON array");
    assert!(!entries.is_empty());
    assert!(entries.iter().any(|e| e["name"] == "heartbeat"));
}

#[test]
fn test_pattern_show() {
    let (stdout, _, code) = run_cli(&["pattern", "show", "heartbeat"]);
    assert_eq!(code, 0, "pattern show failed");
    assert!(stdout.contains("heartbeat"));
    assert!(stdout.contains("ms"));
}

#[test]
fn test_pattern_show_unknown_fails() {
    let (_, stderr, code) = run_cli(&["pattern", "show", "no-such-pattern"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown pattern"));
}

#[test]
fn test_play_one_cycle_silent() {
    let (stdout, _, code) = run_cli(&["play", "heartbeat", "--cycles", "1", "--silent"]);
    assert_eq!(code, 0, "play failed");
    assert!(stdout.contains("PlaybackStarted"));
    assert!(stdout.contains("PlaybackStopped"));
}

#[test]
fn test_play_respects_intensity_argument() {
    let (stdout, _, code) = run_cli(&[
        "play",
        "heartbeat",
        "--cycles",
        "1",
        "--intensity",
        "0.5",
    ]);
    assert_eq!(code, 0, "play with intensity failed");
    // heartbeat opens at amplitude 230; half intensity gives 115.
    assert!(stdout.contains("115/255"), "expected scaled amplitude in: {stdout}");
}

#[test]
fn test_config_list_and_get() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "config list failed");
    assert!(stdout.contains("cycle_pause_ms"));

    let (stdout, _, code) = run_cli(&["config", "get", "playback.cycle_pause_ms"]);
    assert_eq!(code, 0, "config get failed");
    assert_eq!(stdout.trim(), "500");
}

#[test]
fn test_config_set_unknown_key_fails() {
    let (_, stderr, code) = run_cli(&["config", "set", "bogus.key", "1"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Unknown configuration key"));
}
