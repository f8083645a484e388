mod common;

use common::{Sandbox, WATCH_FACE_LOG};
use predicates::prelude::*;
use serde_json::Value;

#[test]
fn test_list_plugins() {
    Sandbox::new()
        .cmd()
        .arg("--list-plugins")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available plugins:"))
        .stdout(predicate::str::contains(
            "✓ ui-capture   - UI state capture and XML generation",
        ))
        .stdout(predicate::str::contains("✗ build"))
        .stdout(predicate::str::contains("✓ completions"));
}

#[test]
fn test_no_command_prints_help() {
    Sandbox::new()
        .cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--list-plugins"));
}

#[test]
fn test_version_flag() {
    Sandbox::new()
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_unavailable_plugin() {
    Sandbox::new()
        .cmd()
        .arg("build")
        .assert()
        .code(69)
        .stderr(predicate::str::contains(
            "Plugin 'build' is not available in this build",
        ));
}

#[test]
fn test_unknown_command() {
    Sandbox::new()
        .cmd()
        .arg("frobnicate")
        .assert()
        .code(64)
        .stderr(predicate::str::contains("Unknown command 'frobnicate'"))
        .stderr(predicate::str::contains("ui-capture"));
}

#[test]
fn test_device_list_marks_default() {
    Sandbox::new()
        .cmd()
        .arg("device")
        .assert()
        .success()
        .stdout(predicate::str::contains("Supported devices:"))
        .stdout(predicate::str::contains("  • fenix7 (default)"))
        .stdout(predicate::str::contains("  • edge1040"));
}

#[test]
fn test_device_list_json() {
    let output = Sandbox::new()
        .cmd()
        .args(["device", "list", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let devices: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(devices.len(), 9);
    assert_eq!(devices[0], "fenix7");
}

#[test]
fn test_debug_lists_commands() {
    Sandbox::new()
        .cmd()
        .arg("debug")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze-logs"));
}

#[test]
fn test_debug_analyze_logs_json() {
    let sandbox = Sandbox::new();
    let log = sandbox.write("debug.log", WATCH_FACE_LOG);

    let output = sandbox
        .cmd()
        .args(["debug", "analyze-logs", "--json", "-i"])
        .arg(&log)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["lines"], 7);
    assert_eq!(report["categories"]["RENDER"], 4);
    assert_eq!(report["categories"]["STATE"], 1);
    assert_eq!(report["screen_descriptors"], 1);
    assert_eq!(report["malformed"], 0);
}

#[test]
fn test_debug_analyze_logs_text() {
    Sandbox::new()
        .cmd()
        .args(["debug", "analyze-logs"])
        .write_stdin(WATCH_FACE_LOG)
        .assert()
        .success()
        .stdout(predicate::str::contains("Log analysis: 7 lines"))
        .stdout(predicate::str::contains("Screen descriptors: 1"));
}

#[test]
fn test_completions() {
    Sandbox::new()
        .cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("garmin-dev"));
}

#[test]
fn test_discovered_config_sets_defaults() {
    let sandbox = Sandbox::new();
    sandbox.write(
        ".garmin-dev.json",
        r#"{"output_format": "json", "default_device": "venu2"}"#,
    );

    let output = sandbox
        .cmd()
        .arg("ui-capture")
        .write_stdin(WATCH_FACE_LOG)
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["metadata"]["device_model"], "venu2");
    assert_eq!(doc["elements"].as_array().unwrap().len(), 3);
}

#[test]
fn test_env_overrides_config() {
    let sandbox = Sandbox::new();
    sandbox.write(".garmin-dev.json", r#"{"output_format": "xml"}"#);

    sandbox
        .cmd()
        .env("GARMIN_DEV_FORMAT", "json")
        .env("GARMIN_DEV_DEVICE", "epix2")
        .arg("ui-capture")
        .write_stdin(WATCH_FACE_LOG)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stdout(predicate::str::contains("\"device_model\": \"epix2\""));
}

#[test]
fn test_explicit_bad_config_fails() {
    let sandbox = Sandbox::new();
    let path = sandbox.write("broken.json", "{ not json");

    sandbox
        .cmd()
        .arg("--config")
        .arg(&path)
        .arg("device")
        .assert()
        .code(78)
        .stderr(predicate::str::contains("Invalid config file"));
}

#[test]
fn test_explicit_missing_config_fails() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["--config", "absent.json", "device"])
        .assert()
        .code(78);
}

#[test]
fn test_bad_discovered_config_is_skipped() {
    let sandbox = Sandbox::new();
    sandbox.write(".garmin-dev.json", "[1, 2");

    sandbox
        .cmd()
        .arg("device")
        .assert()
        .success()
        .stdout(predicate::str::contains("  • fenix7 (default)"))
        .stderr(predicate::str::contains("skipping config"));
}
