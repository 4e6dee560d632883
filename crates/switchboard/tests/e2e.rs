// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the Switchboard host.
//!
//! The first group drives the registry and dispatcher through the test
//! harness; the second runs the compiled binary in an empty temp directory
//! so no local `switchboard.toml` is picked up.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::{json, Value};
use switchboard_core::ErrorKind;
use switchboard_test_utils::fixtures::{global_generator, math_adapter, uuid_adapter};
use switchboard_test_utils::TestHarness;

// ---- Harness scenarios ----

#[tokio::test]
async fn test_math_add_scoped() {
    let harness = TestHarness::builder()
        .with_module(math_adapter())
        .build()
        .unwrap();

    let outcome = harness
        .outcome(Some("math"), "add", json!({ "a": 2, "b": 3 }))
        .await;
    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        json!({ "ok": true, "value": 5 })
    );

    let outcome = harness.outcome(None, "add", json!({ "a": 2, "b": 3 })).await;
    assert_eq!(outcome.error_kind(), Some(ErrorKind::UnknownGlobalFunction));
}

#[tokio::test]
async fn test_uuid_generate_global() {
    let harness = TestHarness::builder()
        .with_module(uuid_adapter())
        .build()
        .unwrap();

    let value = harness.invoke(None, "generate", json!({})).await.unwrap();
    assert!(value.is_string());

    let duplicate = harness.registry.register(uuid_adapter().unwrap());
    assert_eq!(duplicate.unwrap_err().kind(), ErrorKind::DuplicateModule);

    let collision = harness.registry.register(global_generator("ids").unwrap());
    assert_eq!(collision.unwrap_err().kind(), ErrorKind::GlobalCollision);
    assert!(!harness.registry.contains("ids"));
}

#[tokio::test]
async fn test_override_requires_policy() {
    let strict = TestHarness::builder()
        .with_module(uuid_adapter())
        .build()
        .unwrap();
    let err = strict
        .registry
        .register_override(uuid_adapter().unwrap())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateModule);

    let relaxed = TestHarness::builder()
        .allow_override()
        .with_module(uuid_adapter())
        .with_module(math_adapter())
        .build()
        .unwrap();
    relaxed
        .registry
        .register_override(uuid_adapter().unwrap())
        .unwrap();
    assert_eq!(relaxed.registry.list().to_vec(), vec!["uuid", "math"]);
    assert!(relaxed.invoke(None, "generate", json!({})).await.is_ok());
}

// ---- Binary ----

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_switchboard"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run switchboard binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_binary_list() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["list"]);
    assert!(output.status.success());
    let text = stdout(&output);
    let names: Vec<&str> = text
        .lines()
        .map(|line| line.split_whitespace().next().unwrap_or_default())
        .collect();
    assert_eq!(names, vec!["math", "uuid", "text", "time"]);
    assert!(text.contains("uuid (global)"));
}

#[test]
fn test_binary_invoke_success_and_failure() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(dir.path(), &["invoke", "math.add", "--args", r#"{"a":2,"b":3}"#]);
    assert_eq!(output.status.code(), Some(0));
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value, json!({ "ok": true, "value": 5 }));

    let output = run(dir.path(), &["invoke", "add", "--args", r#"{"a":2,"b":3}"#]);
    assert_eq!(output.status.code(), Some(1));
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["error"]["kind"], "UnknownGlobalFunction");

    let output = run(dir.path(), &["invoke", "generate"]);
    assert_eq!(output.status.code(), Some(0));
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value["value"].is_string());
}

#[test]
fn test_binary_bad_args_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["invoke", "math.add", "--args", "[1, 2]"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_binary_respects_local_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("switchboard.toml"),
        "[modules.text]\nenabled = false\n",
    )
    .unwrap();

    let output = run(dir.path(), &["list"]);
    assert!(output.status.success());
    assert!(!stdout(&output).contains("text"));
}

#[test]
fn test_binary_rejects_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[registry]\nalow_override = true\n").unwrap();

    let output = run(dir.path(), &["--config", path.to_str().unwrap(), "list"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("alow_override"), "stderr: {stderr}");
}

#[test]
fn test_binary_describe_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["describe", "math", "--json"]);
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["module"]["name"], "math");
    assert_eq!(value["global"], false);
    assert_eq!(value["functions"].as_array().map(Vec::len), Some(4));
}
