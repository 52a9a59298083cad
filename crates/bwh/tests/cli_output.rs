//! Integration tests for CLI output behavior
//!
//! Each test points BWH_CONFIG_DIR at its own temp directory. The default
//! behavior is quiet (no info logs). Use -v/--verbose to enable logs.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::{Value, json};
use tempfile::TempDir;

fn bwh(base_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bwh"))
        .env("BWH_CONFIG_DIR", base_dir)
        .args(args)
        .output()
        .expect("Failed to execute bwh")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "bwh failed with exit code {:?}. stderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn profile_json() -> Value {
    json!({
        "quilt": {
            "stackArn": "arn:aws:cloudformation:us-east-1:123456789012:stack/quilt/abc",
            "catalog": "quilt.example.com",
            "database": "quilt_db",
            "queueUrl": "https://sqs.us-east-1.amazonaws.com/123456789012/quilt",
            "region": "us-east-1"
        },
        "benchling": { "tenant": "acme", "clientId": "cid", "appDefinitionId": "appdef_1" },
        "packages": { "bucket": "acme-packages", "prefix": "benchling", "metadataKey": "experiment_id" },
        "deployment": { "region": "us-east-1", "imageTag": "0.6.0" },
        "_metadata": {
            "version": "0.7.0",
            "createdAt": "2025-11-04T12:00:00Z",
            "updatedAt": "2025-11-04T12:00:00Z",
            "source": "cli"
        }
    })
}

fn write_profile(base_dir: &Path, name: &str, document: &Value) {
    let dir = base_dir.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.json"), document.to_string()).unwrap();
}

/// Verify stdout has no JSON log lines and stderr has no info logs by default
#[test]
fn test_list_stdout_is_clean() {
    let temp_dir = TempDir::new().unwrap();
    let output = bwh(temp_dir.path(), &["list"]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        !stdout.contains(r#""event":"#),
        "stdout should not contain JSON logs, got: {}",
        stdout
    );
    assert!(stdout.contains("No profiles found"));
    assert!(
        !stderr.contains(r#""level":"INFO""#),
        "Default mode should not emit INFO logs, got: {}",
        stderr
    );
}

#[test]
fn test_verbose_emits_json_logs_on_stderr() {
    let temp_dir = TempDir::new().unwrap();
    let output = bwh(temp_dir.path(), &["-v", "list"]);
    assert_success(&output);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("cli.list_started"),
        "verbose mode should log events, got: {}",
        stderr
    );
}

#[test]
fn test_list_json() {
    let temp_dir = TempDir::new().unwrap();
    write_profile(temp_dir.path(), "default", &profile_json());
    write_profile(temp_dir.path(), "dev", &profile_json());

    let output = bwh(temp_dir.path(), &["list", "--json"]);
    assert_success(&output);

    let profiles: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(profiles, vec!["default", "dev"]);
}

#[test]
fn test_show_resolved_merges_base() {
    let temp_dir = TempDir::new().unwrap();
    write_profile(temp_dir.path(), "default", &profile_json());
    write_profile(
        temp_dir.path(),
        "dev",
        &json!({ "_inherits": "default", "deployment": { "imageTag": "latest" } }),
    );

    let output = bwh(temp_dir.path(), &["show", "dev", "--resolved"]);
    assert_success(&output);

    let shown: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(shown["deployment"]["imageTag"], "latest");
    assert_eq!(shown["benchling"]["tenant"], "acme");
    assert!(shown.get("_inherits").is_none());
}

#[test]
fn test_show_missing_profile_fails() {
    let temp_dir = TempDir::new().unwrap();
    let output = bwh(temp_dir.path(), &["show", "staging"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'staging' not found"), "got: {}", stderr);
}

#[test]
fn test_delete_default_is_refused() {
    let temp_dir = TempDir::new().unwrap();
    write_profile(temp_dir.path(), "default", &profile_json());

    let output = bwh(temp_dir.path(), &["delete", "default"]);

    assert!(!output.status.success());
    assert!(temp_dir.path().join("default").join("config.json").exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("protected"), "got: {}", stderr);
}

#[test]
fn test_record_then_active() {
    let temp_dir = TempDir::new().unwrap();
    let base = temp_dir.path();

    for tag in ["0.6.0", "latest"] {
        let output = bwh(
            base,
            &[
                "record",
                "dev",
                "--stage",
                "dev",
                "--image-tag",
                tag,
                "--endpoint",
                "https://abc.execute-api.us-east-1.amazonaws.com/dev",
                "--stack-name",
                "BenchlingWebhookStack",
                "--region",
                "us-east-1",
            ],
        );
        assert_success(&output);
    }

    let output = bwh(base, &["active", "dev", "dev", "--json"]);
    assert_success(&output);
    let active: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(active["imageTag"], "latest");

    let output = bwh(base, &["history", "dev", "--json"]);
    assert_success(&output);
    let history: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(history["history"].as_array().unwrap().len(), 2);
}

#[test]
fn test_active_missing_stage_is_not_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let output = bwh(temp_dir.path(), &["active", "dev", "prod", "--json"]);
    assert_success(&output);
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "null");
}

#[test]
fn test_validate_reports_every_problem() {
    let temp_dir = TempDir::new().unwrap();
    let mut document = profile_json();
    document.as_object_mut().unwrap().remove("packages");
    document["deployment"]["account"] = json!("123");
    let file = temp_dir.path().join("candidate.json");
    std::fs::write(&file, document.to_string()).unwrap();

    let output = bwh(
        temp_dir.path(),
        &["validate", file.to_str().unwrap(), "--json"],
    );

    assert!(!output.status.success());
    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["isValid"], false);
    let errors = result["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2, "{:?}", errors);
}
