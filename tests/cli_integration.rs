//! CLI integration tests
//!
//! Run the built binary and check output, exit codes and written files.

mod support;

use std::fs;
use std::process::Command;
use support::{copy_fixture, fixture_path, shiftpack_bin};
use tempfile::TempDir;

#[test]
fn test_cli_help() {
    let output = Command::new(shiftpack_bin())
        .arg("--help")
        .output()
        .expect("Failed to execute shiftpack");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("migrate"));
    assert!(stdout.contains("inspect"));
}

#[test]
fn test_cli_version() {
    let output = Command::new(shiftpack_bin())
        .arg("--version")
        .output()
        .expect("Failed to execute shiftpack");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_inspect_json() {
    let output = Command::new(shiftpack_bin())
        .arg("inspect")
        .arg(fixture_path("java-maven"))
        .args(["--format", "json", "--with-dependencies", "-q"])
        .output()
        .expect("Failed to execute shiftpack");

    assert!(output.status.success());
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    assert_eq!(report["application"]["archetype"], "java-maven");
    assert_eq!(report["application"]["runtime_version"], "17");
    assert_eq!(report["dependencies"].as_array().unwrap().len(), 2);
}

#[test]
fn test_inspect_without_dependencies() {
    let output = Command::new(shiftpack_bin())
        .arg("inspect")
        .arg(fixture_path("nodejs-express"))
        .args(["--format", "yaml", "-q"])
        .output()
        .expect("Failed to execute shiftpack");

    assert!(output.status.success());
    let view: serde_yaml::Value = serde_yaml::from_slice(&output.stdout).unwrap();
    assert_eq!(view["application"]["archetype"].as_str(), Some("nodejs"));
    assert!(view.get("dependencies").is_none());
}

#[test]
fn test_inspect_missing_directory() {
    let output = Command::new(shiftpack_bin())
        .args(["inspect", "/nonexistent/shiftpack/app"])
        .output()
        .expect("Failed to execute shiftpack");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"));
}

#[test]
fn test_migrate_writes_artifacts() {
    let (_source_dir, source) = copy_fixture("python-flask");
    let out = TempDir::new().unwrap();

    let output = Command::new(shiftpack_bin())
        .args(["migrate", "--source"])
        .arg(&source)
        .arg("--output")
        .arg(out.path())
        .output()
        .expect("Failed to execute shiftpack");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generated Artifacts"));

    let dockerfile = fs::read_to_string(out.path().join("Dockerfile")).unwrap();
    assert!(dockerfile.contains("FLASK_ENV=\"production\""));
    assert!(out.path().join("chart/flask-api/values.yaml").is_file());
}

#[test]
fn test_migrate_uses_output_env_var() {
    let out = TempDir::new().unwrap();
    let target = out.path().join("from-env");

    let output = Command::new(shiftpack_bin())
        .args(["migrate", "--source"])
        .arg(fixture_path("nodejs-express"))
        .env("SHIFTPACK_OUTPUT_DIR", &target)
        .output()
        .expect("Failed to execute shiftpack");

    assert!(output.status.success());
    assert!(target.join("Dockerfile").is_file());
}

#[test]
fn test_migrate_dry_run() {
    let out = TempDir::new().unwrap();
    let target = out.path().join("artifacts");

    let output = Command::new(shiftpack_bin())
        .args(["migrate", "--dry-run", "--format", "json", "--source"])
        .arg(fixture_path("react-app"))
        .arg("--output")
        .arg(&target)
        .output()
        .expect("Failed to execute shiftpack");

    assert!(output.status.success());
    assert!(!target.exists());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["application"]["archetype"], "react");
    assert!(report.get("artifacts").is_none());
}

#[test]
fn test_migrate_unknown_succeeds_without_dockerfile() {
    let source = TempDir::new().unwrap();
    fs::write(source.path().join("README.md"), "# nothing to see\n").unwrap();
    let out = TempDir::new().unwrap();

    let output = Command::new(shiftpack_bin())
        .args(["migrate", "--source"])
        .arg(source.path())
        .arg("--output")
        .arg(out.path())
        .output()
        .expect("Failed to execute shiftpack");

    assert!(output.status.success());
    assert!(!out.path().join("Dockerfile").exists());
    assert!(out.path().join("chart").is_dir());
}

#[test]
fn test_malformed_input_reports_warning() {
    let output = Command::new(shiftpack_bin())
        .args(["inspect", "--format", "human"])
        .arg(fixture_path("malformed-manifest"))
        .output()
        .expect("Failed to execute shiftpack");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Python"));
    assert!(stdout.contains("malformed manifest"));
}

#[test]
fn test_conflicting_verbosity_flags() {
    let output = Command::new(shiftpack_bin())
        .args(["-q", "-v", "inspect"])
        .output()
        .expect("Failed to execute shiftpack");

    assert!(!output.status.success());
}

#[test]
fn test_log_level_flag_overrides_environment() {
    let out = TempDir::new().unwrap();
    let run = |extra: &[&str]| {
        Command::new(shiftpack_bin())
            .env("SHIFTPACK_LOG_LEVEL", "loud")
            .arg("migrate")
            .arg("--source")
            .arg(fixture_path("python-flask"))
            .arg("--output")
            .arg(out.path())
            .args(["--dry-run", "--format", "json"])
            .args(extra)
            .output()
            .expect("Failed to execute shiftpack")
    };

    let rejected = run(&[]);
    assert_eq!(rejected.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&rejected.stderr).contains("Invalid log level"));

    let accepted = run(&["--log-level", "info"]);
    assert!(accepted.status.success());
}
