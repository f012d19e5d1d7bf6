mod common;

use std::fs;
use std::process::Command;

use common::{fixtures_dir, schema_path, write_fixtures};
use serde_json::Value;
use tempfile::TempDir;

fn docseed() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_docseed"));
    command.env_remove("DOCSEED_FIXTURES").env_remove("RUST_LOG");
    command
}

#[test]
fn test_cli_help() {
    let output = docseed().arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("docseed"));
    assert!(stdout.contains("--fixtures"));
    assert!(stdout.contains("--schema"));
    assert!(stdout.contains("--class"));
    assert!(stdout.contains("--format"));
    assert!(stdout.contains("--output-file"));
}

#[test]
fn test_cli_missing_schema() {
    let output = docseed().output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("required") || stderr.contains("--schema"));
}

#[test]
fn test_cli_invalid_schema_path() {
    let output = docseed()
        .args(["--schema", "/nonexistent/schema.yml"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Invalid arguments") || stderr.contains("does not exist"));
}

#[test]
fn test_cli_invalid_output_format() {
    let output = docseed()
        .args(["--schema", schema_path().to_str().unwrap(), "--format", "xml"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("invalid value") || stderr.contains("possible values"));
}

#[test]
fn test_cli_loads_requested_class() {
    let output = docseed()
        .args([
            "--schema",
            schema_path().to_str().unwrap(),
            "--fixtures",
            fixtures_dir().to_str().unwrap(),
            "--class",
            "City",
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    let city = &report["City"]["new_york_city"];
    assert_eq!(city["name"], "New York City");
    assert_eq!(city["people"][0]["first_name"], "Christopher");
    assert!(city["state_id"].is_string());
    assert!(report.get("State").is_none());
}

#[test]
fn test_cli_default_classes() {
    let output = docseed()
        .args([
            "--schema",
            schema_path().to_str().unwrap(),
            "--fixtures",
            fixtures_dir().to_str().unwrap(),
            "-q",
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    let classes: Vec<&str> = report
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(classes, vec!["City", "State", "GeoUriScheme", "User"]);

    // State was seeded while loading City and reused afterwards
    assert_eq!(
        report["City"]["new_york_city"]["state_id"],
        report["State"]["new_york"]["_id"]
    );
}

#[test]
fn test_cli_fixtures_from_env() {
    let output = docseed()
        .env("DOCSEED_FIXTURES", fixtures_dir())
        .args(["--schema", schema_path().to_str().unwrap(), "--class", "User"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["User"]["example_user"]["user_name"], "example");
}

#[test]
fn test_cli_yaml_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("seed.yml");

    let output = docseed()
        .args([
            "--schema",
            schema_path().to_str().unwrap(),
            "--fixtures",
            fixtures_dir().to_str().unwrap(),
            "--class",
            "GeoUriScheme",
            "-f",
            "yaml",
            "-O",
            output_path.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let content = fs::read_to_string(&output_path).unwrap();
    let report: serde_yaml::Value = serde_yaml::from_str(&content).unwrap();
    assert_eq!(
        report["GeoUriScheme"]["terrytown"]["x"],
        serde_yaml::Value::from(-90.029444)
    );
}

#[test]
fn test_cli_missing_fixture_directory() {
    let temp_dir = TempDir::new().unwrap();
    let output = docseed()
        .current_dir(temp_dir.path())
        .args([
            "--schema",
            schema_path().to_str().unwrap(),
            "--fixtures",
            "missing/fixtures",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("unable to find fixtures"));
}

#[test]
fn test_cli_reports_load_error() {
    let dir = write_fixtures(&[("cities.yml", "springfield:\n  population: 30000\n")]);
    let output = docseed()
        .args([
            "--schema",
            schema_path().to_str().unwrap(),
            "--fixtures",
            dir.path().to_str().unwrap(),
            "--class",
            "City",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to load fixtures for City"));
}
