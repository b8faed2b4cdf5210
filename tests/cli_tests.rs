//! CLI tests for rustible-route53
//!
//! This test suite covers:
//! - Help and module listing
//! - Argument validation and exit codes
//! - Config file errors
//! - Failure output shape
//!
//! Nothing here reaches AWS: every case fails or finishes before a
//! provider call is made.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

/// Command isolated from the user's config files and AWS environment
fn rustible_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rustible-route53").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("RUSTIBLE_ROUTE53_CONFIG")
        .env_remove("RUSTIBLE_ROUTE53_REGION")
        .env_remove("RUSTIBLE_ROUTE53_OUTPUT")
        .env_remove("RUST_LOG");
    cmd
}

fn parse_json(stdout: &[u8]) -> serde_json::Value {
    serde_json::from_slice(stdout).unwrap()
}

#[test]
fn test_help() {
    let home = tempdir().unwrap();
    rustible_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("zone"))
        .stdout(predicate::str::contains("exec"))
        .stdout(predicate::str::contains("list-modules"));
}

#[test]
fn test_zone_help_lists_flags() {
    let home = tempdir().unwrap();
    rustible_cmd(&home)
        .args(["zone", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--vpc-id"))
        .stdout(predicate::str::contains("--delegation-set"));
}

#[test]
fn test_list_modules_json() {
    let home = tempdir().unwrap();
    let output = rustible_cmd(&home)
        .arg("list-modules")
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = parse_json(&output.stdout);
    assert!(json.get("aws_route53_zone").is_some());
}

#[test]
fn test_zone_requires_zone_flag() {
    let home = tempdir().unwrap();
    rustible_cmd(&home)
        .arg("zone")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--zone"));
}

#[test]
fn test_invalid_state_is_rejected_by_parser() {
    let home = tempdir().unwrap();
    rustible_cmd(&home)
        .args(["zone", "--zone", "example.com", "--state", "running"])
        .assert()
        .failure();
}

// ============================================================================
// Validation Exit Codes
// ============================================================================

#[test]
fn test_private_zone_with_delegation_set_exits_4() {
    let home = tempdir().unwrap();
    let output = rustible_cmd(&home)
        .args([
            "zone",
            "--zone",
            "internal.example.com",
            "--vpc-id",
            "vpc-123",
            "--vpc-region",
            "us-east-1",
            "--delegation-set",
            "N123",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(4));
    let json = parse_json(&output.stdout);
    assert_eq!(json["failed"], true);
    assert_eq!(json["changed"], false);
    assert!(json["msg"]
        .as_str()
        .unwrap()
        .contains("Private zones cannot specify a delegation set"));
}

#[test]
fn test_unpaired_vpc_exits_4() {
    let home = tempdir().unwrap();
    rustible_cmd(&home)
        .args(["zone", "--zone", "internal.example.com", "--vpc-id", "vpc-123"])
        .assert()
        .code(4)
        .stdout(predicate::str::contains(
            "vpc_id and vpc_region must be specified together",
        ));
}

#[test]
fn test_exec_missing_zone_exits_4() {
    let home = tempdir().unwrap();
    rustible_cmd(&home)
        .args(["exec", "aws_route53_zone", "-a", "state=absent"])
        .assert()
        .code(4)
        .stdout(predicate::str::contains("zone"));
}

#[test]
fn test_exec_bad_pair_exits_4() {
    let home = tempdir().unwrap();
    let output = rustible_cmd(&home)
        .args(["exec", "aws_route53_zone", "-a", "novalue"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(4));
    let json = parse_json(&output.stdout);
    assert_eq!(json["failed"], true);
    assert!(json["msg"].as_str().unwrap().contains("Expected key=value"));
}

#[test]
fn test_exec_args_from_stdin() {
    let home = tempdir().unwrap();
    rustible_cmd(&home)
        .args(["--output", "yaml", "exec", "aws_route53_zone", "--args", "-"])
        .write_stdin("zone: internal.example.com\nvpc_region: us-east-1\n")
        .assert()
        .code(4)
        .stdout(predicate::str::contains("failed: true"));
}

#[test]
fn test_exec_unknown_module_exits_1() {
    let home = tempdir().unwrap();
    let output = rustible_cmd(&home)
        .args(["exec", "aws_route53_record", "-a", "zone=example.com"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let json = parse_json(&output.stdout);
    assert_eq!(json["failed"], true);
    assert!(json["msg"].as_str().unwrap().contains("aws_route53_record"));
    assert!(json.get("code").is_none());
}

#[test]
fn test_exec_unknown_module_human_goes_to_stderr() {
    let home = tempdir().unwrap();
    rustible_cmd(&home)
        .args(["--output", "human", "--no-color", "exec", "aws_route53_record"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("ERROR: Module 'aws_route53_record' not found"));
}

#[test]
fn test_exec_missing_args_file_exits_4() {
    let home = tempdir().unwrap();
    rustible_cmd(&home)
        .args(["exec", "aws_route53_zone", "--args", "missing.yml"])
        .assert()
        .code(4);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_missing_config_file_exits_3() {
    let home = tempdir().unwrap();
    let output = rustible_cmd(&home)
        .args(["--config", "does-not-exist.toml", "list-modules"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    let json = parse_json(&output.stdout);
    assert_eq!(json["failed"], true);
    assert!(json["msg"].as_str().unwrap().contains("does-not-exist.toml"));
}

#[test]
fn test_config_file_sets_output_format() {
    let home = tempdir().unwrap();
    std::fs::write(
        home.path().join("rustible-route53.toml"),
        "[output]\nformat = \"yaml\"\n",
    )
    .unwrap();

    rustible_cmd(&home)
        .arg("list-modules")
        .assert()
        .success()
        .stdout(predicate::str::contains("aws_route53_zone: "));
}

#[test]
fn test_missing_region_exits_3() {
    let home = tempdir().unwrap();
    let aws_config = home.path().join("aws-config");
    let aws_credentials = home.path().join("aws-credentials");
    std::fs::write(&aws_config, "").unwrap();
    std::fs::write(&aws_credentials, "").unwrap();

    let output = rustible_cmd(&home)
        .env_remove("AWS_REGION")
        .env_remove("AWS_DEFAULT_REGION")
        .env_remove("AWS_PROFILE")
        .env("AWS_EC2_METADATA_DISABLED", "true")
        .env("AWS_CONFIG_FILE", &aws_config)
        .env("AWS_SHARED_CREDENTIALS_FILE", &aws_credentials)
        .args(["zone", "--zone", "example.com"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    let json = parse_json(&output.stdout);
    assert_eq!(json["failed"], true);
    assert!(json["msg"].as_str().unwrap().to_lowercase().contains("region"));
}
