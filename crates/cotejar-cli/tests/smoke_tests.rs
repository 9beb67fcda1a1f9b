//! Smoke tests for cotejador CLI
//!
//! These tests exercise the binary end to end against a temporary
//! baseline store.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const CONFIG: &str = "portfolio-history-portrait-16x9-light";

/// Get a command for the cotejador binary
fn cotejador(root: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cotejador").expect("cotejador binary should exist");
    cmd.arg("--root").arg(root.path().join("visual"));
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    Command::cargo_bin("cotejador")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.3.0"));
}

#[test]
fn test_help_flag() {
    Command::cargo_bin("cotejador")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("baseline"))
        .stdout(predicate::str::contains("compare"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_no_args_shows_help() {
    // Running with no args should error gracefully: a subcommand is required
    Command::cargo_bin("cotejador").unwrap().assert().failure();
}

// ============================================================================
// Matrix
// ============================================================================

#[test]
fn test_matrix_lists_standard_configs() {
    let temp = TempDir::new().unwrap();
    cotejador(&temp)
        .arg("matrix")
        .assert()
        .success()
        .stdout(predicate::str::contains(CONFIG))
        .stdout(predicate::str::contains("portfolio-history-portrait-3x4-dark"))
        .stdout(predicate::str::contains("aspect_ratio=16:9"));
}

#[test]
fn test_matrix_json_is_parsable() {
    let temp = TempDir::new().unwrap();
    let output = cotejador(&temp)
        .args(["matrix", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 6);
    assert!(rows.iter().any(|r| r["name"] == CONFIG));
}

// ============================================================================
// Lifecycle: update, compare, validate, cleanup
// ============================================================================

#[test]
fn test_compare_without_baseline_fails() {
    let temp = TempDir::new().unwrap();
    let image = temp.path().join("shot.png");
    fs::write(&image, b"pixels").unwrap();

    cotejador(&temp)
        .arg("compare")
        .arg(CONFIG)
        .arg(&image)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No baseline"));
}

#[test]
fn test_update_then_compare_identical_passes() {
    let temp = TempDir::new().unwrap();
    let image = temp.path().join("shot.png");
    fs::write(&image, b"rendered dashboard").unwrap();

    cotejador(&temp)
        .arg("update")
        .arg(CONFIG)
        .arg(&image)
        .assert()
        .success()
        .stdout(predicate::str::contains("Baseline updated"));

    cotejador(&temp)
        .arg("compare")
        .arg(CONFIG)
        .arg(&image)
        .assert()
        .success()
        .stdout(predicate::str::contains("matches baseline"));
}

#[test]
fn test_compare_drifted_capture_fails_with_similarity() {
    let temp = TempDir::new().unwrap();
    let approved = temp.path().join("approved.png");
    let drifted = temp.path().join("drifted.png");
    fs::write(&approved, b"original render bytes").unwrap();
    fs::write(&drifted, b"changed").unwrap();

    cotejador(&temp)
        .arg("update")
        .arg(CONFIG)
        .arg(&approved)
        .assert()
        .success();

    cotejador(&temp)
        .arg("compare")
        .arg(CONFIG)
        .arg(&drifted)
        .assert()
        .failure()
        .stdout(predicate::str::contains("visual drift"))
        .stdout(predicate::str::contains("similarity"))
        .stderr(predicate::str::contains(CONFIG));
}

#[test]
fn test_validate_empty_store_passes() {
    let temp = TempDir::new().unwrap();
    cotejador(&temp)
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 "));
}

#[test]
fn test_validate_detects_tampered_baseline() {
    let temp = TempDir::new().unwrap();
    let image = temp.path().join("shot.png");
    fs::write(&image, b"rendered dashboard").unwrap();

    cotejador(&temp)
        .arg("update")
        .arg(CONFIG)
        .arg(&image)
        .assert()
        .success();

    // Hand-edit the approved image outside the managed update path
    let baseline = temp
        .path()
        .join("visual")
        .join("baselines")
        .join(format!("baseline-{CONFIG}.png"));
    fs::write(&baseline, b"tampered").unwrap();

    cotejador(&temp)
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("invalid"));

    let output = cotejador(&temp)
        .args(["validate", "--format", "json"])
        .output()
        .unwrap();
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["invalid"][0], CONFIG);
}

#[test]
fn test_cleanup_spares_baselines() {
    let temp = TempDir::new().unwrap();
    let approved = temp.path().join("approved.png");
    let drifted = temp.path().join("drifted.png");
    fs::write(&approved, b"original render bytes").unwrap();
    fs::write(&drifted, b"changed").unwrap();

    cotejador(&temp)
        .arg("update")
        .arg(CONFIG)
        .arg(&approved)
        .assert()
        .success();

    // Populate comparisons/ with a current capture and its diff
    cotejador(&temp)
        .arg("compare")
        .arg(CONFIG)
        .arg(&drifted)
        .assert()
        .failure();

    cotejador(&temp)
        .arg("cleanup")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 2"));

    let comparisons = temp.path().join("visual").join("comparisons");
    assert_eq!(fs::read_dir(&comparisons).unwrap().count(), 0);

    let baseline = temp
        .path()
        .join("visual")
        .join("baselines")
        .join(format!("baseline-{CONFIG}.png"));
    assert_eq!(fs::read(&baseline).unwrap(), b"original render bytes");

    // And the store still validates clean
    cotejador(&temp).arg("validate").assert().success();
}

#[test]
fn test_list_after_update() {
    let temp = TempDir::new().unwrap();
    let image = temp.path().join("shot.png");
    fs::write(&image, b"rendered dashboard").unwrap();

    cotejador(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No baselines recorded"));

    cotejador(&temp)
        .arg("update")
        .arg(CONFIG)
        .arg(&image)
        .assert()
        .success();

    cotejador(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(CONFIG));
}

#[test]
fn test_unknown_configuration_rejected() {
    let temp = TempDir::new().unwrap();
    let image = temp.path().join("shot.png");
    fs::write(&image, b"pixels").unwrap();

    cotejador(&temp)
        .arg("update")
        .arg("not-a-config")
        .arg(&image)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown configuration"));
}
