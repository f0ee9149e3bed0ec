//! Binary-level tests for dronectl

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const FLEET: &str = r#"{
  "drones": [
    { "serial_number": "DRN-IDLE", "model": "LIGHTWEIGHT", "weight_limit": 100, "battery_percentage": 80 },
    { "serial_number": "DRN-LOW", "model": "HEAVYWEIGHT", "weight_limit": 500, "battery_percentage": 10 },
    { "serial_number": "DRN-BUSY", "model": "CRUISERWEIGHT", "weight_limit": 300, "battery_percentage": 90,
      "state": "DELIVERING", "cargo": [ { "name": "Saline", "weight": 120, "code": "SAL_1" } ] }
  ]
}"#;

fn fleet_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("fleet.json"), FLEET).unwrap();
    dir
}

fn dronectl(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dronectl").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("DRONECTL_CONFIG")
        .arg("--fleet")
        .arg(dir.join("fleet.json"));
    cmd
}

#[test]
fn test_list_available() {
    let dir = fleet_dir();
    dronectl(dir.path())
        .arg("available")
        .assert()
        .success()
        .stdout(predicate::str::contains("DRN-IDLE"))
        .stdout(predicate::str::contains("DRN-LOW").not())
        .stdout(predicate::str::contains("DRN-BUSY").not());
}

#[test]
fn test_battery_json() {
    let dir = fleet_dir();
    let output = dronectl(dir.path())
        .args(["--output", "json", "battery", "DRN-LOW"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["battery_percentage"], 10);
}

#[test]
fn test_unknown_drone_fails() {
    let dir = fleet_dir();
    dronectl(dir.path())
        .args(["cargo", "GHOST"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GHOST"));
}

#[test]
fn test_load_persists_fleet() {
    let dir = fleet_dir();
    let request = dir.path().join("request.json");
    std::fs::write(
        &request,
        r#"{ "serial_number": "DRN-IDLE", "cargo": [ { "name": "Aspirin", "weight": 40, "code": "ASP_1" } ] }"#,
    )
    .unwrap();

    dronectl(dir.path())
        .arg("load")
        .arg(&request)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cargo fully loaded"));

    dronectl(dir.path())
        .args(["cargo", "DRN-IDLE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ASP_1"));
}

#[test]
fn test_dry_run_leaves_manifest_alone() {
    let dir = fleet_dir();
    let drone = dir.path().join("drone.json");
    std::fs::write(
        &drone,
        r#"{ "serial_number": "DRN-NEW", "model": "MIDDLEWEIGHT", "weight_limit": 200, "battery_percentage": 100 }"#,
    )
    .unwrap();

    dronectl(dir.path())
        .arg("--dry-run")
        .arg("register")
        .arg(&drone)
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered drone: DRN-NEW"));

    let manifest = std::fs::read_to_string(dir.path().join("fleet.json")).unwrap();
    assert_eq!(manifest, FLEET);
}

#[test]
fn test_register_rejects_bad_battery() {
    let dir = fleet_dir();
    let drone = dir.path().join("drone.json");
    std::fs::write(
        &drone,
        r#"{ "serial_number": "DRN-BAD", "model": "MIDDLEWEIGHT", "weight_limit": 200, "battery_percentage": 140 }"#,
    )
    .unwrap();

    dronectl(dir.path()).arg("register").arg(&drone).assert().failure();
}
