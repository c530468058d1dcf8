//! CLI integration tests

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

/// Build command for the railsim binary (finds it in target/debug when run via cargo test).
fn railsim_cli() -> Command {
    cargo_bin_cmd!("railsim")
}

/// Path to railsim library test fixtures (relative to workspace).
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("railsim")
        .join("tests")
        .join("fixtures")
}

#[test]
fn test_cli_help() {
    let mut cmd = railsim_cli();

    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("breadboard"));
}

#[test]
fn test_cli_version() {
    let mut cmd = railsim_cli();

    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_probe_pressed_button() {
    let mut cmd = railsim_cli();

    cmd.arg("probe")
        .arg(fixtures_dir().join("button.json"))
        .arg("btn1:SIG")
        .arg("board:GND4");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("btn1:SIG"))
        .stdout(predicate::str::contains("high (1.00)"))
        .stdout(predicate::str::contains("low"));
}

#[test]
fn test_cli_probe_with_release() {
    let mut cmd = railsim_cli();

    cmd.arg("probe")
        .arg(fixtures_dir().join("button.json"))
        .arg("btn1:SIG")
        .arg("--set")
        .arg("btn1=release");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("floating"));
}

#[test]
fn test_cli_probe_json() {
    let mut cmd = railsim_cli();

    cmd.arg("probe")
        .arg(fixtures_dir().join("switched_supply.json"))
        .arg("board:GP26")
        .arg("--format")
        .arg("json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["powered"], true);
    assert_eq!(json["pins"][0]["pin"], "board:GP26");
    assert_eq!(json["pins"][0]["level"], 0.3);
    assert_eq!(json["pins"][0]["state"], "high");
}

#[test]
fn test_cli_probe_bad_pin() {
    let mut cmd = railsim_cli();

    cmd.arg("probe")
        .arg(fixtures_dir().join("button.json"))
        .arg("SIG");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Malformed wire endpoint"));
}

#[test]
fn test_cli_power_exit_codes() {
    railsim_cli()
        .arg("power")
        .arg(fixtures_dir().join("button.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("powered by bat1"));

    railsim_cli()
        .arg("power")
        .arg(fixtures_dir().join("cross_battery.json"))
        .assert()
        .code(2)
        .stdout(predicate::str::contains("not powered"));

    railsim_cli()
        .arg("power")
        .arg(fixtures_dir().join("low_battery.json"))
        .assert()
        .code(2);
}

#[test]
fn test_cli_power_after_switch_toggle() {
    let mut cmd = railsim_cli();

    cmd.arg("power")
        .arg(fixtures_dir().join("switched_supply.json"))
        .arg("--set")
        .arg("sw1=toggle");

    cmd.assert().code(2);
}

#[test]
fn test_cli_unsupported_actuation() {
    let mut cmd = railsim_cli();

    cmd.arg("probe")
        .arg(fixtures_dir().join("button.json"))
        .arg("btn1:SIG")
        .arg("--set")
        .arg("led1=press");

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("does not support"));
}

#[test]
fn test_cli_malformed_set() {
    let mut cmd = railsim_cli();

    cmd.arg("nets")
        .arg(fixtures_dir().join("button.json"))
        .arg("--set")
        .arg("btn1");

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("OWNER=ACTUATION"));
}

#[test]
fn test_cli_nets_human() {
    let mut cmd = railsim_cli();

    cmd.arg("nets").arg(fixtures_dir().join("relay_loop.json"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Powered by bat1"))
        .stdout(predicate::str::contains("k1:COM"));
}

#[test]
fn test_cli_nets_json() {
    let mut cmd = railsim_cli();

    cmd.arg("nets")
        .arg(fixtures_dir().join("button.json"))
        .arg("--format")
        .arg("json");

    let output = cmd.assert().success().get_output().stdout.clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["powering_battery"], "bat1");
    assert!(json["nets"].as_array().unwrap().len() > 1);
}

#[test]
fn test_cli_missing_project() {
    let mut cmd = railsim_cli();

    cmd.arg("power").arg("/nonexistent/project.json");

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load project"));
}

#[test]
fn test_cli_project_in_temp_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shorted.json");
    std::fs::write(
        &path,
        r#"{
            "board": { "name": "bare", "pins": ["GND1", "GND2", "5V", "D4"] },
            "components": [{ "kind": "battery", "id": "b", "voltage": 5.0 }],
            "wires": [
                { "from": "board:5V", "to": "b:POS" },
                { "from": "board:GND1", "to": "b:NEG" },
                { "from": "board:D4", "to": "board:GND2" }
            ],
            "pin_states": { "D4": 1.0 }
        }"#,
    )
    .unwrap();

    railsim_cli()
        .arg("probe")
        .arg(&path)
        .arg("board:D4")
        .assert()
        .success()
        .stdout(predicate::str::contains("low"));
}

#[test]
fn test_cli_boards() {
    let mut cmd = railsim_cli();

    cmd.arg("boards").arg("--pins");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("pico"))
        .stdout(predicate::str::contains("uno"))
        .stdout(predicate::str::contains("VSYS"));
}
