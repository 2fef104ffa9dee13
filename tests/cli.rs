use std::io::Write;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;
use serde_json::Value;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/hammer_throw.csv")
}

fn scratch(contents: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn text_report_for_fixture() {
    cargo_bin_cmd!("hammertrack")
        .arg(fixture())
        .assert()
        .success()
        .stdout(contains("Turning points (13)"))
        .stdout(contains("Segments (12)"))
        .stdout(contains("-24.44"));
}

#[test]
fn json_report_for_fixture() {
    let output = cargo_bin_cmd!("hammertrack")
        .arg(fixture())
        .args(["--preset", "strict", "--stride", "3", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let value: Value = serde_json::from_str(&stdout).expect("stdout must be JSON");
    let analysis = &value[0]["analysis"];
    assert_eq!(analysis["config"]["stride"], 3);
    assert_eq!(analysis["config"]["detection"]["min_frame_gap"], 10);
    assert_eq!(analysis["config"]["detection"]["min_delta_x"], 0.015);
    assert_eq!(analysis["turning_points"].as_array().unwrap().len(), 9);
    assert_eq!(analysis["turning_points"][1]["frame"], 22);
    assert_eq!(analysis["turning_points"][1]["kind"], "Minimum");
    assert_eq!(analysis["turning_points"][8]["frame"], 133);
    assert_eq!(analysis["segments"].as_array().unwrap().len(), 4);
    assert_eq!(analysis["segments"][0]["midpoint"], 1);
    assert!(value[0]["error"].is_null());
}

#[test]
fn flags_override_config_file() {
    let config = scratch(r#"{"detection": {"min_delta_x": 0.01, "min_frame_gap": 16}}"#, ".json");
    let output = cargo_bin_cmd!("hammertrack")
        .arg(fixture())
        .arg("--config")
        .arg(config.path())
        .args(["--min-frame-gap", "0", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    let detection = &value[0]["analysis"]["config"]["detection"];
    assert_eq!(detection["min_frame_gap"], 0);
    assert_eq!(detection["min_delta_x"], 0.01);
}

#[test]
fn stationary_input_reports_no_motion() {
    let still = scratch("Frame,X,Y\n0,0.5,0.5\n1,0.5,0.5\n2,0.5,0.5\n", ".csv");
    cargo_bin_cmd!("hammertrack")
        .arg(still.path())
        .assert()
        .success()
        .stdout(contains("no motion detected"));

    let output = cargo_bin_cmd!("hammertrack")
        .arg(still.path())
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value[0]["analysis"].is_null());
    assert!(value[0]["error"]
        .as_str()
        .unwrap()
        .contains("insufficient data"));
}

#[test]
fn several_inputs_keep_order() {
    let still = scratch("0,0.5,0.5\n1,0.5,0.5\n", ".csv");
    let output = cargo_bin_cmd!("hammertrack")
        .arg(fixture())
        .arg(still.path())
        .arg(fixture())
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert!(entries[0]["analysis"].is_object());
    assert!(entries[1]["analysis"].is_null());
    assert_eq!(entries[0]["analysis"], entries[2]["analysis"]);
}

#[test]
fn invalid_stride_is_rejected() {
    cargo_bin_cmd!("hammertrack")
        .arg(fixture())
        .args(["--stride", "4"])
        .assert()
        .failure()
        .stderr(contains("stride must be 2 or 3"));
}

#[test]
fn negative_threshold_is_rejected() {
    cargo_bin_cmd!("hammertrack")
        .arg(fixture())
        .args(["--min-delta-x", "-0.5"])
        .assert()
        .failure()
        .stderr(contains("min_delta_x"));
}

#[test]
fn malformed_csv_names_the_line() {
    let bad = scratch("Frame,X,Y\n0,0.1,0.2\n1,0.2\n", ".csv");
    cargo_bin_cmd!("hammertrack")
        .arg(bad.path())
        .assert()
        .failure()
        .stderr(contains("line 3"));
}
