use std::fs;

use assert_cmd::Command;

const SAMPLE_CSV: &str = "0,2020-01-01T00:00:00,10.0,20.0,5\n\
                          0,2020-01-01T00:00:01,10.1,20.1,6\n\
                          1,2020-01-01T00:00:02,11.0,21.0,7\n";

#[test]
fn prints_version() {
    let mut cmd = Command::cargo_bin("trackconv").unwrap();
    cmd.arg("-V");
    cmd.assert()
        .success()
        .stdout(predicates::str::starts_with("trackconv"));
}

#[test]
fn converts_csv_to_gpx() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("in.csv");
    let output = temp.path().join("out.gpx");
    fs::write(&input, SAMPLE_CSV).unwrap();

    let mut cmd = Command::cargo_bin("trackconv").unwrap();
    cmd.args([
        "--in-file",
        input.to_str().unwrap(),
        "--in-format",
        "csv",
        "--out-file",
        output.to_str().unwrap(),
        "--out-format",
        "gpx",
    ]);
    cmd.assert().success();

    let content = fs::read_to_string(&output).unwrap();
    let doc = roxmltree::Document::parse(&content).unwrap();
    let tracks = doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "trk")
        .count();
    assert_eq!(tracks, 2);
}

#[test]
fn applies_input_options_and_drops_malformed_tokens() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("in.csv");
    let output = temp.path().join("out.csv");
    fs::write(&input, "0;2020-01-01T00:00:00;10.0;20.0;5\n").unwrap();

    let mut cmd = Command::cargo_bin("trackconv").unwrap();
    cmd.args([
        "--in-file",
        input.to_str().unwrap(),
        "--in-format",
        "csv",
        "--in-options",
        "delimiter=; invalidtoken",
        "--out-file",
        output.to_str().unwrap(),
        "--out-format",
        "csv",
    ]);
    cmd.assert().success();

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.starts_with("0,2020-01-01T00:00:00,10.0,20.0,5"));
}

#[test]
fn unknown_format_fails() {
    let mut cmd = Command::cargo_bin("trackconv").unwrap();
    cmd.args([
        "--in-file",
        "in.csv",
        "--in-format",
        "geojson",
        "--out-file",
        "out.gpx",
        "--out-format",
        "gpx",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Unknown format: 'geojson'"));
}

#[test]
fn missing_input_file_fails() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("absent.csv");
    let output = temp.path().join("out.gpx");

    let mut cmd = Command::cargo_bin("trackconv").unwrap();
    cmd.args([
        "--in-file",
        input.to_str().unwrap(),
        "--in-format",
        "csv",
        "--out-file",
        output.to_str().unwrap(),
        "--out-format",
        "gpx",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("does not exist"));
}

#[test]
fn write_incapable_output_format_fails() {
    let temp = tempfile::tempdir().unwrap();
    let input = temp.path().join("in.csv");
    let output = temp.path().join("out.tcx");
    fs::write(&input, SAMPLE_CSV).unwrap();

    let mut cmd = Command::cargo_bin("trackconv").unwrap();
    cmd.args([
        "--in-file",
        input.to_str().unwrap(),
        "--in-format",
        "csv",
        "--out-file",
        output.to_str().unwrap(),
        "--out-format",
        "tcx-legacy",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("does not support writing"));

    assert!(!output.exists());
}
