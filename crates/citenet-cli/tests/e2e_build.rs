//! E2E CLI tests for the build and parse commands.
//!
//! Each test runs the `citenet` binary as a subprocess against a temp
//! directory holding synthetic savedrecs exports.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// Two publications co-citing Davis and Venkatesh; the first also cites
/// Ajzen, which default pruning removes.
const SAVEDRECS: &str = "\
FN Clarivate Analytics Web of Science
VR 1.0
PT J
AU Smith, A
TI Adoption of something
SO JOURNAL OF TESTS
CR Davis FD, 1989, MIS QUART, V13, P319
   Venkatesh V, 2003, MIS QUART, V27, P425
   Ajzen I, 1991, ORGAN BEHAV HUM DEC, V50, P179
PY 2020
UT WOS:000000000000001
ER

PT J
AU Jones, B
TI More adoption
SO JOURNAL OF TESTS
CR Davis FD, 1989, MIS QUART, V13, P319
   Venkatesh V, 2003, MIS QUART, V27, P425
PY 2021
UT WOS:000000000000002
ER

EF
";

/// Build a Command targeting the citenet binary, rooted in `dir`.
fn citenet_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("citenet"));
    cmd.current_dir(dir);
    // Suppress tracing output that goes to stderr
    cmd.env("CITENET_LOG", "error");
    cmd
}

/// Write a savedrecs export into `dir` under `name`.
fn write_export(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("write export");
}

// ---------------------------------------------------------------------------
// build
// ---------------------------------------------------------------------------

#[test]
fn build_writes_pruned_graphml() {
    let dir = TempDir::new().expect("tempdir");
    write_export(dir.path(), "savedrecs.txt", SAVEDRECS);

    citenet_cmd(dir.path())
        .args([
            "build",
            "--input",
            ".",
            "--output",
            "out/network.graphml",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("out/network.graphml"));

    let xml =
        fs::read_to_string(dir.path().join("out/network.graphml")).expect("output exists");
    assert!(xml.contains(r#"<node id="DAVIS FD, 1989, MIS QUART">"#));
    assert!(xml.contains(r#"<node id="VENKATESH V, 2003, MIS QUART">"#));
    assert!(!xml.contains("AJZEN"), "weight-1 neighbor must be pruned");
    assert!(xml.contains(r#"<data key="weight">2.0</data>"#));
}

#[test]
fn build_json_summary_reports_stages() {
    let dir = TempDir::new().expect("tempdir");
    write_export(dir.path(), "savedrecs.txt", SAVEDRECS);

    let output = citenet_cmd(dir.path())
        .args([
            "build",
            "--input",
            ".",
            "--output",
            "network.graphml",
            "--json",
        ])
        .output()
        .expect("build should not crash");
    assert!(output.status.success());

    let json: Value =
        serde_json::from_slice(&output.stdout).expect("build --json produces valid JSON");
    assert_eq!(json["status"], "written");
    assert_eq!(json["files"], 1);
    assert_eq!(json["publications"], 2);
    assert_eq!(json["prune"]["initial"]["nodes"], 3);
    assert_eq!(json["prune"]["after_giant_component"]["nodes"], 2);
    assert_eq!(json["prune"]["after_giant_component"]["edges"], 1);
}

#[test]
fn min_weight_zero_keeps_single_co_citations() {
    let dir = TempDir::new().expect("tempdir");
    write_export(dir.path(), "savedrecs.txt", SAVEDRECS);

    citenet_cmd(dir.path())
        .args([
            "build",
            "--input",
            ".",
            "--output",
            "network.graphml",
            "--min-weight",
            "0",
        ])
        .assert()
        .success();

    let xml = fs::read_to_string(dir.path().join("network.graphml")).expect("output exists");
    assert!(xml.contains("AJZEN"), "weight-1 edges kept at min-weight 0");
}

#[test]
fn empty_directory_exits_cleanly_without_output() {
    let dir = TempDir::new().expect("tempdir");

    citenet_cmd(dir.path())
        .args(["build", "--input", ".", "--output", "network.graphml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no-input"));

    assert!(!dir.path().join("network.graphml").exists());
}

#[test]
fn over_pruned_corpus_writes_no_file() {
    let dir = TempDir::new().expect("tempdir");
    write_export(dir.path(), "savedrecs.txt", SAVEDRECS);

    citenet_cmd(dir.path())
        .args([
            "build",
            "--input",
            ".",
            "--output",
            "network.graphml",
            "--min-weight",
            "10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("pruned-empty"));

    assert!(!dir.path().join("network.graphml").exists());
}

#[test]
fn missing_input_directory_fails() {
    let dir = TempDir::new().expect("tempdir");

    citenet_cmd(dir.path())
        .args([
            "build",
            "--input",
            "does-not-exist",
            "--output",
            "network.graphml",
        ])
        .assert()
        .failure();
}

#[test]
fn multiple_exports_are_merged_in_sequence_order() {
    let dir = TempDir::new().expect("tempdir");
    // Split the corpus: one publication per export file.
    let records: Vec<&str> = SAVEDRECS.split("ER\n").collect();
    write_export(
        dir.path(),
        "savedrecs.txt",
        &format!("{}ER\n", records[0]),
    );
    write_export(
        dir.path(),
        "savedrecs (1).txt",
        &format!("{}ER\n", records[1].trim_start()),
    );

    let output = citenet_cmd(dir.path())
        .args([
            "build",
            "--input",
            ".",
            "--output",
            "network.graphml",
            "--json",
        ])
        .output()
        .expect("build should not crash");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["files"], 2);
    assert_eq!(json["publications"], 2);
    assert_eq!(json["status"], "written");
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_reports_per_file_counts() {
    let dir = TempDir::new().expect("tempdir");
    write_export(dir.path(), "savedrecs.txt", SAVEDRECS);

    let output = citenet_cmd(dir.path())
        .args(["parse", "--input", ".", "--json"])
        .output()
        .expect("parse should not crash");
    assert!(output.status.success());

    let json: Value =
        serde_json::from_slice(&output.stdout).expect("parse --json produces valid JSON");
    assert_eq!(json["publications"], 2);
    assert_eq!(json["cited_refs"], 5);
    assert_eq!(json["files"][0]["records"], 2);
}

#[test]
fn parse_human_output_lists_files() {
    let dir = TempDir::new().expect("tempdir");
    write_export(dir.path(), "savedrecs.txt", SAVEDRECS);

    citenet_cmd(dir.path())
        .args(["parse", "--input", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("savedrecs.txt: 2 records, 5 cited refs"));
}

#[test]
fn quiet_suppresses_human_summary() {
    let dir = TempDir::new().expect("tempdir");
    write_export(dir.path(), "savedrecs.txt", SAVEDRECS);

    citenet_cmd(dir.path())
        .args([
            "build",
            "--input",
            ".",
            "--output",
            "network.graphml",
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(dir.path().join("network.graphml").exists());
}
