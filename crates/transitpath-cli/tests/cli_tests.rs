//! Integration tests for the `stations` and `route` subcommands.
//!
//! These tests use `assert_cmd` to run the binary against the checked-in
//! Vancouver SkyTrain station table and check:
//! - text, compact and JSON output
//! - the "no path" notice and its exit code
//! - failures for unknown stations and missing tables

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Path to the station table fixture.
fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/vancouver_subway.csv")
}

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("transitpath-cli").expect("binary exists");
    cmd.env("NO_COLOR", "1")
        .env("RUST_LOG", "warn")
        .env_remove("TRANSITPATH_STATIONS")
        .arg("--stations")
        .arg(fixture_path());
    cmd
}

#[test]
fn route_prints_expo_line_path() {
    cli()
        .args(["route", "--from", "Waterfront", "--to", "Commercial-Broadway"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Path from Waterfront to Commercial-Broadway (5 hops; algorithm: exhaustive):",
        ))
        .stdout(predicate::str::contains("Stadium-Chinatown"));
}

#[test]
fn route_compact_format() {
    cli()
        .args([
            "--format",
            "compact",
            "route",
            "--from",
            "YVR-Airport",
            "--to",
            "Richmond-Brighouse",
            "--algorithm",
            "bfs",
        ])
        .assert()
        .success()
        .stdout(
            "YVR-Airport -> Sea Island Centre -> Templeton -> Bridgeport -> Aberdeen \
             -> Lansdowne -> Richmond-Brighouse\n",
        );
}

#[test]
fn route_avoid_reroutes() {
    let output = cli()
        .args([
            "--format",
            "json",
            "route",
            "--from",
            "Commercial-Broadway",
            "--to",
            "Lougheed Town Centre",
            "--avoid",
            "Gilmore",
        ])
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["outcome"], "found");
    assert_eq!(value["hops"], 13);
    let steps = value["steps"].as_array().expect("steps array");
    assert!(steps.iter().any(|step| step["name"] == "Columbia"));
    assert!(steps.iter().all(|step| step["name"] != "Gilmore"));
}

#[test]
fn route_without_path_succeeds_with_notice() {
    cli()
        .args([
            "route",
            "--from",
            "Commercial-Broadway",
            "--to",
            "Lougheed Town Centre",
            "--avoid",
            "Gilmore",
            "--avoid",
            "Columbia",
        ])
        .assert()
        .success()
        .stdout("No path found from Commercial-Broadway to Lougheed Town Centre.\n");
}

#[test]
fn route_budget_is_reported() {
    cli()
        .args([
            "route",
            "--from",
            "Waterfront",
            "--to",
            "King George",
            "--max-expansions",
            "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("search stopped: budget_exhausted"));
}

#[test]
fn route_unknown_station_fails_with_suggestion() {
    cli()
        .args(["route", "--from", "Waterfornt", "--to", "Burrard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Waterfornt"))
        .stderr(predicate::str::contains("Did you mean 'Waterfront'?"));
}

#[test]
fn route_rejects_unknown_algorithm() {
    cli()
        .args([
            "route",
            "--from",
            "Waterfront",
            "--to",
            "Burrard",
            "--algorithm",
            "dijkstra",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown path algorithm"));
}

#[test]
fn stations_lists_network() {
    cli()
        .arg("stations")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("53 stations, 53 links:"))
        .stdout(predicate::str::contains(
            "Bridgeport (49.1956, -123.1260): Marine Drive, Templeton, Aberdeen",
        ));
}

#[test]
fn stations_json_is_an_array() {
    let output = cli()
        .args(["--format", "json", "stations"])
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let stations = value.as_array().expect("array");
    assert_eq!(stations.len(), 53);
    assert_eq!(stations[0]["name"], "Waterfront");
    assert_eq!(stations[0]["x"], 167);
}

#[test]
fn station_directory_resolves_default_filename() {
    let dir = TempDir::new().expect("create temp dir");
    fs::copy(fixture_path(), dir.path().join("stations.csv")).expect("copy fixture");

    Command::cargo_bin("transitpath-cli")
        .expect("binary exists")
        .env("RUST_LOG", "warn")
        .args(["--format", "compact", "--stations"])
        .arg(dir.path())
        .args(["route", "--from", "Burrard", "--to", "Waterfront"])
        .assert()
        .success()
        .stdout("Burrard -> Waterfront\n");
}

#[test]
fn station_table_from_environment() {
    Command::cargo_bin("transitpath-cli")
        .expect("binary exists")
        .env("RUST_LOG", "warn")
        .env("TRANSITPATH_STATIONS", fixture_path())
        .args(["--format", "compact", "route", "--from", "Granville", "--to", "Burrard"])
        .assert()
        .success()
        .stdout("Granville -> Burrard\n");
}

#[test]
fn missing_station_table_fails() {
    let dir = TempDir::new().expect("create temp dir");
    Command::cargo_bin("transitpath-cli")
        .expect("binary exists")
        .env("RUST_LOG", "warn")
        .arg("--stations")
        .arg(dir.path().join("nowhere.csv"))
        .arg("stations")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to locate the station table"));
}
