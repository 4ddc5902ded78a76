//! Drives the `tagscout` binary end to end.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tagscout::search::{ERROR_HEADER, REPORT_HEADER};
use tempfile::TempDir;

const CATALOG: &str = r#"{
    "default_server": "AF01",
    "servers": [{
        "name": "AF01",
        "databases": [{
            "name": "Plant",
            "elements": [{
                "name": "Root",
                "attributes": [
                    { "name": "A1", "point": "\\\\PI01\\Tag1" },
                    { "name": "Broken", "point": "Tag1" }
                ],
                "analyses": [{ "name": "Calc", "outputs": ["A1"] }]
            }]
        }]
    }]
}"#;

fn tagscout_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_tagscout"))
}

fn run_cli(home: &Path, args: &[&str]) -> Output {
    let mut cmd = Command::new(tagscout_bin());
    cmd.args(args)
        .current_dir(home)
        .env("TAGSCOUT_HOME", home.join(".tagscout"))
        .env_remove("TAGSCOUT_SERVER")
        .env_remove("TAGSCOUT_DATABASE")
        .env_remove("TAGSCOUT_CATALOG")
        .env_remove("RUST_LOG");
    cmd.output().expect("failed to execute tagscout CLI")
}

fn setup() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("catalog.json"), CATALOG).unwrap();
    fs::write(temp.path().join("tags.txt"), "Tag1\ntag1\nTag2\n").unwrap();
    temp
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "command failed\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn search_writes_report() {
    let temp = setup();
    let output = run_cli(
        temp.path(),
        &["--input", "tags.txt", "--catalog", "catalog.json", "--database", "Plant"],
    );
    assert_success(&output);

    let lines = read_lines(&temp.path().join("Output.txt"));
    assert_eq!(lines[0], REPORT_HEADER);
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[1],
        "Tag1, A1, \\\\AF01\\Plant\\Root|A1, Calc, AF01, Plant, PI01"
    );
    assert!(!temp.path().join("Errors.txt").exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("AF Database"));
    assert!(stdout.contains("Matches"));
}

#[test]
fn unknown_database_fails_with_header_only() {
    let temp = setup();
    let output = run_cli(
        temp.path(),
        &["--input", "tags.txt", "--catalog", "catalog.json", "--database", "Missing"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(read_lines(&temp.path().join("Output.txt")), vec![REPORT_HEADER.to_string()]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Missing"), "stderr:\n{}", stderr);
}

#[test]
fn legacy_switches_are_accepted() {
    let temp = setup();
    let output = run_cli(
        temp.path(),
        &[
            "/AF", "AF01", "/DB", "Plant", "/IF", "tags.txt", "/OF", "report.txt", "/EF",
            "faults.txt", "/WE", "/WC", "/ZZ", "--catalog", "catalog.json",
        ],
    );
    assert_success(&output);

    assert_eq!(read_lines(&temp.path().join("report.txt")).len(), 3);
    assert_eq!(
        read_lines(&temp.path().join("faults.txt")),
        vec![
            ERROR_HEADER.to_string(),
            "PIPointInvalidException, Broken, \\\\AF01\\Plant\\Root|Broken, Plant".to_string(),
        ]
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("/ZZ"), "stderr:\n{}", stderr);
}

#[test]
fn missing_watch_list_is_setup_failure() {
    let temp = setup();
    let output = run_cli(temp.path(), &["--catalog", "catalog.json"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!temp.path().join("Output.txt").exists());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No input tag list file"));
}

#[test]
fn unknown_server_is_setup_failure() {
    let temp = setup();
    let output = run_cli(
        temp.path(),
        &["--input", "tags.txt", "--catalog", "catalog.json", "--server", "AF99"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(!temp.path().join("Output.txt").exists());
}

#[test]
fn config_file_supplies_parameters() {
    let temp = setup();
    fs::write(
        temp.path().join("tagscout.toml"),
        "catalog = \"catalog.json\"\nwatch_list = \"tags.txt\"\noutput_file = \"cfg.txt\"\n",
    )
    .unwrap();

    let output = run_cli(temp.path(), &["--config", "tagscout.toml"]);
    assert_success(&output);
    assert_eq!(read_lines(&temp.path().join("cfg.txt")).len(), 3);
}

#[test]
fn windows_encoded_watch_list_still_matches() {
    let temp = setup();
    // BOM, then a Latin-1 degree sign that is not valid UTF-8
    fs::write(temp.path().join("tags.txt"), b"\xef\xbb\xbfTag1\r\nTemp\xb0C\r\n").unwrap();

    let output = run_cli(
        temp.path(),
        &["--input", "tags.txt", "--catalog", "catalog.json"],
    );
    assert_success(&output);

    let lines = read_lines(&temp.path().join("Output.txt"));
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("Tag1, A1, "));
}
