//! Tests for the `streambind` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn streambind() -> Command {
    Command::cargo_bin("streambind").unwrap()
}

#[test]
fn test_dump_yaml_to_stdout() {
    streambind()
        .arg("dump")
        .arg(fixture_path("books.xml"))
        .args(["-e", "books", "-e", "book", "-e", "title"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("books:\n"))
        .stdout(predicate::str::contains("isbn: 978-3-16-148410-0"))
        .stdout(predicate::str::contains("value: przykladowy tytul 1"));
}

#[test]
fn test_dump_json_from_tree() {
    let output = streambind()
        .arg("dump")
        .arg(fixture_path("books.xml"))
        .args(["-e", "books", "-e", "book", "--format", "json", "--tree"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let books = value["books"]["values"]["book"].as_array().unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(books[0]["attributes"]["id"], "1");
    assert_eq!(books[0]["values"]["releasedate"], "2019-01-01");
}

#[test]
fn test_dump_to_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("books.yaml");

    streambind()
        .arg("dump")
        .arg(fixture_path("books.xml"))
        .args(["-e", "books", "-e", "publisher"])
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to:"));

    let yaml = fs::read_to_string(&out).unwrap();
    assert!(yaml.contains("yearofpublish: '1980'"));
}

#[test]
fn test_dump_without_handled_root_fails() {
    streambind()
        .arg("dump")
        .arg(fixture_path("books.xml"))
        .args(["-e", "magazine"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: Malformed document"));
}

#[test]
fn test_dump_rejects_invalid_element_name() {
    streambind()
        .arg("dump")
        .arg(fixture_path("books.xml"))
        .args(["-e", "1book"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid element name: '1book'"));
}

#[test]
fn test_dump_missing_file() {
    streambind()
        .arg("dump")
        .arg(fixture_path("missing.xml"))
        .args(["-e", "books"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: IO error"));
}

#[test]
fn test_scan() {
    streambind()
        .arg("scan")
        .arg(fixture_path("books.xml"))
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"book\s+2\n").unwrap())
        .stdout(predicate::str::is_match(r"title\s+3\n").unwrap())
        .stdout(predicate::str::contains("Max depth: 4"));
}
