//! Integration tests for ebpack-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::fs::File;
use std::path::Path;
use tempfile::TempDir;

fn ebpack_cmd() -> Command {
    cargo_bin_cmd!("ebpack")
}

fn entry_names(archive: &Path) -> Vec<String> {
    let file = File::open(archive).expect("archive should exist");
    let archive = zip::ZipArchive::new(file).expect("archive should be valid");
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    names
}

/// Lays out a typical `server/` tree inside `root`.
fn sample_server(root: &Path) {
    let server = root.join("server");
    fs::create_dir_all(server.join("routes")).unwrap();
    fs::create_dir_all(server.join("node_modules/express")).unwrap();
    fs::create_dir_all(server.join(".platform/nginx")).unwrap();
    fs::write(server.join("server.js"), "require('./routes/api')").unwrap();
    fs::write(server.join("routes/api.js"), "module.exports = {}").unwrap();
    fs::write(server.join("node_modules/express/index.js"), "x").unwrap();
    fs::write(server.join(".platform/nginx/nginx.conf"), "events {}").unwrap();
    fs::write(server.join(".env"), "SECRET=1").unwrap();
    fs::write(server.join("previous.zip"), "PK").unwrap();
}

#[test]
fn test_version_flag() {
    ebpack_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ebpack"));
}

#[test]
fn test_help_flag() {
    ebpack_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Command-line utility"))
        .stdout(predicate::str::contains("--source"));
}

#[test]
fn test_defaults_in_working_directory() {
    let temp = TempDir::new().expect("failed to create temp dir");
    sample_server(temp.path());

    ebpack_cmd()
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Created server-eb.zip with files at root",
        ));

    assert_eq!(
        entry_names(&temp.path().join("server-eb.zip")),
        vec![".platform/nginx/nginx.conf", "routes/api.js", "server.js"]
    );
}

#[test]
fn test_explicit_paths() {
    let temp = TempDir::new().expect("failed to create temp dir");
    sample_server(temp.path());
    let output = temp.path().join("dist.zip");

    ebpack_cmd()
        .arg("--source")
        .arg(temp.path().join("server"))
        .arg("--output")
        .arg(&output)
        .arg("-l")
        .arg("9")
        .assert()
        .success();

    assert_eq!(entry_names(&output).len(), 3);
}

#[test]
fn test_missing_source_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");

    ebpack_cmd()
        .current_dir(temp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"))
        .stderr(predicate::str::contains("HINT"));

    assert!(!temp.path().join("server-eb.zip").exists());
}

#[test]
fn test_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    sample_server(temp.path());

    let output = ebpack_cmd()
        .current_dir(temp.path())
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["status"], "success");
    assert_eq!(json["operation"], "pack");
    assert_eq!(json["data"]["files_added"], 3);
    assert_eq!(json["data"]["files_skipped"], 2);
    assert_eq!(json["data"]["directories_pruned"], 1);
    assert!(json["data"]["bytes_compressed"].as_u64().unwrap() > 0);
}

#[test]
fn test_json_error_output() {
    let temp = TempDir::new().expect("failed to create temp dir");

    let output = ebpack_cmd()
        .current_dir(temp.path())
        .arg("--json")
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["status"], "error");
    assert_eq!(json["code"], "NOT_FOUND");
}

#[test]
fn test_quiet_prints_nothing_on_success() {
    let temp = TempDir::new().expect("failed to create temp dir");
    sample_server(temp.path());

    ebpack_cmd()
        .current_dir(temp.path())
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(temp.path().join("server-eb.zip").exists());
}

#[test]
fn test_verbose_lists_entries() {
    let temp = TempDir::new().expect("failed to create temp dir");
    sample_server(temp.path());

    ebpack_cmd()
        .current_dir(temp.path())
        .env_remove("RUST_LOG")
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains("+ routes/api.js"));
}

#[test]
fn test_invalid_compression_level_rejected() {
    ebpack_cmd()
        .arg("--compression-level")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("compression-level"));
}

#[test]
fn test_completion_bash() {
    ebpack_cmd()
        .arg("completion")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("ebpack"));
}
