//! Integration tests for the `get-papers-list` binary.
//!
//! Every run gets its own configuration file so the user's configuration is
//! never read. None of these tests reach the real PubMed service.

use std::{fs, path::PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

// Helper function to create a clean command instance
fn get_papers_list() -> Command { Command::cargo_bin("get-papers-list").unwrap() }

// Helper to write a configuration file into a fresh directory
fn temp_config(contents: &str) -> (TempDir, PathBuf) {
  let dir = tempdir().unwrap();
  let path = dir.path().join("config.toml");
  fs::write(&path, contents).unwrap();
  (dir, path)
}

#[test]
fn test_help() {
  get_papers_list()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::starts_with(
      "Fetch research papers from PubMed and filter non-academic authors.",
    ))
    .stdout(predicate::str::contains("--file"))
    .stdout(predicate::str::contains("--debug"));
}

#[test]
fn test_missing_query() {
  get_papers_list().assert().failure().stderr(predicate::str::contains("<QUERY>"));
}

#[test]
fn test_empty_query() {
  let (dir, config) = temp_config("");
  let output = dir.path().join("results.csv");

  get_papers_list()
    .arg("   ")
    .arg("--config")
    .arg(&config)
    .arg("--file")
    .arg(&output)
    .assert()
    .success()
    .stderr(predicate::str::contains("Query cannot be empty.").count(1))
    .stdout(predicate::str::contains("No research papers found."));

  assert!(!output.exists());
}

#[test]
fn test_unreachable_service() {
  let (dir, config) =
    temp_config("[entrez]\nbase_url = \"http://127.0.0.1:9\"\ntimeout_secs = 5\n");
  let output = dir.path().join("results.csv");

  get_papers_list()
    .args(["cancer", "-c"])
    .arg(&config)
    .arg("-f")
    .arg(&output)
    .assert()
    .success()
    .stderr(predicate::str::contains("PubMed could not be reached"))
    .stdout(predicate::str::contains("No research papers found."));

  assert!(!output.exists());
}

#[test]
fn test_missing_config_file() {
  let dir = tempdir().unwrap();

  get_papers_list()
    .arg("cancer")
    .arg("--config")
    .arg(dir.path().join("missing.toml"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_invalid_config_values() {
  let (_dir, config) = temp_config("[classifier]\nsplit_pattern = \"(\"\n");
  get_papers_list()
    .arg("cancer")
    .arg("--config")
    .arg(&config)
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load configuration"));

  let (_dir, config) = temp_config("");
  get_papers_list()
    .args(["cancer", "--max-results", "0", "--config"])
    .arg(&config)
    .assert()
    .failure()
    .stderr(predicate::str::contains("max_results must be at least 1"));
}

#[test]
fn test_invalid_policy() {
  get_papers_list()
    .args(["cancer", "--policy", "sometimes"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Unknown emission policy"));
}
