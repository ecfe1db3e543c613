//! End-to-end tests for the mra CLI.
//!
//! Tests invoke the `mra` binary as a subprocess against a temporary
//! archive and verify files and summary output.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

fn mra() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mra"))
}

fn write_topics(dir: &Path) -> std::path::PathBuf {
    let topics = dir.join("topics.json");
    std::fs::write(
        &topics,
        r#"[
  { "title": "Local LLM Optimization", "source_url": "https://example.com/llm" },
  { "title": "Kubernetes Cost Tuning" }
]"#,
    )
    .unwrap();
    topics
}

fn run_batch(dir: &Path, topics: &Path) -> serde_json::Value {
    let output = mra()
        .args([
            "run",
            "--archive-root",
            dir.join("archive").to_str().unwrap(),
            "--topics",
            topics.to_str().unwrap(),
            "--date",
            "2025-01-01",
            "--state-dir",
            dir.join("state").to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn e2e_run_writes_reports_and_views() {
    let dir = TempDir::new().unwrap();
    let topics = write_topics(dir.path());

    let summary = run_batch(dir.path(), &topics);
    assert_eq!(summary["generated"], 2);
    assert_eq!(summary["failed"], 0);

    let archive = dir.path().join("archive");
    assert!(archive.join("reports").join("llm").exists());
    assert!(archive.join("reports").join("cloud-devops").exists());

    let nav = std::fs::read_to_string(archive.join("NAVIGATION.md")).unwrap();
    assert!(nav.contains("<!-- NAV:START"));
    assert!(nav.contains("Local LLM Optimization"));
    assert!(nav.contains("Kubernetes Cost Tuning"));

    let readme = std::fs::read_to_string(archive.join("README.md")).unwrap();
    assert!(readme.contains("<!-- DATE -->2025-01-01<!-- /DATE -->"));
    assert!(readme.contains("Local LLM Optimization"));
}

#[test]
fn e2e_rerun_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let topics = write_topics(dir.path());

    let first = run_batch(dir.path(), &topics);
    assert_eq!(first["generated"], 2);

    let second = run_batch(dir.path(), &topics);
    assert_eq!(second["generated"], 0);
    assert_eq!(second["skipped"], 2);
}

#[test]
fn e2e_nav_and_digest_scaffold_an_empty_archive() {
    let dir = TempDir::new().unwrap();
    let archive = dir.path().join("archive");

    let output = mra()
        .args(["nav", "--archive-root", archive.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let output = mra()
        .args([
            "digest",
            "--archive-root",
            archive.to_str().unwrap(),
            "--date",
            "2099-12-31",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let nav = std::fs::read_to_string(archive.join("NAVIGATION.md")).unwrap();
    assert!(nav.contains("<!-- NAV:START"));
    let readme = std::fs::read_to_string(archive.join("README.md")).unwrap();
    assert!(readme.contains("<!-- DATE -->2099-12-31<!-- /DATE -->"));
    assert!(readme.contains("No data yet"));
}

#[test]
fn e2e_run_rejects_missing_topics_file() {
    let dir = TempDir::new().unwrap();
    let output = mra()
        .args([
            "run",
            "--archive-root",
            dir.path().join("archive").to_str().unwrap(),
            "--topics",
            dir.path().join("missing.json").to_str().unwrap(),
            "--state-dir",
            dir.path().join("state").to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
}
