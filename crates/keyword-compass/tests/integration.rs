use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

fn kwc_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("kwc");
    path
}

fn setup_coffee_fixture() -> (TempDir, PathBuf, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let export = root.join("keywords.tsv");
    fs::write(
        &export,
        "Keyword\tVolume\tDifficulty\tCPC\tIntents\n\
         best coffee grinder\t4400\t35\t1.2\tCommercial\n\
         coffee grinder review\t900\t28\t0.8\tCommercial\n\
         how to clean coffee grinder\t300\t15\t0.3\tInformational\n",
    )
    .unwrap();

    let config = root.join("kwc.toml");
    (tmp, export, config)
}

fn run_kwc(config: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = kwc_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run kwc binary at {:?}: {}", binary, e));

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

#[test]
fn test_analyze_text_output() {
    let (_tmp, export, config) = setup_coffee_fixture();
    let (stdout, stderr, ok) = run_kwc(&config, &["analyze", export.to_str().unwrap()]);

    assert!(ok, "analyze failed: {stderr}");
    assert!(stdout.contains("Keyword Compass"));
    assert!(stdout.contains("best coffee grinder"));
    assert!(stdout.contains("Topic clusters:"));
    assert!(stdout.contains("Content ideas:"));
    assert!(stdout.contains("Insights:"));
}

#[test]
fn test_analyze_json_matches_documented_scenario() {
    let (_tmp, export, config) = setup_coffee_fixture();
    let (stdout, stderr, ok) = run_kwc(
        &config,
        &["analyze", export.to_str().unwrap(), "--format", "json"],
    );
    assert!(ok, "analyze failed: {stderr}");

    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    let scored = report["scored"].as_array().unwrap();
    assert_eq!(scored.len(), 3);
    assert_eq!(scored[0]["opportunity"].as_f64().unwrap(), 63.5);
    assert_eq!(scored[1]["opportunity"].as_f64().unwrap(), 58.34);
    assert_eq!(scored[2]["opportunity"].as_f64().unwrap(), 56.61);

    // Batch of three: one degenerate cluster containing all members.
    let clusters = report["clusters"].as_array().unwrap();
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0]["keywords"].as_array().unwrap().len(), 3);

    // One idea, typed as a review by the ordered pattern checks.
    let ideas = report["ideas"].as_array().unwrap();
    assert_eq!(ideas.len(), 1);
    assert_eq!(ideas[0]["content_type"], "review");

    assert_eq!(report["summary"]["total"], 3);
}

#[test]
fn test_analyze_is_idempotent() {
    let (_tmp, export, config) = setup_coffee_fixture();
    let (first, _, ok1) = run_kwc(
        &config,
        &["analyze", export.to_str().unwrap(), "--format", "json"],
    );
    let (second, _, ok2) = run_kwc(
        &config,
        &["analyze", export.to_str().unwrap(), "--format", "json"],
    );
    assert!(ok1 && ok2);
    assert_eq!(first, second);
}

#[test]
fn test_similar_ranks_related_keywords() {
    let (_tmp, export, config) = setup_coffee_fixture();
    let (stdout, stderr, ok) = run_kwc(
        &config,
        &["similar", "coffee grinder", export.to_str().unwrap(), "--top", "2"],
    );
    assert!(ok, "similar failed: {stderr}");
    assert!(stdout.contains("coffee grinder review") || stdout.contains("best coffee grinder"));
}

#[test]
fn test_invalid_weights_config_fails_with_field_name() {
    let (_tmp, export, config) = setup_coffee_fixture();
    fs::write(
        &config,
        "[weights]\nvolume = 0.4\ndifficulty = 0.3\ncpc = 0.2\nintent = 0.0\n",
    )
    .unwrap();

    let (_, stderr, ok) = run_kwc(&config, &["analyze", export.to_str().unwrap()]);
    assert!(!ok, "analyze should fail on weights summing to 0.9");
    assert!(stderr.contains("weights"), "stderr was: {stderr}");
}

#[test]
fn test_unknown_format_rejected() {
    let (_tmp, export, config) = setup_coffee_fixture();
    let (_, stderr, ok) = run_kwc(
        &config,
        &["analyze", export.to_str().unwrap(), "--format", "yaml"],
    );
    assert!(!ok);
    assert!(stderr.contains("Unknown output format"));
}

#[test]
fn test_missing_export_file_fails() {
    let (_tmp, _export, config) = setup_coffee_fixture();
    let (_, stderr, ok) = run_kwc(&config, &["analyze", "does-not-exist.tsv"]);
    assert!(!ok);
    assert!(stderr.contains("Failed to read keyword export"));
}
