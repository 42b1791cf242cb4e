//! CLI smoke tests for RangeWarden.
//!
//! None of these reach the network: they exercise argument parsing, the
//! registry listing, and failures that happen before any fetch.

use std::path::PathBuf;
use std::process::Command;

/// Path to the compiled binary
fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_rangewarden"))
}

/// Run rangewarden and return output
fn run_rangewarden(args: &[&str]) -> std::process::Output {
    Command::new(get_binary_path())
        .args(args)
        .output()
        .expect("Failed to execute rangewarden")
}

#[test]
fn test_version_command() {
    let output = run_rangewarden(&["version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("rangewarden"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_command() {
    let output = run_rangewarden(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("update"));
    assert!(stdout.contains("check"));
    assert!(stdout.contains("sources"));
}

#[test]
fn test_update_help_mentions_override() {
    let output = run_rangewarden(&["update", "--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--allow-large-delta"));
    assert!(stdout.contains("--output"));
}

#[test]
fn test_sources_command_lists_registry() {
    let output = run_rangewarden(&["sources"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for id in [
        "openai_gptbot",
        "openai_oai_searchbot",
        "openai_chatgpt_user",
        "github_copilot",
    ] {
        assert!(stdout.contains(id), "missing {id} in: {stdout}");
    }
    assert!(stdout.contains("https://api.github.com/meta"));
}

#[test]
fn test_unknown_command_fails() {
    let output = run_rangewarden(&["install"]);
    assert!(!output.status.success());
}

#[test]
fn test_invalid_config_fails_before_fetching() {
    let dir = tempfile::TempDir::new().unwrap();
    let config = dir.path().join("config.yaml");
    std::fs::write(&config, "fetch:\n  timeout_secs: 0\n").unwrap();
    let out = dir.path().join("catalog.json");

    let output = run_rangewarden(&[
        "--config",
        config.to_str().unwrap(),
        "update",
        "--output",
        out.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("timeout_secs"), "stderr: {stderr}");
    assert!(!out.exists());
}
