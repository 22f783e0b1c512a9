// listguard/tests/cli_integration_tests.rs
//! End-to-end tests for the `listguard` binary.
//!
//! Each test spawns the binary with `assert_cmd`, feeds the listing through
//! stdin (or a temp file) and checks stdout, stderr and the exit status.
//! Output is piped, so no color codes are expected, but stderr is still run
//! through `strip_ansi_escapes` before comparing.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};
use test_log::test;

fn listguard() -> Command {
    let mut cmd = Command::cargo_bin("listguard").unwrap();
    cmd.env_remove("LISTGUARD_CONFIG");
    cmd.env_remove("LISTGUARD_THEME");
    cmd.env("RUST_LOG", "warn");
    cmd
}

fn run(input: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    listguard().args(args).write_stdin(input.as_bytes()).assert()
}

fn strip_ansi(bytes: &[u8]) -> String {
    String::from_utf8_lossy(&strip_ansi_escapes::strip(bytes)).to_string()
}

fn rules_file(yaml: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml.as_bytes())?;
    Ok(file)
}

#[test]
fn test_sanitize_from_stdin() {
    run("RARE Rolex, ACT NOW, guaranteed authentic!!", &["sanitize", "--no-summary"])
        .success()
        .stdout("Rare Rolex, inquire today, verified authentic!!\n");
}

#[test]
fn test_sanitize_keeps_single_trailing_newline() {
    run("act now\n", &["sanitize", "--no-summary"])
        .success()
        .stdout("inquire today\n");
}

#[test]
fn test_sanitize_prints_summary_on_stderr() {
    let output = run("Hurry, act now!", &["sanitize"]).success().get_output().clone();
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "hurry, inquire today!\n");
    let stderr = strip_ansi(&output.stderr);
    assert!(stderr.contains("Rewrite summary:"), "stderr was: {}", stderr);
    assert!(stderr.contains("act now -> inquire today"));
}

#[test]
fn test_quiet_suppresses_summary() {
    run("act now", &["-q", "sanitize"])
        .success()
        .stdout("inquire today\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_sanitize_collapses_emoji_and_shouting() {
    run("🔥🔥🔥🔥🔥 NEW CAR, NEW SET, LOW KMS", &["sanitize", "--no-summary"])
        .success()
        .stdout("🔥🔥🔥 new car, new set, low kms\n");
}

#[test]
fn test_sanitize_rejects_invalid_utf8() {
    listguard()
        .arg("sanitize")
        .write_stdin(vec![0x41u8, 0xff, 0xfe, 0x42])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("not valid UTF-8"));
}

#[test]
fn test_sanitize_input_and_output_files() -> Result<()> {
    let dir = TempDir::new()?;
    let input_path = dir.path().join("listing.txt");
    let output_path = dir.path().join("clean.txt");
    fs::write(&input_path, "Limited time: MINT bike")?;

    listguard()
        .args(["sanitize", "--no-summary", "-i"])
        .arg(&input_path)
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(fs::read_to_string(&output_path)?, "while supplies last: Mint bike\n");
    Ok(())
}

#[test]
fn test_sanitize_missing_input_file_fails() {
    listguard()
        .args(["sanitize", "-i", "/definitely/not/here/listing.txt"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read input file"));
}

#[test]
fn test_sanitize_diff() {
    let output = run("Clean title\nACT NOW\n", &["sanitize", "--diff", "--no-summary"])
        .success()
        .get_output()
        .clone();
    let stdout = strip_ansi(&output.stdout);
    assert!(stdout.contains("  Clean title\n"), "stdout was: {}", stdout);
    assert!(stdout.contains("- ACT NOW\n"));
    assert!(stdout.contains("+ inquire today\n"));
}

#[test]
fn test_sanitize_with_custom_config() -> Result<()> {
    let config = rules_file(
        r#"
patterns:
  - name: lowball
    category: promotional
    pattern: "\\bprice is firm\\b"
    case_insensitive: true
replacements:
  hurry: "take your time"
  price is firm: "price reflects market value"
"#,
    )?;
    listguard()
        .args(["sanitize", "--no-summary", "--config"])
        .arg(config.path())
        .write_stdin("Hurry, Price is firm")
        .assert()
        .success()
        .stdout("take your time, price reflects market value\n");
    Ok(())
}

#[test]
fn test_config_from_environment() -> Result<()> {
    let config = rules_file("replacements:\n  act now: \"message me\"\n")?;
    listguard()
        .env("LISTGUARD_CONFIG", config.path())
        .args(["sanitize", "--no-summary"])
        .write_stdin("act now")
        .assert()
        .success()
        .stdout("message me\n");
    Ok(())
}

#[test]
fn test_invalid_config_fails() -> Result<()> {
    let config = rules_file("patterns:\n  - name: broken\n    category: urgency\n    pattern: \"(hurry\"\n")?;
    listguard()
        .args(["sanitize", "--config"])
        .arg(config.path())
        .write_stdin("hurry")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid regex"));
    Ok(())
}

#[test]
fn test_disable_pattern() {
    run("MINT bike", &["sanitize", "--no-summary", "--disable", "shouting"])
        .success()
        .stdout("MINT bike\n");
}

#[test]
fn test_analyze_json_report() {
    let output = run("act now, buy now", &["analyze", "--json"])
        .success()
        .get_output()
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["compliant"], false);
    assert_eq!(json["riskScore"], 40);
    assert_eq!(json["issues"][0]["category"], "urgency");
    assert_eq!(json["issues"][1]["category"], "promotional");
}

#[test]
fn test_analyze_table_for_clean_text() {
    run("One owner, full service history", &["analyze"])
        .success()
        .stdout(predicate::str::contains("Risk score: 0/100"))
        .stdout(predicate::str::contains("No spam triggers found."));
}

#[test]
fn test_analyze_fail_over_risk() {
    run("act now, buy now", &["analyze", "--fail-over-risk", "20"]).code(1);
    run("act now, buy now", &["analyze", "--fail-over-risk", "40"]).success();
    run("One owner", &["analyze", "--fail-over-risk", "0"]).success();
}

#[test]
fn test_check_json_with_usage() {
    let output = run("ACT NOW", &["check", "--copies-last-hour", "55"])
        .success()
        .get_output()
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["original"], "ACT NOW");
    assert_eq!(json["sanitized"], "inquire today");
    assert_eq!(json["report"]["riskScore"], 20);
    assert_eq!(json["rateLimit"]["allowed"], false);
    assert_eq!(json["fingerprint"].as_str().map(str::len), Some(64));
    assert!(json["checkId"].is_string());
}

#[test]
fn test_check_json_without_usage() {
    let output = run("Clean title", &["check"]).success().get_output().clone();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["report"]["compliant"], true);
    assert!(json["rateLimit"].is_null());
}

#[test]
fn test_rules_lists_defaults() {
    listguard()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("urgency"))
        .stdout(predicate::str::contains("emoji_run"))
        .stdout(predicate::str::contains("inquire today"));
}

#[test]
fn test_profile_applied_from_path() -> Result<()> {
    let profile = rules_file(
        r#"
profile_name: relaxed
version: "1.0"
rules:
  - name: shouting
    enabled: false
"#,
    )?;
    listguard()
        .args(["sanitize", "--no-summary", "--profile"])
        .arg(profile.path())
        .write_stdin("MINT bike, act now")
        .assert()
        .success()
        .stdout("MINT bike, inquire today\n");
    Ok(())
}

#[test]
fn test_builtin_strict_profile_by_name() {
    run(
        "Last chance! Call me at 555-123-4567 or see https://example.com/item ok????",
        &["sanitize", "--no-summary", "--profile", "strict"],
    )
    .success()
    .stdout("opportunity! DM for details [DM for contact] or see [link removed for compliance] ok??\n");
}

#[test]
fn test_profiles_lists_builtin_strict() -> Result<()> {
    let home = TempDir::new()?;
    listguard()
        .env("HOME", home.path())
        .env_remove("XDG_CONFIG_HOME")
        .arg("profiles")
        .assert()
        .success()
        .stdout(predicate::str::contains("Strict marketplace rules"))
        .stdout(predicate::str::contains("(built-in)"));
    Ok(())
}

#[test]
fn test_uppercase_replacement_key_in_user_config() -> Result<()> {
    let config = rules_file("replacements:\n  RARE: \"Hard to find\"\n")?;
    listguard()
        .args(["sanitize", "--no-summary", "--config"])
        .arg(config.path())
        .write_stdin("RARE watch")
        .assert()
        .success()
        .stdout("Hard to find watch\n");
    Ok(())
}

#[test]
fn test_unknown_profile_fails() {
    run("text", &["sanitize", "--profile", "no-such-profile-for-listguard-tests"])
        .code(2)
        .stderr(predicate::str::contains("not found"));
}
