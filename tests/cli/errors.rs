//! Tests for error handling and CLI flags.

use crate::support::*;

#[test]
fn test_help() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("securedata") || out.contains("Usage"));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_missing_document_suggests_init() {
    let t = Test::new();

    let output = t.set("k", "v");
    assert_failure(&output);
    assert_stderr_contains(&output, "config file not found");
    assert_stderr_contains(&output, "securedata init");
}

#[test]
fn test_malformed_document() {
    let t = Test::new();
    std::fs::write(t.doc_path(), "[fields\nbroken").unwrap();

    let output = t.cmd().arg("list").output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse");
}

#[test]
fn test_unsupported_config_extension() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--config", "./doc.yaml", "init"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "unsupported config format");
}

#[test]
fn test_unwritable_log_target() {
    let t = Test::init();
    let target = t.dir.path().join("no/such/dir/app.log");

    let output = t
        .cmd()
        .args(["--log", "--logtarget"])
        .arg(&target)
        .arg("list")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to open log target");
}
