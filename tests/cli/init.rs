//! Tests for `securedata init` and config discovery.

use crate::support::*;

#[test]
fn test_init_creates_empty_document() {
    let t = Test::new();

    let output = t.init_cmd();
    assert_success(&output);
    assert_stdout_contains(&output, "securedata.toml");
    assert!(t.doc_path().exists());

    let output = t.cmd().arg("list").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "no fields stored");
}

#[test]
fn test_init_twice_fails() {
    let t = Test::init();

    let output = t.init_cmd();
    assert_failure(&output);
    assert_stderr_contains(&output, "already exists");
}

#[test]
fn test_explicit_json_config() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--config", "./vault.json", "init"])
        .output()
        .unwrap();
    assert_success(&output);

    let output = t
        .cmd()
        .args(["--config", "./vault.json", "set", "token", "abc"])
        .output()
        .unwrap();
    assert_success(&output);

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(t.dir.path().join("vault.json")).unwrap())
            .unwrap();
    assert_eq!(doc["fields"]["token"]["hexdata"], "616263");
    assert_eq!(doc["fields"]["token"]["nonce"], "");
}

#[test]
fn test_search_path_lookup() {
    let t = Test::new();
    let conf = t.home.path().join("conf");
    std::fs::create_dir(&conf).unwrap();
    let conf = conf.to_str().unwrap();

    let output = t
        .cmd()
        .args(["--search-path", conf, "init"])
        .output()
        .unwrap();
    assert_success(&output);
    assert!(t.home.path().join("conf/securedata.toml").exists());

    let output = t
        .cmd()
        .args(["--search-path", "/nonexistent", "--search-path", conf])
        .args(["set", "found", "yes"])
        .output()
        .unwrap();
    assert_success(&output);
}

#[test]
fn test_user_config_dir_is_searched() {
    let t = Test::new();
    let conf = t.home.path().join("securedata");
    std::fs::create_dir(&conf).unwrap();
    std::fs::write(conf.join("securedata.toml"), "[fields]\n").unwrap();

    let output = t.cmd().args(["set", "from_home", "1"]).output().unwrap();
    assert_success(&output);
    assert!(std::fs::read_to_string(conf.join("securedata.toml"))
        .unwrap()
        .contains("from_home"));
}
