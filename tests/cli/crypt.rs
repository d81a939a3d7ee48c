//! Tests for encrypt and decrypt.

use crate::support::*;

#[test]
fn test_encrypt_all_then_decrypt_all() {
    let t = Test::with_fields(STANDARD_FIELDS);

    let output = t.encrypt(&[]);
    assert_success(&output);
    assert_stdout_contains(&output, "encrypted 3 fields");

    let doc = t.doc();
    for (name, value) in STANDARD_FIELDS {
        assert_eq!(t.state_of(name), "encrypted");
        assert!(!doc.contains(&hex_of(value)), "plaintext of {} leaked", name);
    }

    let output = t.decrypt(&[]);
    assert_success(&output);
    assert_stdout_contains(&output, "decrypted 3 fields");

    let doc = t.doc();
    for (name, value) in STANDARD_FIELDS {
        assert_eq!(t.state_of(name), "plaintext");
        assert!(doc.contains(&hex_of(value)));
    }
    assert!(doc.contains("nonce = \"\""));
}

#[test]
fn test_encrypt_named_field_only() {
    let t = Test::with_fields(&[("a", "1"), ("b", "2")]);

    assert_success(&t.encrypt(&["a"]));
    assert_eq!(t.state_of("a"), "encrypted");
    assert_eq!(t.state_of("b"), "plaintext");
}

#[test]
fn test_get_decrypts_in_memory_only() {
    let t = Test::with_fields(&[("db_password", "hunter2")]);
    assert_success(&t.encrypt(&[]));
    let before = t.doc();

    let output = t.get("db_password");
    assert_success(&output);
    assert_eq!(stdout(&output).trim_end(), "hunter2");

    assert_eq!(t.doc(), before);
}

#[test]
fn test_set_on_encrypted_field_fails() {
    let t = Test::with_fields(&[("locked", "v1")]);
    assert_success(&t.encrypt(&[]));
    let before = t.doc();

    let output = t
        .cmd()
        .args(["set", "locked", "v2", "--force"])
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "decrypt it first");
    assert_eq!(t.doc(), before);
}

#[test]
fn test_encrypt_already_encrypted_named_field_fails() {
    let t = Test::with_fields(&[("once", "v")]);
    assert_success(&t.encrypt(&[]));

    let output = t.encrypt(&["once"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "decrypt it first");
}

#[test]
fn test_wrong_key_fails_and_leaves_document() {
    let t = Test::with_fields(&[("secret", "value")]);
    assert_success(&t.encrypt(&[]));
    let before = t.doc();

    let output = t
        .cmd_with_key(OTHER_KEY)
        .arg("decrypt")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "authentication failed");
    assert_eq!(t.doc(), before);
}

#[test]
fn test_master_key_flag() {
    let t = Test::with_fields(&[("f", "v")]);

    let output = t
        .cmd()
        .args(["--master-key", MASTER_KEY, "encrypt"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(t.state_of("f"), "encrypted");
}

#[test]
fn test_missing_master_key() {
    let t = Test::with_fields(&[("f", "v")]);

    let output = t.cmd().arg("encrypt").output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "master key required");
    assert_stderr_contains(&output, "SECUREDATA_MASTER_KEY");
    assert_eq!(t.state_of("f"), "plaintext");
}

#[test]
fn test_malformed_master_key() {
    let t = Test::with_fields(&[("f", "v")]);

    let output = t.cmd_with_key("not-hex").arg("encrypt").output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to decode master key");
}

#[test]
fn test_nothing_to_encrypt() {
    let t = Test::init();

    let output = t.cmd().arg("encrypt").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "no fields to be encrypted");
}

#[test]
fn test_unknown_suite_in_document() {
    let t = Test::new();
    std::fs::write(t.doc_path(), ROT13_DOCUMENT).unwrap();

    let output = t.encrypt(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid cipher suite");
    assert_stderr_contains(&output, "AES-256-GCM");
    assert_eq!(t.doc(), ROT13_DOCUMENT);
}

#[test]
fn test_reencrypt_rotates_nonce() {
    let t = Test::with_fields(&[("f", "v")]);

    assert_success(&t.encrypt(&[]));
    let first = nonce_line(&t.doc());
    assert_success(&t.decrypt(&[]));
    assert_success(&t.encrypt(&[]));
    let second = nonce_line(&t.doc());

    assert_ne!(first, second);
}

fn hex_of(value: &str) -> String {
    value.bytes().map(|b| format!("{:02x}", b)).collect()
}

fn nonce_line(doc: &str) -> String {
    doc.lines()
        .find(|l| l.starts_with("nonce"))
        .expect("no nonce line")
        .to_string()
}

#[test]
fn test_repeated_names_are_transformed_once() {
    let t = Test::with_fields(&[("a", "1")]);

    let output = t.encrypt(&["a", "a"]);
    assert_success(&output);
    assert_stdout_contains(&output, "encrypted 1 field");
    assert_eq!(t.state_of("a"), "encrypted");

    let output = t.decrypt(&["a", "a"]);
    assert_success(&output);
    assert_stdout_contains(&output, "decrypted 1 field");
    assert_eq!(t.state_of("a"), "plaintext");
}
