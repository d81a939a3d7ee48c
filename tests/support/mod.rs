//! Test support utilities for securedata integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own temporary working dir and home dir. Child
/// processes use `.current_dir()` so tests can run in parallel.
pub struct Test {
    /// Working directory of the command; holds `securedata.toml`
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create a test environment with an empty document.
    pub fn init() -> Self {
        let t = Self::new();
        let output = t.init_cmd();
        assert!(
            output.status.success(),
            "Failed to initialize document: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    /// Create a test environment with plaintext fields set.
    pub fn with_fields(fields: &[(&str, &str)]) -> Self {
        let t = Self::init();
        for (name, value) in fields {
            let output = t.set(name, value);
            assert!(
                output.status.success(),
                "Failed to set field {}: {}",
                name,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        t
    }

    /// Path of the default document.
    pub fn doc_path(&self) -> PathBuf {
        self.dir.path().join("securedata.toml")
    }

    /// Raw contents of the default document.
    pub fn doc(&self) -> String {
        std::fs::read_to_string(self.doc_path()).expect("failed to read document")
    }
}
