//! Error types.
//!
//! Errors are grouped by concern and wrapped by the top-level [`Error`].

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    SecureData(#[from] SecureDataError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the secure data state machine.
///
/// None of these leave a field half-updated: a failing operation keeps
/// the field exactly as it was before the call.
#[derive(Error, Debug)]
pub enum SecureDataError {
    #[error("failed to decode {field}: {source}")]
    Decode {
        field: &'static str,
        #[source]
        source: hex::FromHexError,
    },

    #[error("invalid cipher suite: {0:?}")]
    InvalidCipherSuite(String),

    #[error("failed to derive encryption key")]
    KeyDerivation,

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("authentication failed: data was tampered with or the master key is wrong")]
    Authentication,

    #[error("cannot overwrite encrypted data, decrypt it first")]
    AlreadyEncrypted,

    #[error("nonce is not set, cannot decrypt")]
    MissingNonce,
}

/// Configuration discovery and document errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found (searched: {searched})")]
    NotFound { searched: String },

    #[error("config file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("failed to serialize document: {0}")]
    Serialize(String),

    #[error("unsupported config format: {0:?} (expected toml or json)")]
    UnsupportedFormat(String),

    #[error("field not found: {0}")]
    FieldNotFound(String),

    #[error("field already exists: {0} (use --force to overwrite)")]
    FieldExists(String),

    #[error("master key required")]
    MasterKeyRequired,
}

/// Input validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("field name cannot be empty")]
    EmptyName,

    #[error("invalid field name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },
}

/// Logging bootstrap errors.
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("failed to open log target {}: {source}", .path.display())]
    OpenTarget {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

pub type Result<T> = std::result::Result<T, Error>;
