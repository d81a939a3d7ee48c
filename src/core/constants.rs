//! Constants used throughout securedata.
//!
//! Centralizes magic strings and configuration values.

/// Application name, used for the config directory.
pub const APP_NAME: &str = "securedata";

/// Default document file name.
pub const CONFIG_FILE: &str = "securedata.toml";

/// System-wide config directory searched last.
pub const SYSTEM_CONFIG_DIR: &str = "/etc/securedata";

/// Environment variable holding the hex master key.
pub const MASTER_KEY_ENV: &str = "SECUREDATA_MASTER_KEY";

/// Environment variable overriding the log filter directive.
pub const LOG_ENV: &str = "SECUREDATA_LOG";

/// Length in bytes of master keys produced by `keygen`.
pub const MASTER_KEY_LEN: usize = 32;
