//! Documents holding named secure data fields.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::location::ConfigFormat;
use crate::core::secure::SecureData;
use crate::core::validation::validate_name;
use crate::error::{ConfigError, Result};

/// A configuration document with a table of named fields.
///
/// ```toml
/// [fields.db_password]
/// nonce = "9f2c..."
/// ciphersuite = "AES-256-GCM"
/// hexdata = "51a0..."
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub fields: BTreeMap<String, SecureData>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a document, picking the format from the file extension.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file cannot be read,
    /// `ConfigError::Parse` if it is malformed, and a validation error if a
    /// field name is invalid.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading document");

        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let parse_error = |reason: String| ConfigError::Parse {
            path: path.to_path_buf(),
            reason,
        };
        let document: Self = match format {
            ConfigFormat::Toml => toml::from_str(&contents).map_err(|e| parse_error(e.to_string()))?,
            ConfigFormat::Json => {
                serde_json::from_str(&contents).map_err(|e| parse_error(e.to_string()))?
            }
        };

        for name in document.fields.keys() {
            validate_name(name)?;
        }

        debug!(fields = document.fields.len(), "document loaded");
        Ok(document)
    }

    /// Write the document, picking the format from the file extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "saving document");

        let contents = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            ConfigFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(|source| ConfigError::WriteFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&SecureData> {
        self.fields
            .get(name)
            .ok_or_else(|| ConfigError::FieldNotFound(name.to_string()).into())
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut SecureData> {
        self.fields
            .get_mut(name)
            .ok_or_else(|| ConfigError::FieldNotFound(name.to_string()).into())
    }

    pub fn remove(&mut self, name: &str) -> Result<SecureData> {
        self.fields
            .remove(name)
            .ok_or_else(|| ConfigError::FieldNotFound(name.to_string()).into())
    }
}
