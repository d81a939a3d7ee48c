//! Config file discovery.
//!
//! A [`ConfigLocation`] is built from a file argument and a list of search
//! paths. A file with a directory part (`./app.toml`, `/etc/app/app.toml`)
//! is used as-is. A bare file name is looked up in each search path in order.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Serialization format of a document, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    #[default]
    Toml,
    Json,
}

impl ConfigFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }

    /// Parse an extension without the leading dot.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnsupportedFormat` for anything but `toml` or `json`.
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat(ext.to_string()).into()),
        }
    }

    /// Format of `path`, defaulting to TOML when it has no extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension() {
            Some(ext) => Self::from_extension(&ext.to_string_lossy()),
            None => Ok(Self::default()),
        }
    }
}

/// Where a document lives, or where to look for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    filename: String,
    dir: String,
    search_paths: Vec<String>,
}

impl ConfigLocation {
    /// Build a location from a file argument and search paths.
    ///
    /// Search paths containing `..` are dropped and the rest are cleaned
    /// lexically. The directory part of `file`, if any, is cleaned too.
    pub fn new<I, S>(file: &str, search_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let search_paths = search_paths
            .into_iter()
            .filter(|p| !p.as_ref().contains(".."))
            .map(|p| clean(p.as_ref()))
            .collect();

        let (dir, filename) = match file.rfind('/') {
            Some(idx) => (clean(&file[..=idx]), file[idx + 1..].to_string()),
            None => (String::new(), file.to_string()),
        };

        Self {
            filename,
            dir,
            search_paths,
        }
    }

    /// Location with the default file name and search paths.
    pub fn with_defaults(file: Option<&str>, search_paths: &[String]) -> Self {
        let file = file.unwrap_or(constants::CONFIG_FILE);
        if search_paths.is_empty() {
            Self::new(file, default_search_paths())
        } else {
            Self::new(file, search_paths)
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Cleaned directory part of the file argument, empty for a bare name.
    pub fn dir(&self) -> &str {
        &self.dir
    }

    pub fn search_paths(&self) -> &[String] {
        &self.search_paths
    }

    /// Split the file name into its stem and extension. The extension
    /// defaults to `toml` when the name has none.
    pub fn name_and_extension(&self) -> (&str, &str) {
        match self.filename.rfind('.') {
            Some(idx) => (&self.filename[..idx], &self.filename[idx + 1..]),
            None => (&self.filename, ConfigFormat::default().extension()),
        }
    }

    pub fn format(&self) -> Result<ConfigFormat> {
        ConfigFormat::from_extension(self.name_and_extension().1)
    }

    /// Every path `resolve` would try, in order.
    pub fn candidates(&self) -> Vec<PathBuf> {
        if !self.dir.is_empty() {
            return vec![Path::new(&self.dir).join(&self.filename)];
        }

        let file = self.file_with_extension();
        self.search_paths
            .iter()
            .map(|p| PathBuf::from(expand_env(p)).join(&file))
            .collect()
    }

    /// Find the document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` listing every candidate when none
    /// exists.
    pub fn resolve(&self) -> Result<PathBuf> {
        let candidates = self.candidates();
        for path in &candidates {
            debug!(path = %path.display(), "checking config path");
            if path.is_file() {
                debug!(path = %path.display(), "using config file");
                return Ok(path.clone());
            }
        }

        let searched = candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(ConfigError::NotFound { searched }.into())
    }

    /// Path where a new document is created: the explicit path, or the
    /// first search path.
    pub fn create_path(&self) -> PathBuf {
        self.candidates()
            .into_iter()
            .next()
            .unwrap_or_else(|| PathBuf::from(self.file_with_extension()))
    }

    fn file_with_extension(&self) -> String {
        if self.filename.contains('.') {
            self.filename.clone()
        } else {
            format!(
                "{}.{}",
                self.filename,
                ConfigFormat::default().extension()
            )
        }
    }
}

/// `.`, the user config directory, then the system directory.
pub fn default_search_paths() -> Vec<String> {
    let mut paths = vec![".".to_string()];
    if let Some(dir) = dirs::config_dir() {
        paths.push(
            dir.join(constants::APP_NAME)
                .to_string_lossy()
                .into_owned(),
        );
    }
    paths.push(constants::SYSTEM_CONFIG_DIR.to_string());
    paths
}

/// Lexically clean a slash-separated path: collapse repeated separators,
/// drop `.` segments and resolve `..` against preceding segments.
/// An empty result becomes `.`.
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|p| *p != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            s => parts.push(s),
        }
    }

    let joined = parts.join("/");
    if rooted {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Expand `$VAR` and `${VAR}` from the environment. Unset variables expand
/// to nothing, except `HOME` which falls back to the platform home directory.
fn expand_env(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut chars = path.char_indices().peekable();

    while let Some((_, ch)) = chars.next() {
        if ch != '$' {
            out.push(ch);
            continue;
        }

        let mut name = String::new();
        if chars.peek().map(|(_, c)| *c) == Some('{') {
            chars.next();
            for (_, c) in chars.by_ref() {
                if c == '}' {
                    break;
                }
                name.push(c);
            }
        } else {
            while let Some((_, c)) = chars.peek() {
                if c.is_ascii_alphanumeric() || *c == '_' {
                    name.push(*c);
                    chars.next();
                } else {
                    break;
                }
            }
        }

        if name.is_empty() {
            out.push('$');
            continue;
        }
        out.push_str(&lookup_env(&name));
    }

    out
}

fn lookup_env(name: &str) -> String {
    match std::env::var(name) {
        Ok(value) => value,
        Err(_) if name == "HOME" => dirs::home_dir()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}
