//! Logging bootstrap.
//!
//! The CLI flags are collected into a [`LogConfig`] value in `main` and
//! turned into a subscriber here. Nothing in the library reads or mutates a
//! process-wide logging default; only the binary installs the subscriber it
//! was handed.

use std::convert::Infallible;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

use clap::ValueEnum;
use tracing::Subscriber;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer, Registry};

use crate::core::constants;
use crate::error::{LoggingError, Result};

/// Minimum level that is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    #[default]
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

/// Output encoding of log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    Text,
    #[default]
    Json,
}

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogTarget {
    /// Standard error.
    #[default]
    Console,
    /// A file opened in append mode, created if missing.
    File(PathBuf),
}

impl FromStr for LogTarget {
    type Err = Infallible;

    /// `console` (any case) selects stderr, anything else is a file path.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("console") {
            Ok(Self::Console)
        } else {
            Ok(Self::File(PathBuf::from(s)))
        }
    }
}

impl LogTarget {
    fn open(&self) -> Result<BoxMakeWriter> {
        match self {
            Self::Console => Ok(BoxMakeWriter::new(std::io::stderr)),
            Self::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| LoggingError::OpenTarget {
                        path: path.clone(),
                        source,
                    })?;
                Ok(BoxMakeWriter::new(Mutex::new(file)))
            }
        }
    }
}

/// Logging settings, built once at startup and passed down explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogConfig {
    /// Logging is off unless enabled.
    pub enabled: bool,
    pub level: LogLevel,
    pub format: LogFormat,
    pub target: LogTarget,
}

impl LogConfig {
    /// Filter directive derived from the settings.
    pub fn directive(&self) -> String {
        if self.enabled {
            format!("{}={}", constants::APP_NAME, self.level.as_str())
        } else {
            "off".to_string()
        }
    }

    /// Logging was enabled by flag or by the `SECUREDATA_LOG` override.
    pub fn is_active(&self) -> bool {
        self.enabled || std::env::var_os(constants::LOG_ENV).is_some()
    }

    /// Filter from `SECUREDATA_LOG` when set, otherwise from the settings.
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| EnvFilter::new(self.directive()))
    }

    /// Build a subscriber without installing it.
    ///
    /// At debug level, events also record their source file and line.
    ///
    /// # Errors
    ///
    /// Returns `LoggingError::OpenTarget` if a file target cannot be opened.
    pub fn subscriber(&self) -> Result<impl Subscriber + Send + Sync + 'static> {
        let source = self.level == LogLevel::Debug;
        // The target is only touched when something can be written to it.
        let writer = if self.is_active() {
            self.target.open()?
        } else {
            BoxMakeWriter::new(std::io::sink)
        };
        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(self.target == LogTarget::Console)
            .with_target(false)
            .with_file(source)
            .with_line_number(source);

        let layer: Box<dyn Layer<Registry> + Send + Sync> = match self.format {
            LogFormat::Json => layer.json().with_filter(self.filter()).boxed(),
            LogFormat::Text => layer.with_filter(self.filter()).boxed(),
        };

        Ok(tracing_subscriber::registry().with(layer))
    }

    /// Build the subscriber and install it as the global default.
    pub fn init(&self) -> Result<()> {
        tracing::subscriber::set_global_default(self.subscriber()?)
            .map_err(|e| LoggingError::Install(e.to_string()))?;
        Ok(())
    }
}
