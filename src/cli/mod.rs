//! Command-line interface.

pub mod crypt;
pub mod field;
pub mod init;
pub mod keygen;
pub mod output;

use std::str::FromStr;

use clap::{Parser, Subcommand};
use zeroize::Zeroizing;

use crate::core::config::ConfigLocation;
use crate::core::constants;
use crate::core::secure::CipherSuite;
use crate::error::{ConfigError, Result};
use crate::logging::{LogConfig, LogFormat, LogLevel, LogTarget};

/// securedata - encrypted data fields for configuration files.
#[derive(Parser)]
#[command(
    name = "securedata",
    about = "Encrypted data fields for configuration files",
    version
)]
pub struct Cli {
    /// Enable logging
    #[arg(short = 'l', long = "log", global = true)]
    pub log: bool,

    /// Log level
    #[arg(long = "loglevel", value_enum, default_value_t = LogLevel::Error, global = true)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long = "logformat", value_enum, default_value_t = LogFormat::Json, global = true)]
    pub log_format: LogFormat,

    /// Log target: "console" or a file path
    #[arg(
        long = "logtarget",
        default_value = "console",
        value_parser = LogTarget::from_str,
        global = true
    )]
    pub log_target: LogTarget,

    /// Config file; a bare name is looked up in the search paths
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory to search for the config file (repeatable)
    #[arg(long = "search-path", global = true)]
    pub search_paths: Vec<String>,

    /// Master key as hex
    #[arg(long, env = constants::MASTER_KEY_ENV, hide_env_values = true, global = true)]
    pub master_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Logging settings selected by the global flags.
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            enabled: self.log,
            level: self.log_level,
            format: self.log_format,
            target: self.log_target.clone(),
        }
    }

    /// Execution context selected by the global flags.
    pub fn context(&self) -> Context {
        Context::new(
            ConfigLocation::with_defaults(self.config.as_deref(), &self.search_paths),
            self.master_key.clone(),
        )
    }
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create an empty document
    Init,

    /// Store a plaintext value in a field
    Set {
        /// Field name (e.g., db_password)
        name: String,
        /// Value; read from stdin when omitted
        value: Option<String>,
        /// Cipher suite: AES-256-GCM or CHACHA20-POLY1305
        #[arg(short, long, value_parser = CipherSuite::from_str)]
        suite: Option<CipherSuite>,
        /// Overwrite an existing plaintext field
        #[arg(short, long)]
        force: bool,
    },

    /// Print a field's plaintext, decrypting in memory if needed
    Get {
        /// Field name
        name: String,
        /// Print hex instead of text
        #[arg(long)]
        hex: bool,
    },

    /// List fields with their cipher suite and state
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a field
    Rm {
        /// Field name
        name: String,
    },

    /// Encrypt fields (all plaintext fields when none are named)
    Encrypt {
        /// Field names
        names: Vec<String>,
    },

    /// Decrypt fields (all encrypted fields when none are named)
    Decrypt {
        /// Field names
        names: Vec<String>,
    },

    /// Generate a random master key
    Keygen,
}

/// State shared by command handlers.
pub struct Context {
    pub location: ConfigLocation,
    master_key: Option<Zeroizing<String>>,
}

impl Context {
    pub fn new(location: ConfigLocation, master_key: Option<String>) -> Self {
        Self {
            location,
            master_key: master_key.map(|k| Zeroizing::new(k.trim().to_string())),
        }
    }

    /// The master key from the flag or environment, or an interactive
    /// prompt when attached to a terminal.
    ///
    /// With `confirm`, a prompted key has to be typed twice.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MasterKeyRequired` when no key was supplied and
    /// prompting is not possible.
    pub fn master_key(&self, confirm: bool) -> Result<Zeroizing<String>> {
        if let Some(key) = &self.master_key {
            return Ok(key.clone());
        }

        if !console::Term::stderr().is_term() {
            return Err(ConfigError::MasterKeyRequired.into());
        }

        let mut prompt = dialoguer::Password::new().with_prompt("Master key (hex)");
        if confirm {
            prompt = prompt.with_confirmation("Repeat master key", "keys do not match");
        }
        let key = prompt
            .interact()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
        Ok(Zeroizing::new(key.trim().to_string()))
    }
}

/// Execute a command.
pub fn execute(command: Command, ctx: &Context) -> Result<()> {
    use Command::*;

    match command {
        Init => init::execute(ctx),
        Set {
            name,
            value,
            suite,
            force,
        } => field::set(ctx, &name, value, suite, force),
        Get { name, hex } => field::get(ctx, &name, hex),
        List { json } => field::list(ctx, json),
        Rm { name } => field::rm(ctx, &name),
        Encrypt { names } => crypt::encrypt(ctx, &names),
        Decrypt { names } => crypt::decrypt(ctx, &names),
        Keygen => keygen::execute(),
    }
}
