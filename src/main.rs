//! securedata - encrypted data fields for configuration files.

use clap::Parser;

use securedata::cli::output;
use securedata::cli::{execute, Cli};
use securedata::error::{ConfigError, Error, SecureDataError};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.log_config().init() {
        output::error(&e.to_string());
        std::process::exit(1);
    }

    let ctx = cli.context();
    if let Err(e) = execute(cli.command, &ctx) {
        tracing::error!(error = %e, "command failed");

        let suggestion = match &e {
            Error::Config(ConfigError::NotFound { .. }) => Some("run: securedata init"),
            Error::Config(ConfigError::MasterKeyRequired) => {
                Some("set SECUREDATA_MASTER_KEY or pass --master-key")
            }
            Error::SecureData(SecureDataError::AlreadyEncrypted) => {
                Some("run: securedata decrypt NAME")
            }
            Error::SecureData(SecureDataError::Authentication) => {
                Some("check that the master key is the one used to encrypt")
            }
            Error::SecureData(SecureDataError::InvalidCipherSuite(_)) => {
                Some("supported: AES-256-GCM, CHACHA20-POLY1305")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
