//! Init command.

use tracing::info;

use crate::cli::{output, Context};
use crate::core::config::Document;
use crate::error::{ConfigError, Result};

/// Create an empty document at the configured location.
pub fn execute(ctx: &Context) -> Result<()> {
    let path = ctx.location.create_path();
    if path.exists() {
        return Err(ConfigError::AlreadyExists(path).into());
    }

    Document::new().save(&path)?;
    info!(path = %path.display(), "document created");

    output::success(&format!("created {}", output::path(&path.display().to_string())));
    output::hint("next: securedata set NAME VALUE");
    Ok(())
}
