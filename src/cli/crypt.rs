//! Encrypt and decrypt commands.
//!
//! Fields are transformed in memory and the document is saved once at the
//! end, so a failure on any field leaves the file untouched.

use std::collections::BTreeSet;

use tracing::info;

use crate::cli::{output, Context};
use crate::core::config::Document;
use crate::core::secure::SecureData;
use crate::error::{Result, SecureDataError};

type Transform = fn(&mut SecureData, &str) -> std::result::Result<(), SecureDataError>;

/// How a batch transform selects fields and obtains the key.
struct Batch {
    select: fn(&SecureData) -> bool,
    transform: Transform,
    verb: &'static str,
    /// Prompted keys are typed twice before ciphertext is written.
    confirm_key: bool,
}

/// Encrypt the named fields, or every field that is not encrypted yet.
pub fn encrypt(ctx: &Context, names: &[String]) -> Result<()> {
    let batch = Batch {
        select: |f| !f.is_encrypted(),
        transform: SecureData::encrypt,
        verb: "encrypted",
        confirm_key: true,
    };
    apply(ctx, names, &batch)
}

/// Decrypt the named fields, or every encrypted field.
pub fn decrypt(ctx: &Context, names: &[String]) -> Result<()> {
    let batch = Batch {
        select: SecureData::is_encrypted,
        transform: SecureData::decrypt,
        verb: "decrypted",
        confirm_key: false,
    };
    apply(ctx, names, &batch)
}

fn apply(ctx: &Context, names: &[String], batch: &Batch) -> Result<()> {
    let verb = batch.verb;
    let path = ctx.location.resolve()?;
    let mut document = Document::load(&path)?;

    let targets: Vec<String> = if names.is_empty() {
        document
            .fields
            .iter()
            .filter(|(_, field)| (batch.select)(field))
            .map(|(name, _)| name.clone())
            .collect()
    } else {
        names
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    };

    if targets.is_empty() {
        output::dimmed(&format!("no fields to be {}", verb));
        return Ok(());
    }

    let key = ctx.master_key(batch.confirm_key)?;
    for name in &targets {
        (batch.transform)(document.get_mut(name)?, &key)?;
        info!(field = %name, "field {}", verb);
    }

    document.save(&path)?;
    output::success(&format!(
        "{} {} field{}",
        verb,
        targets.len(),
        if targets.len() == 1 { "" } else { "s" }
    ));
    Ok(())
}
