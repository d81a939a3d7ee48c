//! Field commands: set, get, list, rm.

use std::io::Read;

use serde::Serialize;
use tracing::info;
use zeroize::Zeroizing;

use crate::cli::{output, Context};
use crate::core::config::Document;
use crate::core::secure::{CipherSuite, SecureData};
use crate::core::validation::validate_name;
use crate::error::{ConfigError, Result, SecureDataError};

/// Store a plaintext value in a field.
///
/// An encrypted field is never overwritten; it has to be decrypted first.
pub fn set(
    ctx: &Context,
    name: &str,
    value: Option<String>,
    suite: Option<CipherSuite>,
    force: bool,
) -> Result<()> {
    validate_name(name)?;

    let path = ctx.location.resolve()?;
    let mut document = Document::load(&path)?;

    if let Some(existing) = document.fields.get(name) {
        if existing.is_encrypted() {
            return Err(SecureDataError::AlreadyEncrypted.into());
        }
        if !force {
            return Err(ConfigError::FieldExists(name.to_string()).into());
        }
    }

    let data = match value {
        Some(value) => Zeroizing::new(value.into_bytes()),
        None => read_stdin()?,
    };

    let field = document
        .fields
        .entry(name.to_string())
        .or_insert_with(|| SecureData::new(suite.unwrap_or_default()));
    if let Some(suite) = suite {
        field.set_cipher_suite(suite)?;
    }
    field.set_plaintext(&data)?;

    document.save(&path)?;
    info!(field = name, "field set");

    output::success(&format!("set {}", output::name(name)));
    Ok(())
}

/// Print a field's plaintext. Encrypted fields are decrypted in memory and
/// the document is left untouched.
pub fn get(ctx: &Context, name: &str, hex: bool) -> Result<()> {
    let path = ctx.location.resolve()?;
    let document = Document::load(&path)?;

    let mut field = document.get(name)?.clone();
    if field.is_encrypted() {
        let key = ctx.master_key(false)?;
        field.decrypt(&key)?;
    }

    if hex {
        println!("{}", field.hex_data());
        return Ok(());
    }

    let bytes = Zeroizing::new(field.bytes()?);
    match std::str::from_utf8(&bytes) {
        Ok(text) => println!("{}", text),
        Err(_) => {
            output::warn("value is not valid UTF-8, printing hex");
            println!("{}", field.hex_data());
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct FieldSummary<'a> {
    name: &'a str,
    ciphersuite: &'a str,
    state: &'static str,
}

/// List fields with their cipher suite and state.
pub fn list(ctx: &Context, json: bool) -> Result<()> {
    let path = ctx.location.resolve()?;
    let document = Document::load(&path)?;

    let summaries: Vec<FieldSummary<'_>> = document
        .fields
        .iter()
        .map(|(name, field)| FieldSummary {
            name,
            ciphersuite: field.cipher_suite(),
            state: field.state().as_str(),
        })
        .collect();

    if json {
        let rendered = serde_json::to_string_pretty(&summaries)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        println!("{}", rendered);
        return Ok(());
    }

    if summaries.is_empty() {
        output::dimmed("no fields stored");
        return Ok(());
    }

    output::header(&format!("{} fields", summaries.len()));
    let width = summaries.iter().map(|s| s.name.len()).max().unwrap_or(0);
    for summary in &summaries {
        println!(
            "  {:<width$}  {:<17}  {}",
            summary.name,
            summary.ciphersuite,
            summary.state,
            width = width
        );
    }
    Ok(())
}

/// Remove a field.
pub fn rm(ctx: &Context, name: &str) -> Result<()> {
    let path = ctx.location.resolve()?;
    let mut document = Document::load(&path)?;

    document.remove(name)?;
    document.save(&path)?;
    info!(field = name, "field removed");

    output::success(&format!("removed {}", output::name(name)));
    Ok(())
}

/// Read a value from stdin, dropping one trailing newline.
fn read_stdin() -> Result<Zeroizing<Vec<u8>>> {
    let mut buf = Zeroizing::new(Vec::new());
    std::io::stdin().read_to_end(&mut buf)?;
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(buf)
}
