//! Input validation.

use crate::error::{Result, ValidationError};

/// Validate a field name.
///
/// Field names may contain ASCII letters, digits, `_`, `.` and `-`, and may
/// not start with `.` or `-`.
///
/// # Errors
///
/// Returns `ValidationError` if the name is empty or contains other
/// characters.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName.into());
    }

    if name.starts_with('.') || name.starts_with('-') {
        return Err(ValidationError::InvalidName {
            name: name.to_string(),
            reason: "cannot start with '.' or '-'".to_string(),
        }
        .into());
    }

    for (i, ch) in name.chars().enumerate() {
        if !ch.is_ascii_alphanumeric() && !matches!(ch, '_' | '.' | '-') {
            return Err(ValidationError::InvalidName {
                name: name.to_string(),
                reason: format!(
                    "invalid character '{}' at position {}. Only A-Z, a-z, 0-9, '_', '.' and '-' are allowed",
                    ch,
                    i + 1
                ),
            }
            .into());
        }
    }

    Ok(())
}
