//! Self-describing encrypted data fields.
//!
//! A [`SecureData`] is a three-field record (`nonce`, `ciphersuite`,
//! `hexdata`) that can be embedded in any serde document. It cycles between
//! plaintext and ciphertext in place:
//!
//! ```text
//!            set_plaintext            encrypt
//!   Empty ─────────────────▶ Plaintext ───────▶ Encrypted
//!                               ▲                   │
//!                               └───── decrypt ─────┘
//! ```
//!
//! The nonce is 32 random bytes, drawn when a plaintext field is encrypted.
//! It is used as the HKDF-SHA256 salt that derives the per-field key from the
//! master key. The AEAD's own per-segment nonces live inside the ciphertext.
//! Decrypting clears the nonce, so every encryption uses a fresh salt.

mod suite;

pub use suite::{CipherSuite, CHUNK_SIZE, PREFIX_LEN, TAG_LEN};

use hkdf::Hkdf;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::SecureDataError;

/// Length of the random nonce (HKDF salt) in bytes.
pub const NONCE_LEN: usize = 32;

/// Length of the derived symmetric key in bytes.
pub const KEY_LEN: usize = 32;

/// Observable state of a [`SecureData`] field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// No nonce and no payload.
    Empty,
    /// Payload holds hex-encoded plaintext.
    Plaintext,
    /// Payload holds hex-encoded ciphertext, `nonce` holds the salt.
    Encrypted,
}

impl State {
    /// Lowercase name for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Plaintext => "plaintext",
            Self::Encrypted => "encrypted",
        }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An at-rest encrypted data field.
///
/// Construction is permissive: any `ciphersuite` string deserializes, and
/// an unknown one is only rejected when `encrypt` or `decrypt` runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecureData {
    #[serde(default)]
    nonce: String,
    #[serde(default, rename = "ciphersuite")]
    cipher_suite: String,
    #[serde(default, rename = "hexdata")]
    hex_data: String,
}

impl SecureData {
    /// Create an empty field protected by `suite`.
    pub fn new(suite: CipherSuite) -> Self {
        Self {
            cipher_suite: suite.as_str().to_string(),
            ..Self::default()
        }
    }

    /// Build a field from its persisted parts without validation.
    pub fn from_parts(
        nonce: impl Into<String>,
        cipher_suite: impl Into<String>,
        hex_data: impl Into<String>,
    ) -> Self {
        Self {
            nonce: nonce.into(),
            cipher_suite: cipher_suite.into(),
            hex_data: hex_data.into(),
        }
    }

    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    pub fn cipher_suite(&self) -> &str {
        &self.cipher_suite
    }

    pub fn hex_data(&self) -> &str {
        &self.hex_data
    }

    pub fn state(&self) -> State {
        if !self.nonce.is_empty() {
            State::Encrypted
        } else if self.hex_data.is_empty() {
            State::Empty
        } else {
            State::Plaintext
        }
    }

    pub fn is_encrypted(&self) -> bool {
        self.state() == State::Encrypted
    }

    /// Replace the plaintext payload.
    ///
    /// # Errors
    ///
    /// Returns `SecureDataError::AlreadyEncrypted` if the field holds
    /// ciphertext. It must be decrypted first so protected data is never
    /// silently overwritten.
    pub fn set_plaintext(&mut self, data: &[u8]) -> Result<(), SecureDataError> {
        if self.is_encrypted() {
            return Err(SecureDataError::AlreadyEncrypted);
        }
        self.hex_data = hex::encode(data);
        Ok(())
    }

    /// Change the cipher suite of a field that is not encrypted.
    ///
    /// # Errors
    ///
    /// Returns `SecureDataError::AlreadyEncrypted` if the field holds
    /// ciphertext, which can only be opened with the suite it was sealed with.
    pub fn set_cipher_suite(&mut self, suite: CipherSuite) -> Result<(), SecureDataError> {
        if self.is_encrypted() {
            return Err(SecureDataError::AlreadyEncrypted);
        }
        self.cipher_suite = suite.as_str().to_string();
        Ok(())
    }

    /// Decode the payload, whatever the current state.
    pub fn bytes(&self) -> Result<Vec<u8>, SecureDataError> {
        decode("payload", &self.hex_data)
    }

    /// Encrypt the plaintext payload in place with a key derived from
    /// `master_key` (hex).
    ///
    /// # Errors
    ///
    /// - `AlreadyEncrypted` if the payload is already ciphertext
    /// - `InvalidCipherSuite` if the suite is not recognized
    /// - `Decode` if the master key or payload is not valid hex
    /// - `KeyDerivation` / `Encryption` if a primitive fails
    ///
    /// The field is unchanged on error.
    pub fn encrypt(&mut self, master_key: &str) -> Result<(), SecureDataError> {
        if self.is_encrypted() {
            return Err(SecureDataError::AlreadyEncrypted);
        }
        let suite: CipherSuite = self.cipher_suite.parse()?;
        let master = Zeroizing::new(decode("master key", master_key)?);
        let plaintext = Zeroizing::new(self.bytes()?);

        let nonce = generate_nonce()?;
        let key = derive_key(&master, &nonce)?;
        let sealed = suite.seal(key.as_slice(), &plaintext)?;

        debug!(
            suite = %suite,
            plaintext_len = plaintext.len(),
            ciphertext_len = sealed.len(),
            "encrypted field"
        );

        self.nonce = hex::encode(nonce);
        self.hex_data = hex::encode(sealed);
        Ok(())
    }

    /// Decrypt the ciphertext payload in place, clearing the nonce.
    ///
    /// # Errors
    ///
    /// - `MissingNonce` if no nonce is set
    /// - `InvalidCipherSuite` if the suite is not recognized
    /// - `Decode` if the master key, nonce or payload is not valid hex
    /// - `Authentication` if the ciphertext was altered or the key is wrong
    ///
    /// The field is unchanged on error.
    pub fn decrypt(&mut self, master_key: &str) -> Result<(), SecureDataError> {
        if self.nonce.is_empty() {
            return Err(SecureDataError::MissingNonce);
        }
        let suite: CipherSuite = self.cipher_suite.parse()?;
        let master = Zeroizing::new(decode("master key", master_key)?);
        let nonce = decode("nonce", &self.nonce)?;
        let sealed = self.bytes()?;

        let key = derive_key(&master, &nonce)?;
        let plaintext = suite.open(key.as_slice(), &sealed)?;

        debug!(
            suite = %suite,
            ciphertext_len = sealed.len(),
            plaintext_len = plaintext.len(),
            "decrypted field"
        );

        // The salt belongs to the ciphertext it produced; drop it so the next
        // encryption draws a new one.
        self.nonce.clear();
        self.hex_data = hex::encode(plaintext.as_slice());
        Ok(())
    }
}

/// Fresh random salt. `encrypt` only runs on fields without a nonce, so a
/// salt is never reused.
fn generate_nonce() -> Result<[u8; NONCE_LEN], SecureDataError> {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|e| SecureDataError::Encryption(format!("random source: {}", e)))?;
    Ok(nonce)
}

/// Derive the per-field key: HKDF-SHA256, master key as input keying
/// material, nonce as salt, empty info.
fn derive_key(master: &[u8], salt: &[u8]) -> Result<Zeroizing<[u8; KEY_LEN]>, SecureDataError> {
    let hk = Hkdf::<Sha256>::new(Some(salt), master);
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    hk.expand(&[], &mut key[..])
        .map_err(|_| SecureDataError::KeyDerivation)?;
    Ok(key)
}

fn decode(field: &'static str, value: &str) -> Result<Vec<u8>, SecureDataError> {
    hex::decode(value).map_err(|source| SecureDataError::Decode { field, source })
}
