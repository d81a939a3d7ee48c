//! Cipher suites and the chunked AEAD framing.
//!
//! Payloads are sealed with the STREAM construction (big-endian 32-bit
//! counter) over the selected AEAD. The sealed layout is:
//!
//! ```text
//! prefix (7 random bytes) || segment || segment || ... || last segment
//! ```
//!
//! Every segment carries up to [`CHUNK_SIZE`] bytes of plaintext followed by
//! a 16-byte tag. The last segment is sealed with the STREAM "last" flag, so
//! truncated or reordered ciphertext fails authentication.

use std::fmt;
use std::str::FromStr;

use aead::consts::U12;
use aead::generic_array::GenericArray;
use aead::stream::{DecryptorBE32, EncryptorBE32};
use aead::{AeadCore, AeadInPlace, KeyInit};
use aes_gcm::Aes256Gcm;
use chacha20poly1305::ChaCha20Poly1305;
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::trace;
use zeroize::Zeroizing;

use crate::error::SecureDataError;

/// Plaintext bytes per STREAM segment.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Length of the random STREAM nonce prefix (12-byte AEAD nonce minus the
/// 5 bytes of counter and last-block flag).
pub const PREFIX_LEN: usize = 7;

/// Authentication tag length of both supported AEADs.
pub const TAG_LEN: usize = 16;

const SEGMENT_LEN: usize = CHUNK_SIZE + TAG_LEN;

/// Authenticated encryption algorithm protecting a field's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CipherSuite {
    #[default]
    Aes256Gcm,
    ChaCha20Poly1305,
}

impl CipherSuite {
    /// Every supported suite.
    pub const ALL: [CipherSuite; 2] = [CipherSuite::Aes256Gcm, CipherSuite::ChaCha20Poly1305];

    /// Canonical identifier written to documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aes256Gcm => "AES-256-GCM",
            Self::ChaCha20Poly1305 => "CHACHA20-POLY1305",
        }
    }

    /// Seal `plaintext` under `key`.
    pub(crate) fn seal(&self, key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, SecureDataError> {
        trace!(suite = %self, plaintext_len = plaintext.len(), "sealing");
        match self {
            Self::Aes256Gcm => seal_stream::<Aes256Gcm>(key, plaintext),
            Self::ChaCha20Poly1305 => seal_stream::<ChaCha20Poly1305>(key, plaintext),
        }
    }

    /// Open a payload produced by [`CipherSuite::seal`].
    pub(crate) fn open(
        &self,
        key: &[u8],
        sealed: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, SecureDataError> {
        trace!(suite = %self, sealed_len = sealed.len(), "opening");
        match self {
            Self::Aes256Gcm => open_stream::<Aes256Gcm>(key, sealed),
            Self::ChaCha20Poly1305 => open_stream::<ChaCha20Poly1305>(key, sealed),
        }
    }
}

impl fmt::Display for CipherSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CipherSuite {
    type Err = SecureDataError;

    /// Accepts the canonical names case-insensitively, plus the underscore
    /// spellings (`AES_256_GCM`) found in older documents.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|suite| suite.as_str() == normalized)
            .ok_or_else(|| SecureDataError::InvalidCipherSuite(s.to_string()))
    }
}

fn seal_stream<A>(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, SecureDataError>
where
    A: AeadInPlace + KeyInit + AeadCore<NonceSize = U12>,
{
    let aead =
        A::new_from_slice(key).map_err(|e| SecureDataError::Encryption(format!("{}", e)))?;

    let mut prefix = [0u8; PREFIX_LEN];
    OsRng
        .try_fill_bytes(&mut prefix)
        .map_err(|e| SecureDataError::Encryption(format!("random source: {}", e)))?;

    let mut encryptor = EncryptorBE32::<A>::from_aead(aead, GenericArray::from_slice(&prefix));

    let mut chunks: Vec<&[u8]> = plaintext.chunks(CHUNK_SIZE).collect();
    let last = chunks.pop().unwrap_or_default();

    let mut sealed = Vec::with_capacity(PREFIX_LEN + plaintext.len() + (chunks.len() + 1) * TAG_LEN);
    sealed.extend_from_slice(&prefix);
    for chunk in chunks {
        let segment = encryptor
            .encrypt_next(chunk)
            .map_err(|e| SecureDataError::Encryption(format!("{}", e)))?;
        sealed.extend_from_slice(&segment);
    }
    let segment = encryptor
        .encrypt_last(last)
        .map_err(|e| SecureDataError::Encryption(format!("{}", e)))?;
    sealed.extend_from_slice(&segment);

    Ok(sealed)
}

fn open_stream<A>(key: &[u8], sealed: &[u8]) -> Result<Zeroizing<Vec<u8>>, SecureDataError>
where
    A: AeadInPlace + KeyInit + AeadCore<NonceSize = U12>,
{
    if sealed.len() < PREFIX_LEN + TAG_LEN {
        return Err(SecureDataError::Authentication);
    }

    let aead = A::new_from_slice(key).map_err(|_| SecureDataError::KeyDerivation)?;
    let (prefix, body) = sealed.split_at(PREFIX_LEN);
    let mut decryptor = DecryptorBE32::<A>::from_aead(aead, GenericArray::from_slice(prefix));

    let mut segments: Vec<&[u8]> = body.chunks(SEGMENT_LEN).collect();
    let last = segments.pop().unwrap_or_default();

    let mut plaintext = Zeroizing::new(Vec::with_capacity(body.len()));
    for segment in segments {
        let chunk = Zeroizing::new(
            decryptor
                .decrypt_next(segment)
                .map_err(|_| SecureDataError::Authentication)?,
        );
        plaintext.extend_from_slice(&chunk);
    }
    let chunk = Zeroizing::new(
        decryptor
            .decrypt_last(last)
            .map_err(|_| SecureDataError::Authentication)?,
    );
    plaintext.extend_from_slice(&chunk);

    Ok(plaintext)
}
