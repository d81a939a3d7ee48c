//! securedata - self-describing encrypted data fields for configuration files.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── init          # Create an empty document
//! │   ├── field         # set / get / list / rm
//! │   ├── crypt         # encrypt / decrypt
//! │   ├── keygen        # Random master keys
//! │   └── output        # Terminal output helpers
//! ├── core/             # Core library components
//! │   ├── secure/       # SecureData state machine
//! │   │   ├── mod       # HKDF key derivation, nonce lifecycle
//! │   │   └── suite     # Cipher suites, chunked AEAD framing
//! │   ├── config/       # Config file discovery and documents
//! │   ├── constants     # Names and defaults
//! │   └── validation    # Field name validation
//! ├── logging           # LogConfig and subscriber bootstrap
//! └── error             # Error types
//! ```
//!
//! # Example
//!
//! ```
//! use securedata::core::secure::{CipherSuite, SecureData};
//!
//! let master = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";
//!
//! let mut field = SecureData::new(CipherSuite::ChaCha20Poly1305);
//! field.set_plaintext(b"s3cr3t").unwrap();
//! field.encrypt(master).unwrap();
//! assert!(field.is_encrypted());
//!
//! field.decrypt(master).unwrap();
//! assert_eq!(field.bytes().unwrap(), b"s3cr3t");
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod logging;
