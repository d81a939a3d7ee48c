//! Configuration file discovery and documents.
//!
//! [`ConfigLocation`] finds the file, [`Document`] reads and writes the
//! named [`SecureData`](crate::core::secure::SecureData) fields stored in it.

mod document;
mod location;

pub use document::Document;
pub use location::{clean, default_search_paths, ConfigFormat, ConfigLocation};
