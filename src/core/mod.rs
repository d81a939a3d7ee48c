//! Core library components.
//!
//! The secure data construct plus the configuration handling around it.

pub mod config;
pub mod constants;
pub mod secure;
pub mod validation;
