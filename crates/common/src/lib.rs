//! Common types and utilities for discoverygen
//!
//! This crate contains the error type shared by the parser and codegen
//! crates, plus a handful of identifier-casing helpers both of them need.

use thiserror::Error;

/// Errors that can occur while loading a Discovery document or generating
/// a client module from it.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("schema error: {0}")]
    Schema(String),

    #[error("generation error: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for discoverygen operations.
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Upper-case the first character of `s`, leaving the rest untouched.
///
/// `""` is handled without panicking.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
