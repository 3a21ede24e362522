//! Error types for Loom operations.
//!
//! This module provides the main error type [`LoomError`] which wraps
//! the error conditions that can occur while loading and checking documents.

use std::io;

use thiserror::Error;

use loom_parser::error::ParseError;

/// The main error type for Loom operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries every diagnostic of a failed strict check
/// together with the source text, so reporters can render snippets.
#[derive(Debug, Error)]
pub enum LoomError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Simulation error: {0}")]
    Simulation(Box<dyn std::error::Error + Send + Sync>),
}

impl LoomError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
