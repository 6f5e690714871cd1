// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for tokenmeter.

use thiserror::Error;

/// The primary error type used across tokenmeter crates.
///
/// Request-path fallbacks (unknown model, unresolvable encoding) are absorbed
/// by the engine and never surface as this type; it is reserved for startup,
/// configuration and transport failures, and for the tokenizer capability
/// seam where the engine decides how to recover.
#[derive(Debug, Error)]
pub enum TokenmeterError {
    /// Configuration errors (invalid pricing table, unknown default model).
    #[error("configuration error: {0}")]
    Config(String),

    /// The tokenizer capability has no encoding registered for this model.
    #[error("no encoding known for model `{model}`")]
    UnknownModel { model: String },

    /// An encoding name that the tokenizer capability does not recognize.
    #[error("unknown encoding `{name}`")]
    UnknownEncoding { name: String },

    /// Tokenizer failures (vocabulary load, merge table construction).
    #[error("tokenizer error: {message}")]
    Tokenizer {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// HTTP server errors (bind failure, serve loop exit).
    #[error("server error: {message}")]
    Server {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TokenmeterError {
    /// Whether this error means "the capability does not know this key",
    /// as opposed to a hard failure while loading.
    pub fn is_unknown_key(&self) -> bool {
        matches!(
            self,
            TokenmeterError::UnknownModel { .. } | TokenmeterError::UnknownEncoding { .. }
        )
    }
}
