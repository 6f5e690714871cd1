// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tokenizer capability traits.
//!
//! The engine never implements byte-pair merging itself. It asks a
//! [`TokenizerCapability`] which encoding a model uses and for a loaded
//! [`Encoder`] of that encoding.

use std::sync::Arc;

use crate::error::TokenmeterError;
use crate::types::EncodingName;

/// A loaded encoding that turns text into token ids.
///
/// Implementations must be deterministic: the same text always produces the
/// same sequence.
pub trait Encoder: Send + Sync {
    /// The encoding this encoder implements.
    fn encoding(&self) -> EncodingName;

    /// Tokenizes `text`, treating special-token markers as ordinary text.
    fn encode(&self, text: &str) -> Vec<u32>;
}

/// Source of encodings, keyed by model identifier or encoding name.
pub trait TokenizerCapability: Send + Sync {
    /// Returns the encoding a model uses.
    ///
    /// Fails with [`TokenmeterError::UnknownModel`] when the capability has
    /// no mapping for `model`.
    fn encoding_for_model(&self, model: &str) -> Result<EncodingName, TokenmeterError>;

    /// Loads the vocabulary and merge rules for `encoding`.
    ///
    /// This can be expensive; callers are expected to memoize the result.
    fn load_encoding(&self, encoding: EncodingName) -> Result<Arc<dyn Encoder>, TokenmeterError>;
}
