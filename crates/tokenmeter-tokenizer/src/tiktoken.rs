// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tiktoken-rs` backed tokenizer capability.

use std::sync::Arc;

use tiktoken_rs::CoreBPE;
use tiktoken_rs::tokenizer::{Tokenizer, get_tokenizer};
use tokenmeter_core::{Encoder, EncodingName, TokenizerCapability, TokenmeterError};

/// Tokenizer capability using the vocabularies bundled with `tiktoken-rs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TiktokenCapability;

impl TiktokenCapability {
    pub fn new() -> Self {
        Self
    }
}

impl TokenizerCapability for TiktokenCapability {
    fn encoding_for_model(&self, model: &str) -> Result<EncodingName, TokenmeterError> {
        get_tokenizer(model)
            .and_then(encoding_from_tokenizer)
            .ok_or_else(|| TokenmeterError::UnknownModel {
                model: model.to_string(),
            })
    }

    fn load_encoding(&self, encoding: EncodingName) -> Result<Arc<dyn Encoder>, TokenmeterError> {
        let bpe = tiktoken_rs::get_bpe_from_tokenizer(tokenizer_for_encoding(encoding)).map_err(
            |e| TokenmeterError::Tokenizer {
                message: format!("failed to load {encoding}: {e}"),
                source: Some(e.into()),
            },
        )?;
        Ok(Arc::new(TiktokenEncoder { encoding, bpe }))
    }
}

/// A loaded tiktoken byte-pair encoder.
pub struct TiktokenEncoder {
    encoding: EncodingName,
    bpe: CoreBPE,
}

impl Encoder for TiktokenEncoder {
    fn encoding(&self) -> EncodingName {
        self.encoding
    }

    fn encode(&self, text: &str) -> Vec<u32> {
        self.bpe.encode_ordinary(text)
    }
}

/// Encodings outside [`EncodingName`] (newer tiktoken additions) map to
/// `None` and are treated like an unknown model.
#[allow(unreachable_patterns)]
fn encoding_from_tokenizer(tokenizer: Tokenizer) -> Option<EncodingName> {
    match tokenizer {
        Tokenizer::O200kBase => Some(EncodingName::O200kBase),
        Tokenizer::Cl100kBase => Some(EncodingName::Cl100kBase),
        Tokenizer::P50kBase => Some(EncodingName::P50kBase),
        Tokenizer::P50kEdit => Some(EncodingName::P50kEdit),
        Tokenizer::R50kBase => Some(EncodingName::R50kBase),
        Tokenizer::Gpt2 => Some(EncodingName::Gpt2),
        _ => None,
    }
}

fn tokenizer_for_encoding(encoding: EncodingName) -> Tokenizer {
    match encoding {
        EncodingName::O200kBase => Tokenizer::O200kBase,
        EncodingName::Cl100kBase => Tokenizer::Cl100kBase,
        EncodingName::P50kBase => Tokenizer::P50kBase,
        EncodingName::P50kEdit => Tokenizer::P50kEdit,
        EncodingName::R50kBase => Tokenizer::R50kBase,
        EncodingName::Gpt2 => Tokenizer::Gpt2,
    }
}
