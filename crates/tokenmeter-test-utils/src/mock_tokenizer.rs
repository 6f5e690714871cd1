// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock tokenizer capability for deterministic testing.
//!
//! `MockEncoder` splits on whitespace and charges each word
//! `ceil(len / width)` tokens, where the width depends on the encoding. Two
//! encodings therefore disagree on long words, which lets tests tell which
//! encoding produced a count.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokenmeter_core::{Encoder, EncodingName, TokenizerCapability, TokenmeterError};

/// Whitespace encoder that counts its own invocations.
pub struct MockEncoder {
    encoding: EncodingName,
    calls: AtomicUsize,
}

impl MockEncoder {
    pub fn new(encoding: EncodingName) -> Self {
        Self {
            encoding,
            calls: AtomicUsize::new(0),
        }
    }

    /// Characters per token for a word under this mock encoding.
    pub fn width(encoding: EncodingName) -> usize {
        match encoding {
            EncodingName::O200kBase => 4,
            EncodingName::Cl100kBase => 3,
            _ => 2,
        }
    }

    /// The count this encoder produces for `text`, without recording a call.
    pub fn expected_count(encoding: EncodingName, text: &str) -> usize {
        let width = Self::width(encoding);
        text.split_whitespace()
            .map(|w| w.chars().count().div_ceil(width))
            .sum()
    }

    /// Number of times `encode` has run.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Encoder for MockEncoder {
    fn encoding(&self) -> EncodingName {
        self.encoding
    }

    fn encode(&self, text: &str) -> Vec<u32> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let n = Self::expected_count(self.encoding, text);
        (0..n as u32).collect()
    }
}

/// Configurable tokenizer capability.
///
/// Models not registered with [`MockTokenizer::with_model`] fail with
/// [`TokenmeterError::UnknownModel`]. Encodings registered with
/// [`MockTokenizer::with_broken_encoding`] fail to load.
#[derive(Default)]
pub struct MockTokenizer {
    models: HashMap<String, EncodingName>,
    broken: HashSet<EncodingName>,
    loads: Mutex<HashMap<EncodingName, usize>>,
    encoders: Mutex<Vec<Arc<MockEncoder>>>,
}

impl MockTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `model` to `encoding`.
    pub fn with_model(mut self, model: &str, encoding: EncodingName) -> Self {
        self.models.insert(model.to_string(), encoding);
        self
    }

    /// Make loading `encoding` fail with a tokenizer error.
    pub fn with_broken_encoding(mut self, encoding: EncodingName) -> Self {
        self.broken.insert(encoding);
        self
    }

    /// How many times `encoding` has been loaded.
    pub fn load_count(&self, encoding: EncodingName) -> usize {
        self.loads
            .lock()
            .expect("loads lock poisoned")
            .get(&encoding)
            .copied()
            .unwrap_or(0)
    }

    /// Total `encode` calls across every encoder this capability handed out.
    pub fn encode_calls(&self) -> usize {
        self.encoders
            .lock()
            .expect("encoders lock poisoned")
            .iter()
            .map(|e| e.calls())
            .sum()
    }
}

impl TokenizerCapability for MockTokenizer {
    fn encoding_for_model(&self, model: &str) -> Result<EncodingName, TokenmeterError> {
        self.models
            .get(model)
            .copied()
            .ok_or_else(|| TokenmeterError::UnknownModel {
                model: model.to_string(),
            })
    }

    fn load_encoding(&self, encoding: EncodingName) -> Result<Arc<dyn Encoder>, TokenmeterError> {
        *self
            .loads
            .lock()
            .expect("loads lock poisoned")
            .entry(encoding)
            .or_insert(0) += 1;

        if self.broken.contains(&encoding) {
            return Err(TokenmeterError::Tokenizer {
                message: format!("mock vocabulary for {encoding} is corrupt"),
                source: None,
            });
        }

        let encoder = Arc::new(MockEncoder::new(encoding));
        self.encoders
            .lock()
            .expect("encoders lock poisoned")
            .push(Arc::clone(&encoder));
        Ok(encoder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoder_widths_differ_between_encodings() {
        let text = "tokenization";
        assert_eq!(MockEncoder::expected_count(EncodingName::O200kBase, text), 3);
        assert_eq!(MockEncoder::expected_count(EncodingName::Cl100kBase, text), 4);
    }

    #[test]
    fn unknown_model_is_unknown_key() {
        let mock = MockTokenizer::new();
        let err = mock.encoding_for_model("nope").unwrap_err();
        assert!(err.is_unknown_key());
    }

    #[test]
    fn broken_encoding_fails_and_is_counted() {
        let mock = MockTokenizer::new().with_broken_encoding(EncodingName::Gpt2);
        assert!(mock.load_encoding(EncodingName::Gpt2).is_err());
        assert_eq!(mock.load_count(EncodingName::Gpt2), 1);
    }

    #[test]
    fn encode_calls_are_tracked() {
        let mock = MockTokenizer::new();
        let encoder = mock.load_encoding(EncodingName::Cl100kBase).unwrap();
        assert_eq!(encoder.encode("a bb ccc").len(), 3);
        assert_eq!(mock.encode_calls(), 1);
    }
}
