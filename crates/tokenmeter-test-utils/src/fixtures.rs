// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog and pricing fixtures.

use tokenmeter_core::{EncodingName, ModelCatalog, PriceEntry};

use crate::mock_tokenizer::MockTokenizer;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// The built-in price list: (model, input $/MTok, output $/MTok).
pub fn default_prices() -> Vec<(String, PriceEntry)> {
    vec![
        ("gpt-4o-mini".to_string(), PriceEntry::new(0.15, 0.60)),
        ("gpt-4o".to_string(), PriceEntry::new(5.00, 15.00)),
        ("gpt-4.1-mini".to_string(), PriceEntry::new(0.30, 1.20)),
    ]
}

pub fn default_catalog() -> ModelCatalog {
    ModelCatalog::new(
        default_prices().into_iter().map(|(id, _)| id).collect(),
        DEFAULT_MODEL,
    )
    .expect("fixture catalog is valid")
}

/// A capability that knows the two GPT-4o models natively but has no
/// mapping for `gpt-4.1-mini`, so that model exercises the baseline path.
pub fn default_mock_tokenizer() -> MockTokenizer {
    MockTokenizer::new()
        .with_model("gpt-4o-mini", EncodingName::O200kBase)
        .with_model("gpt-4o", EncodingName::O200kBase)
}
