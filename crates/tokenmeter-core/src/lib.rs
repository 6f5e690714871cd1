// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for tokenmeter.
//!
//! This crate provides the error type, the data types that flow between the
//! tokenizer, cost and gateway crates, and the tokenizer capability traits.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TokenmeterError;
pub use traits::{Encoder, TokenizerCapability};
pub use types::{
    EncodingName, EncodingSource, ModelCatalog, ModelCost, ModelCosts, PriceEntry,
    ResolutionSummary, UsageReport,
};
