// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for tokenmeter.
//!
//! Provides a deterministic tokenizer capability and catalog fixtures so the
//! resolver, cache and report builder can be tested without loading real
//! vocabularies.
//!
//! # Components
//!
//! - [`MockTokenizer`] - capability with configurable model mappings and failures
//! - [`MockEncoder`] - whitespace encoder that records how often it runs
//! - [`fixtures`] - catalogs and price lists mirroring the built-in defaults

pub mod fixtures;
pub mod mock_tokenizer;

pub use mock_tokenizer::{MockEncoder, MockTokenizer};
