// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Encoding resolution and token counting.
//!
//! This crate provides:
//! - **Tiktoken capability**: the production [`TokenizerCapability`] backed by `tiktoken-rs`
//! - **Encoding cache**: process-wide memoization of loaded encodings
//! - **Resolver**: model identifier to encoder, with default-model and baseline fallbacks
//! - **Counter**: token counts for optional text
//!
//! [`TokenizerCapability`]: tokenmeter_core::TokenizerCapability

pub mod cache;
pub mod counter;
pub mod resolver;
pub mod tiktoken;

pub use cache::EncodingCache;
pub use counter::count_tokens;
pub use resolver::{EncodingResolver, Resolution};
pub use tiktoken::{TiktokenCapability, TiktokenEncoder};
