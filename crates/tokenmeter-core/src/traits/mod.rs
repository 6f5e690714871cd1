// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the counting engine and the tokenizer library.

pub mod tokenizer;

pub use tokenizer::{Encoder, TokenizerCapability};
