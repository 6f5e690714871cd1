// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Token counting.

use tokenmeter_core::Encoder;

/// Number of tokens `encoder` produces for `text`.
///
/// Absent or empty text counts as zero and never reaches the encoder.
pub fn count_tokens<'a>(text: impl Into<Option<&'a str>>, encoder: &dyn Encoder) -> usize {
    match text.into() {
        None | Some("") => 0,
        Some(text) => encoder.encode(text).len(),
    }
}
