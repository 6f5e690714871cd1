// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP JSON API for tokenmeter.
//!
//! Exposes token counting, cost estimation and usage reports over axum, with
//! permissive CORS and request tracing.

pub mod handlers;
pub mod server;

pub use server::{GatewayState, ServerConfig, build_router, start_server};
