// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tokenmeter serve`: wire the meter from configuration and run the HTTP API.

use tokenmeter_config::TokenmeterConfig;
use tokenmeter_core::TokenmeterError;
use tokenmeter_cost::TokenMeter;
use tokenmeter_gateway::{GatewayState, ServerConfig};
use tracing::info;

/// Build the meter (loading the baseline encoding) and serve until a
/// shutdown signal arrives.
pub async fn run_serve(config: TokenmeterConfig) -> Result<(), TokenmeterError> {
    let meter = TokenMeter::from_config(&config)?;
    info!(
        default_model = meter.default_model(),
        models = meter.catalog().models().len(),
        "token meter initialized"
    );

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    tokenmeter_gateway::start_server(&server_config, GatewayState::new(meter)).await
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise tokenmeter crates log at `log_level`
/// and everything else at `warn`. Output goes to stderr so command output on
/// stdout stays machine readable.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let level = log_level.trim().to_lowercase();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tokenmeter={level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
