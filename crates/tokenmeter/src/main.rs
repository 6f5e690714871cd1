// SPDX-FileCopyrightText: 2026 Tokenmeter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! tokenmeter - token counting and LLM cost estimation.
//!
//! This is the binary entry point: HTTP server plus one-shot CLI commands.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod commands;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokenmeter_config::TokenmeterConfig;

/// tokenmeter - token counting and LLM cost estimation.
#[derive(Parser, Debug)]
#[command(name = "tokenmeter", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this TOML file instead of the standard
    /// locations. Environment overrides still apply.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP API server (default).
    Serve,
    /// Print the token count of TEXT, or of stdin when TEXT is omitted.
    Count {
        /// Model whose encoding is used. Defaults to the configured default model.
        #[arg(long)]
        model: Option<String>,
        text: Option<String>,
    },
    /// Print the estimated USD cost for the given token counts.
    Estimate {
        #[arg(long)]
        tokens_in: usize,
        #[arg(long)]
        tokens_out: usize,
        #[arg(long)]
        model: Option<String>,
    },
    /// Print a multi-model usage report as JSON.
    Report {
        #[arg(long)]
        prompt: String,
        #[arg(long)]
        response: Option<String>,
        #[arg(long)]
        model: Option<String>,
    },
    /// Print the effective configuration as TOML.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(errors) => {
            tokenmeter_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    serve::init_tracing(&config.server.log_level);

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Count { model, text } => commands::run_count(&config, model, text),
        Commands::Estimate {
            tokens_in,
            tokens_out,
            model,
        } => commands::run_estimate(&config, tokens_in, tokens_out, model),
        Commands::Report {
            prompt,
            response,
            model,
        } => commands::run_report(&config, &prompt, response.as_deref(), model),
        Commands::Config => commands::run_config(&config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<TokenmeterConfig, Vec<tokenmeter_config::ConfigError>> {
    match &cli.config {
        Some(path) => tokenmeter_config::load_and_validate_path(path),
        None => tokenmeter_config::load_and_validate(),
    }
}
