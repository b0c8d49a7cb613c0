//! ledger
//!
//! Command line front end: loads configuration from the environment, runs
//! one command against the exchange and prints the result.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use exchange_client::ClientConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing; logs go to stderr so stdout stays the report
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();
    tracing::debug!(base_url = %config.base_url, signed = config.credentials.is_some(), "Loaded configuration");

    match commands::run(cli.command, config).await {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
