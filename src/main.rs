//! ingest - batch media ingestion console
//!
//! Submits uploads to the ingestion service and follows them to completion.

#![allow(missing_docs)]

use anyhow::Context;
use clap::Parser;
use ingest_console::cli::{self, Cli};
use ingest_console::config::load_config_with_precedence;
use ingest_console::utils::logging::init_logging;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // Display with the context chain, not Debug
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config_with_precedence(cli.config.as_deref(), true, &cli.overrides())
        .await
        .context("Failed to load configuration")?;
    init_logging(config.logging())?;

    cli::execute(cli.command, &config).await
}
