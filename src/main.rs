mod domain;
mod error;
mod clients;

mod app_system;
mod config;
mod controller;
mod view;
mod cli;
mod commands;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod user_actor;
mod product_actor;
mod order_actor;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{info, Instrument};

use crate::app_system::{setup_tracing, OrderSystem};
use crate::cli::Cli;
use crate::config::Settings;
use crate::view::render_notice;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Setup tracing once for the entire application
    setup_tracing();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref(), cli.api_base_url.as_deref())
        .context("Failed to load settings")?;

    info!(api_base_url = %settings.api_base_url, "Starting order register");

    // Create the entire order system (starts all actors)
    let system = OrderSystem::new(&settings);

    let screen = cli.screen.unwrap_or_default();
    let span = tracing::info_span!("session", screen = screen.name());
    let output = commands::execute(screen, &system, &settings).instrument(span).await;

    if !output.text.is_empty() {
        print!("{}", output.text);
    }
    if let Some(notice) = &output.notice {
        println!("{}", render_notice(notice));
    }

    // Shutdown system gracefully
    system.shutdown().await.map_err(anyhow::Error::msg)?;

    info!("Application completed successfully");
    Ok(if output.failed() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}
