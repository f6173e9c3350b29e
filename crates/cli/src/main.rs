//! Entry point for the `runboard` binary.

mod cli;
mod commands;
mod fetcher;
mod render;
mod telemetry;

use clap::Parser;
use cli::{Cli, Command};
use color_eyre::eyre::WrapErr;
use rb_core::config::loader::load_config;
use std::io::IsTerminal;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    telemetry::init_tracing()?;

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let config = load_config(&cli.root)
        .await
        .wrap_err("Failed to load runboard configuration")?;
    tracing::debug!(
        root = %cli.root.display(),
        poll_interval_ms = config.poll_interval_ms,
        "configuration loaded"
    );

    match cli.command {
        Command::Inspect(args) => commands::inspect(args, &config).await,
        Command::Watch(args) => commands::watch(args, &config).await,
    }
}
