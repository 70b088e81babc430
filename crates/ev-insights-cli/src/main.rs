mod commands;
mod config;
mod display;
mod pipeline;

use anyhow::Context;
use clap::FromArgMatches;
use tracing_subscriber::EnvFilter;

use crate::commands::CommandTable;
use crate::config::Settings;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // stdout carries the report; diagnostics go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("ev-insights v{}", env!("CARGO_PKG_VERSION"));

    let table = CommandTable::reports();
    let matches = commands::build_cli(&table).get_matches();
    let settings = Settings::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    let name = matches.subcommand_name().context("no command given")?;

    commands::dispatch(&table, name, &settings).await
}
