//! CLI entry point for AgendaBot.
//!
//! This binary provides the `agendabot` command: an interactive scheduling
//! conversation plus a few diagnostic subcommands.

mod cli;
mod commands;
mod config;
mod helpers;
mod repl;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::config::AppConfig;
use crate::helpers::{env_non_empty, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)?;
    config.apply_env(env_non_empty)?;

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(level);

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => repl::cmd_chat(&config).await,
        Commands::Classify { text } => commands::cmd_classify(&config, &text),
        Commands::Validate { kind, value } => commands::cmd_validate(kind, &value),
        Commands::Status => commands::cmd_status(&config),
    }
}
