//! CLI argument definitions for AgendaBot.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// AgendaBot -- schedule recurring CSV reports through a conversation.
#[derive(Parser)]
#[command(
    name = "agendabot",
    version,
    about = "AgendaBot -- conversational scheduling of recurring reports",
    long_about = "A rule-driven chatbot that interviews you for a report schedule (period, \
                  first report date, frequency) and submits it to the scheduling service."
)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(long, short, global = true, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Default log filter when RUST_LOG is unset (overrides the config file).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive conversation (the default).
    Chat,

    /// Show which intent an utterance is classified as.
    Classify {
        /// The utterance to classify.
        text: String,
    },

    /// Check a value with one of the field validators.
    Validate {
        /// Which validator to run.
        #[arg(value_enum)]
        kind: FieldKind,
        /// The value to check.
        value: String,
    },

    /// Show the effective configuration.
    Status,
}

/// Field validators exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FieldKind {
    /// ddmmaaaa calendar date.
    Date,
    /// hhmm wall-clock time.
    Time,
    /// Comma-separated weekday names.
    Weekdays,
}
