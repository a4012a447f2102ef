//! Shared helper functions used across CLI subcommands.
//!
//! Includes tracing initialization, environment variable utilities and the
//! wiring that turns an [`AppConfig`] into a classifier and a submitter.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use agendabot_adapters::{HttpScheduleSubmitter, LexiconSynonyms};
use agendabot_intent::{CachedSynonyms, IntentClassifier, LexicalMatcher};

use crate::config::AppConfig;

/// The classifier the binary runs with: lexicon synonyms, memoized for the
/// lifetime of one session.
pub type SessionClassifier = IntentClassifier<CachedSynonyms<LexiconSynonyms>>;

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

/// Initialize the tracing subscriber with the given default log level.
///
/// Logs go to stderr so they never interleave with the conversation on
/// stdout.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Read a non-empty environment variable, returning `None` if unset or empty.
pub fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

/// Build a classifier backed by the configured lexicon.
pub fn build_classifier(config: &AppConfig) -> SessionClassifier {
    let lexicon = LexiconSynonyms::load_or_empty(&config.lexicon.path);
    info!(entries = lexicon.entries(), "synonym lexicon ready");

    let matcher = LexicalMatcher::new(CachedSynonyms::new(lexicon))
        .with_threshold(config.matcher.threshold)
        .with_language(config.matcher.language.clone());
    IntentClassifier::new(matcher)
}

/// Build the scheduling service client.
pub fn build_submitter(config: &AppConfig) -> Result<HttpScheduleSubmitter> {
    let service = config.service_config();
    let submitter =
        HttpScheduleSubmitter::new(&service).context("failed to create scheduling client")?;
    info!(url = submitter.url(), timeout = ?service.timeout, "scheduling client ready");
    Ok(submitter)
}
