//! Adapter error types.
//!
//! All adapter subsystems surface errors through [`AdapterError`].  The
//! scheduling client never lets one escape to the dialogue: it renders the
//! error into a [`SubmissionResult::Failed`] message instead.
//!
//! [`SubmissionResult::Failed`]: agendabot_dialogue::SubmissionResult::Failed

use std::time::Duration;

/// Unified error type for AgendaBot adapters.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// An I/O operation failed within the adapter.
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration error in adapter setup.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// The request never produced a response.
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The service answered with a non-success status.
    #[error("{status} returned by {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The response body was not the expected JSON.
    #[error("invalid response body from {url}: {reason}")]
    Decode { url: String, reason: String },

    /// An operation exceeded its time limit.
    #[error("timeout after {after:?}: request to {url}")]
    Timeout { url: String, after: Duration },

    /// A lexicon file could not be parsed.
    #[error("invalid lexicon {path}: {reason}")]
    Lexicon { path: String, reason: String },
}

/// Convenience alias used throughout the adapters crate.
pub type Result<T> = std::result::Result<T, AdapterError>;
