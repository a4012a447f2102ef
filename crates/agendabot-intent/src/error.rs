//! Intent engine error types.
//!
//! Errors here never reach the user: the matcher treats a failed synonym
//! lookup as "no synonyms" and logs it.  They exist so synonym sources can
//! report what went wrong.

/// Unified error type for the intent engine.
#[derive(Debug, thiserror::Error)]
pub enum IntentError {
    /// A synonym source failed to answer for a word.
    #[error("synonym lookup failed for `{word}` ({language}): {reason}")]
    LookupFailed {
        word: String,
        language: String,
        reason: String,
    },
}

/// Convenience alias used throughout the intent crate.
pub type Result<T> = std::result::Result<T, IntentError>;
