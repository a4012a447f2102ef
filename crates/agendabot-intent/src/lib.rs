//! Intent engine for AgendaBot.
//!
//! This crate provides:
//!
//! - **Lexical matching**: fuzzy keyword detection with synonym expansion
//!   via [`matcher::LexicalMatcher`].
//! - **Synonym sources**: the injectable [`synonyms::SynonymSource`]
//!   capability plus in-memory and cached implementations.
//! - **Intent classification**: priority-ordered mapping of utterances to
//!   [`classifier::Intent`] via [`classifier::IntentClassifier`].

pub mod classifier;
pub mod error;
pub mod matcher;
pub mod synonyms;

pub use classifier::{Classification, Intent, IntentClassifier, MatchVia, frequency_detail_prompt};
pub use error::{IntentError, Result};
pub use matcher::{
    DEFAULT_THRESHOLD, KeywordSet, LexicalMatcher, MatchOutcome, similarity, tokenize,
};
pub use synonyms::{CachedSynonyms, NoSynonyms, PORTUGUESE, StaticSynonyms, SynonymSource};
