//! Synonym lookup capability.
//!
//! The lexical matcher expands unmatched words through a [`SynonymSource`].
//! Sources are injected rather than global so that tests can swap in a
//! deterministic table.  Lookups may be slow (disk, remote thesaurus), which
//! is what [`CachedSynonyms`] is for.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use moka::sync::Cache;
use tracing::debug;

use crate::error::Result;

/// ISO 639-3 tag of the bot's operating language (Portuguese).
pub const PORTUGUESE: &str = "por";

/// Default number of `(language, word)` entries kept by [`CachedSynonyms`].
const DEFAULT_CACHE_CAPACITY: u64 = 4_096;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Something that can answer "which words mean the same as this one".
///
/// A word with no synonyms yields an empty set, not an error.  Errors are
/// reserved for a source that could not be consulted at all.
pub trait SynonymSource: Send + Sync {
    /// Return the synonyms of `word` in `language`.
    fn synonyms(&self, word: &str, language: &str) -> Result<BTreeSet<String>>;
}

impl<S: SynonymSource + ?Sized> SynonymSource for Arc<S> {
    fn synonyms(&self, word: &str, language: &str) -> Result<BTreeSet<String>> {
        (**self).synonyms(word, language)
    }
}

impl<S: SynonymSource + ?Sized> SynonymSource for Box<S> {
    fn synonyms(&self, word: &str, language: &str) -> Result<BTreeSet<String>> {
        (**self).synonyms(word, language)
    }
}

// ---------------------------------------------------------------------------
// NoSynonyms
// ---------------------------------------------------------------------------

/// A source that knows no synonyms at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSynonyms;

impl SynonymSource for NoSynonyms {
    fn synonyms(&self, _word: &str, _language: &str) -> Result<BTreeSet<String>> {
        Ok(BTreeSet::new())
    }
}

// ---------------------------------------------------------------------------
// StaticSynonyms
// ---------------------------------------------------------------------------

/// An in-memory synonym table.
///
/// Words are registered in groups, the way a thesaurus synset groups lemmas:
/// every member of a group is a synonym of every other member.
#[derive(Debug, Clone, Default)]
pub struct StaticSynonyms {
    by_language: HashMap<String, HashMap<String, BTreeSet<String>>>,
}

impl StaticSynonyms {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group of mutually synonymous words for `language`.
    pub fn with_group<I, W>(mut self, language: &str, words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        self.add_group(language, words);
        self
    }

    /// Register a group of mutually synonymous words for `language`.
    pub fn add_group<I, W>(&mut self, language: &str, words: I)
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        let group: Vec<String> = words
            .into_iter()
            .map(|w| w.into().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        let table = self.by_language.entry(language.to_string()).or_default();
        for word in &group {
            let entry = table.entry(word.clone()).or_default();
            entry.extend(group.iter().filter(|other| *other != word).cloned());
        }
    }

    /// Number of headwords known for `language`.
    pub fn len(&self, language: &str) -> usize {
        self.by_language.get(language).map_or(0, HashMap::len)
    }

    /// Whether the table has no entries for `language`.
    pub fn is_empty(&self, language: &str) -> bool {
        self.len(language) == 0
    }
}

impl SynonymSource for StaticSynonyms {
    fn synonyms(&self, word: &str, language: &str) -> Result<BTreeSet<String>> {
        Ok(self
            .by_language
            .get(language)
            .and_then(|table| table.get(word))
            .cloned()
            .unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// CachedSynonyms
// ---------------------------------------------------------------------------

/// Memoizes another source, one cache per conversation session.
///
/// Only successful lookups are cached, so a transient failure is retried the
/// next time the word comes up.
pub struct CachedSynonyms<S> {
    inner: S,
    cache: Cache<(String, String), Arc<BTreeSet<String>>>,
}

impl<S: SynonymSource> CachedSynonyms<S> {
    /// Wrap `inner` with the default cache capacity.
    pub fn new(inner: S) -> Self {
        Self::with_capacity(inner, DEFAULT_CACHE_CAPACITY)
    }

    /// Wrap `inner`, keeping at most `capacity` entries.
    pub fn with_capacity(inner: S, capacity: u64) -> Self {
        Self {
            inner,
            cache: Cache::new(capacity),
        }
    }

    /// Access the wrapped source.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: SynonymSource> SynonymSource for CachedSynonyms<S> {
    fn synonyms(&self, word: &str, language: &str) -> Result<BTreeSet<String>> {
        let key = (language.to_string(), word.to_string());
        if let Some(hit) = self.cache.get(&key) {
            debug!(word, language, "synonym cache hit");
            return Ok((*hit).clone());
        }

        let found = self.inner.synonyms(word, language)?;
        self.cache.insert(key, Arc::new(found.clone()));
        Ok(found)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
