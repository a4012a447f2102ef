//! Lexical matcher -- fuzzy and synonym-based keyword detection.
//!
//! For every word of an utterance, in order:
//!
//! 1. Look for the single best keyword whose similarity ratio with the word
//!    is at least the threshold.
//! 2. Failing that, ask the [`SynonymSource`] for the word's synonyms and try
//!    the same near-match for each of them.
//!
//! The first hit wins.  Lookup failures count as "no synonyms".

use difflib::sequencematcher::SequenceMatcher;
use tracing::{debug, warn};

use crate::synonyms::{PORTUGUESE, SynonymSource};

/// Default similarity cutoff for a near-match.
pub const DEFAULT_THRESHOLD: f64 = 0.8;

// ---------------------------------------------------------------------------
// Keyword sets
// ---------------------------------------------------------------------------

/// An ordered, immutable set of canonical domain terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Build a keyword set.  Terms are lower-cased and deduplicated, keeping
    /// first-seen order.
    pub fn new<I, W>(keywords: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for kw in keywords {
            let kw = kw.as_ref().trim().to_lowercase();
            if !kw.is_empty() && !out.contains(&kw) {
                out.push(kw);
            }
        }
        Self { keywords: out }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// The keyword most similar to `candidate`, if its ratio reaches
    /// `threshold`.  Earlier keywords win ties.
    pub fn best_match(&self, candidate: &str, threshold: f64) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for kw in self.iter() {
            let score = similarity(candidate, kw);
            if score < threshold {
                continue;
            }
            match best {
                Some((_, s)) if s >= score => {}
                _ => best = Some((kw, score)),
            }
        }
        best
    }
}

/// Similarity ratio in `[0.0, 1.0]` of `candidate` against `keyword`.
///
/// Ratcliff/Obershelp: twice the number of characters in matching blocks
/// over the combined length.  Compared per `char`, so an accented letter
/// counts once.
pub fn similarity(candidate: &str, keyword: &str) -> f64 {
    let keyword: Vec<char> = keyword.chars().collect();
    let candidate: Vec<char> = candidate.chars().collect();
    let mut matcher = SequenceMatcher::<char>::new(keyword.as_slice(), candidate.as_slice());
    f64::from(matcher.ratio())
}

/// Split an utterance into words.
///
/// Anything that is neither alphanumeric nor a hyphen separates words, so
/// "segunda-feira" stays whole while punctuation is dropped.
pub fn tokenize(utterance: &str) -> Vec<&str> {
    utterance
        .split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .filter(|w| !w.is_empty())
        .collect()
}

// ---------------------------------------------------------------------------
// Matcher
// ---------------------------------------------------------------------------

/// Details of a successful match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// The utterance token that produced the match.
    pub token: String,
    /// The synonym of `token` that matched, when the direct comparison failed.
    pub synonym: Option<String>,
    /// The keyword that was hit.
    pub keyword: String,
    /// Similarity ratio of the winning comparison.
    pub score: f64,
}

/// Fuzzy keyword matcher backed by an injected synonym source.
pub struct LexicalMatcher<S> {
    synonyms: S,
    language: String,
    threshold: f64,
}

impl<S: SynonymSource> LexicalMatcher<S> {
    /// Create a matcher for Portuguese with the default threshold.
    pub fn new(synonyms: S) -> Self {
        Self {
            synonyms,
            language: PORTUGUESE.to_string(),
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Override the similarity threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Override the language passed to the synonym source.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Whether any word of `utterance`, or any of its synonyms, is close
    /// enough to a keyword.
    pub fn matches(&self, utterance: &str, keywords: &KeywordSet) -> bool {
        self.find(utterance, keywords).is_some()
    }

    /// Like [`matches`](Self::matches), reporting what matched.
    pub fn find(&self, utterance: &str, keywords: &KeywordSet) -> Option<MatchOutcome> {
        if keywords.is_empty() {
            return None;
        }

        for token in tokenize(utterance) {
            if let Some((keyword, score)) = keywords.best_match(token, self.threshold) {
                debug!(token, keyword, score, "direct keyword match");
                return Some(MatchOutcome {
                    token: token.to_string(),
                    synonym: None,
                    keyword: keyword.to_string(),
                    score,
                });
            }

            let synonyms = match self.synonyms.synonyms(token, &self.language) {
                Ok(s) => s,
                Err(e) => {
                    warn!(token, error = %e, "synonym lookup failed, continuing without synonyms");
                    continue;
                }
            };

            for synonym in synonyms {
                let synonym = synonym.replace('_', " ").to_lowercase();
                if let Some((keyword, score)) = keywords.best_match(&synonym, self.threshold) {
                    debug!(token, synonym = %synonym, keyword, score, "synonym keyword match");
                    return Some(MatchOutcome {
                        token: token.to_string(),
                        synonym: Some(synonym.clone()),
                        keyword: keyword.to_string(),
                        score,
                    });
                }
            }
        }

        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::{IntentError, Result};
    use crate::synonyms::{NoSynonyms, StaticSynonyms};

    struct CountingFailure(AtomicUsize);

    impl SynonymSource for CountingFailure {
        fn synonyms(&self, word: &str, language: &str) -> Result<BTreeSet<String>> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(IntentError::LookupFailed {
                word: word.into(),
                language: language.into(),
                reason: "resource not downloaded".into(),
            })
        }
    }

    fn report_keywords() -> KeywordSet {
        KeywordSet::new(["relatório", "csv", "documento"])
    }

    #[test]
    fn tokenize_drops_punctuation_keeps_hyphens() {
        assert_eq!(
            tokenize("olá, quero um relatório! segunda-feira?"),
            vec!["olá", "quero", "um", "relatório", "segunda-feira"]
        );
        assert!(tokenize("  ...  ").is_empty());
    }

    #[test]
    fn exact_keyword_matches() {
        let m = LexicalMatcher::new(NoSynonyms);
        assert!(m.matches("preciso de um csv", &report_keywords()));
    }

    #[test]
    fn accentless_spelling_is_close_enough() {
        let m = LexicalMatcher::new(NoSynonyms);
        let hit = m.find("quero um relatorio", &report_keywords()).unwrap();
        assert_eq!(hit.keyword, "relatório");
        assert_eq!(hit.token, "relatorio");
        assert!(hit.score >= DEFAULT_THRESHOLD && hit.score < 1.0);
    }

    #[test]
    fn ratio_counts_matching_blocks() {
        assert!((similarity("relatório", "relatório") - 1.0).abs() < 1e-6);
        assert!((similarity("relatorio", "relatório") - 16.0 / 18.0).abs() < 1e-6);
        assert!((similarity("agnedar", "agendar") - 12.0 / 14.0).abs() < 1e-6);
        assert!(similarity("dia", "documento") < 0.5);
    }

    #[test]
    fn inflections_and_typos_reach_the_threshold() {
        let m = LexicalMatcher::new(NoSynonyms);
        for (word, keyword) in [
            ("mensagens", "mensagem"),
            ("cancelado", "cancelar"),
            ("agendado", "agendar"),
            ("agnedar", "agendar"),
            ("cs", "csv"),
        ] {
            let hit = m
                .find(word, &KeywordSet::new([keyword]))
                .unwrap_or_else(|| panic!("{word} should match {keyword}"));
            assert_eq!(hit.keyword, keyword);
            assert!(hit.score >= DEFAULT_THRESHOLD, "{word}: {}", hit.score);
        }
    }

    #[test]
    fn unrelated_words_do_not_match() {
        let m = LexicalMatcher::new(NoSynonyms);
        assert!(!m.matches("bom dia tudo bem", &report_keywords()));
    }

    #[test]
    fn synonym_expansion_matches() {
        let table = StaticSynonyms::new().with_group(PORTUGUESE, ["planilha", "documento"]);
        let m = LexicalMatcher::new(table);
        let hit = m.find("me manda a planilha", &report_keywords()).unwrap();
        assert_eq!(hit.synonym.as_deref(), Some("documento"));
        assert_eq!(hit.keyword, "documento");
    }

    #[test]
    fn underscored_lemmas_become_phrases() {
        let keywords = KeywordSet::new(["fazer agendamento"]);
        let table = StaticSynonyms::new().with_group(PORTUGUESE, ["reservar", "fazer_agendamento"]);
        let m = LexicalMatcher::new(table);
        assert!(m.matches("reservar", &keywords));
    }

    #[test]
    fn empty_inputs_never_consult_synonyms() {
        let m = LexicalMatcher::new(CountingFailure(AtomicUsize::new(0)));
        assert!(!m.matches("", &report_keywords()));
        assert!(!m.matches("qualquer coisa", &KeywordSet::new(Vec::<&str>::new())));
        assert_eq!(m.synonyms.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn lookup_failures_degrade_to_no_match() {
        let m = LexicalMatcher::new(CountingFailure(AtomicUsize::new(0)));
        assert!(!m.matches("bom dia", &report_keywords()));
        assert_eq!(m.synonyms.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn direct_hit_skips_lookup() {
        let m = LexicalMatcher::new(CountingFailure(AtomicUsize::new(0)));
        assert!(m.matches("csv", &report_keywords()));
        assert_eq!(m.synonyms.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn best_match_prefers_highest_score() {
        let set = KeywordSet::new(["agenda", "agendar"]);
        let (kw, score) = set.best_match("agendar", 0.8).unwrap();
        assert_eq!(kw, "agendar");
        assert!((score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stricter_threshold_rejects_near_miss() {
        let m = LexicalMatcher::new(NoSynonyms).with_threshold(0.95);
        assert!(!m.matches("relatorio", &report_keywords()));
    }

    #[test]
    fn keyword_set_normalizes_and_dedups() {
        let set = KeywordSet::new(["CSV", "csv ", "", "Documento"]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["csv", "documento"]);
        assert_eq!(set.len(), 2);
    }
}
