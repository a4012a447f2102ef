//! File-backed thesaurus.
//!
//! A lexicon is a TOML document with one table per language.  Each key is a
//! headword and its value the list of words sharing its meaning:
//!
//! ```toml
//! [por]
//! documento = ["arquivo", "planilha", "relato"]
//! agendar = ["marcar", "programar", "reservar"]
//! ```
//!
//! Every entry forms a synonym group, so lookups work in both directions.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use agendabot_intent::{StaticSynonyms, SynonymSource};

use crate::error::{AdapterError, Result};

type LexiconFile = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Synonyms loaded from a lexicon file.
#[derive(Debug, Clone, Default)]
pub struct LexiconSynonyms {
    path: Option<PathBuf>,
    table: StaticSynonyms,
    entries: usize,
}

impl LexiconSynonyms {
    /// Parse a lexicon from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Self::parse(text, None)
    }

    /// Load a lexicon file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let lexicon = Self::parse(&text, Some(path))?;
        info!(path = %path.display(), entries = lexicon.entries, "lexicon loaded");
        Ok(lexicon)
    }

    /// Load a lexicon file, falling back to an empty lexicon when it is
    /// missing or malformed.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(lexicon) => lexicon,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "lexicon unavailable, matching without synonyms"
                );
                Self::default()
            }
        }
    }

    fn parse(text: &str, path: Option<&Path>) -> Result<Self> {
        let file: LexiconFile = toml::from_str(text).map_err(|e| AdapterError::Lexicon {
            path: path.map_or_else(|| "<inline>".to_string(), |p| p.display().to_string()),
            reason: e.to_string(),
        })?;

        let mut table = StaticSynonyms::new();
        let mut entries = 0;
        for (language, headwords) in &file {
            for (headword, synonyms) in headwords {
                table.add_group(
                    language,
                    std::iter::once(headword.as_str()).chain(synonyms.iter().map(String::as_str)),
                );
                entries += 1;
            }
        }

        Ok(Self {
            path: path.map(Path::to_path_buf),
            table,
            entries,
        })
    }

    /// The file this lexicon came from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of entries read from the source.
    pub fn entries(&self) -> usize {
        self.entries
    }
}

impl SynonymSource for LexiconSynonyms {
    fn synonyms(&self, word: &str, language: &str) -> agendabot_intent::Result<BTreeSet<String>> {
        self.table.synonyms(word, language)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
