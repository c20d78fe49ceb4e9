// File: src/core/lexicon.rs
use crate::core::trie::PhraseTrie;
use crate::error::{EngineError, LoadFailure, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Valences outside this range are rejected while loading.
pub const VALENCE_BOUND: f64 = 4.0;

const BUNDLED_LEXICON: &str = include_str!("../../data/vader_lexicon.txt");

/// Word (and idiom) valences. Immutable once built and safe to share
/// across threads; every scoring call only reads from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicon {
    words: HashMap<String, f64>,
    idioms: PhraseTrie<f64>,
}

impl Lexicon {
    /// Builds a lexicon from explicit entries. Keys containing whitespace
    /// become idioms; everything is lowercased.
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut lexicon = Self { words: HashMap::new(), idioms: PhraseTrie::new() };
        for (token, valence) in entries {
            lexicon.add(token.as_ref(), valence);
        }
        lexicon.ensure_usable("entries")
    }

    /// The lexicon compiled into the crate.
    pub fn bundled() -> Result<Self> {
        Self::parse("bundled", BUNDLED_LEXICON)
    }

    /// Reads a text lexicon from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let origin = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|e| EngineError::unavailable(&origin, e))?;
        Self::parse(&origin, &text)
    }

    /// Parses `token<TAB>valence[<TAB>...]` lines. Trailing columns (standard
    /// deviation, raw ratings) are ignored. Lines that cannot be read are
    /// skipped; a resource with nothing usable is an error.
    pub fn parse(origin: &str, text: &str) -> Result<Self> {
        let mut lexicon = Self { words: HashMap::new(), idioms: PhraseTrie::new() };
        let mut skipped = 0usize;

        for (line_no, line) in text.lines().enumerate() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let mut columns = line.split('\t');
            let token = columns.next().map(str::trim).unwrap_or("");
            let valence = columns.next().and_then(|v| v.trim().parse::<f64>().ok());

            match valence {
                Some(v) if !token.is_empty() && v.is_finite() && v.abs() <= VALENCE_BOUND => {
                    lexicon.add(token, v);
                }
                _ => {
                    skipped += 1;
                    warn!(origin, line = line_no + 1, "skipping unreadable lexicon line");
                }
            }
        }

        let lexicon = lexicon.ensure_usable(origin)?;
        debug!(
            origin,
            words = lexicon.words.len(),
            idioms = lexicon.idioms.len(),
            skipped,
            "lexicon loaded"
        );
        Ok(lexicon)
    }

    fn add(&mut self, token: &str, valence: f64) {
        let normalized = token.trim().to_lowercase();
        if normalized.is_empty() {
            return;
        }
        if normalized.contains(char::is_whitespace) {
            self.idioms.insert(&normalized, valence);
        } else {
            self.words.insert(normalized, valence);
        }
    }

    pub(crate) fn ensure_usable(self, origin: &str) -> Result<Self> {
        if self.words.is_empty() && self.idioms.is_empty() {
            return Err(EngineError::unavailable(origin, LoadFailure::Empty));
        }
        Ok(self)
    }

    /// Valence of a single normalized token; `None` means out of vocabulary.
    pub fn lookup(&self, normalized: &str) -> Option<f64> {
        self.words.get(normalized).copied()
    }

    pub fn contains(&self, normalized: &str) -> bool {
        self.words.contains_key(normalized)
    }

    /// Longest idiom starting at the first of `words`, as (span, valence).
    pub fn idiom_at<S: AsRef<str>>(&self, words: &[S]) -> Option<(usize, f64)> {
        self.idioms
            .longest_prefix_match(words)
            .map(|(span, &valence)| (span, valence))
    }

    pub fn idiom(&self, phrase: &str) -> Option<f64> {
        self.idioms.get(&phrase.to_lowercase()).copied()
    }

    /// Number of single-word entries.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn idiom_count(&self) -> usize {
        self.idioms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_lexicon_loads() {
        let lexicon = Lexicon::bundled().unwrap();
        assert_eq!(lexicon.lookup("good"), Some(1.9));
        assert_eq!(lexicon.lookup("hate"), Some(-2.7));
        assert!(lexicon.lookup("okay").is_none());
        assert!(lexicon.idiom_count() > 0);
        assert_eq!(lexicon.idiom("Kiss of Death"), Some(-1.5));
    }

    #[test]
    fn bundled_lexicon_covers_everyday_complaints() {
        let lexicon = Lexicon::bundled().unwrap();
        assert!(lexicon.len() > 1000);
        for word in ["nightmare", "sucks", "ridiculous", "hard", "damn", "unprofessional"] {
            assert!(lexicon.lookup(word).is_some_and(|v| v < 0.0), "{word}");
        }
        for word in ["superb", "invaluable", "courteous", "responsive"] {
            assert!(lexicon.lookup(word).is_some_and(|v| v > 0.0), "{word}");
        }
    }

    #[test]
    fn parse_ignores_extra_columns_and_comments() {
        let text = "# comment\n\ngood\t1.9\t0.9\t[2, 1, 2]\n:D\t2.3\nbroken line\nbad\tx\n";
        let lexicon = Lexicon::parse("inline", text).unwrap();
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.lookup("good"), Some(1.9));
        assert_eq!(lexicon.lookup(":d"), Some(2.3));
        assert!(lexicon.lookup("bad").is_none());
    }

    #[test]
    fn out_of_range_valences_are_rejected() {
        let lexicon = Lexicon::parse("inline", "great\t3.1\nmega\t9.0\n").unwrap();
        assert!(lexicon.lookup("mega").is_none());
    }

    #[test]
    fn empty_resource_is_unavailable() {
        let err = Lexicon::parse("inline", "# nothing here\n").unwrap_err();
        assert!(matches!(
            err,
            EngineError::LexiconUnavailable { cause: LoadFailure::Empty, .. }
        ));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let err = Lexicon::from_path(Path::new("/definitely/not/here.txt")).unwrap_err();
        match err {
            EngineError::LexiconUnavailable { origin, cause } => {
                assert!(origin.contains("here.txt"));
                assert!(matches!(cause, LoadFailure::Io(_)));
            }
        }
    }

    #[test]
    fn whitespace_keys_become_idioms() {
        let lexicon = Lexicon::from_entries([("Yeah Right", -2.0), ("yeah", 1.2)]).unwrap();
        assert_eq!(lexicon.len(), 1);
        assert_eq!(lexicon.idiom_at(&["yeah", "right", "sure"]), Some((2, -2.0)));
    }
}
