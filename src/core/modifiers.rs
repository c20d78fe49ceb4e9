// File: src/core/modifiers.rs
use crate::core::trie::PhraseTrie;
use crate::error::{EngineError, LoadFailure, Result};
use std::collections::{HashMap, HashSet};

/// Scalar added by an intensifying booster ("very", "extremely").
pub const B_INCR: f64 = 0.293;
/// Scalar added by a dampening booster ("slightly", "kind of").
pub const B_DECR: f64 = -0.293;

const NEGATORS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt",
    "ain't", "aren't", "can't", "couldn't", "daren't", "didn't", "doesn't",
    "dont", "hadnt", "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither",
    "don't", "hadn't", "hasn't", "haven't", "isn't", "mightn't", "mustn't",
    "neednt", "needn't", "never", "none", "nope", "nor", "not", "nothing",
    "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent",
    "oughtn't", "shan't", "shouldn't", "uh-uh", "wasn't", "weren't", "without",
    "wont", "wouldnt", "won't", "wouldn't", "rarely", "seldom", "despite",
];

const INCREMENTS: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerable",
    "considerably", "decidedly", "deeply", "effing", "enormous", "enormously",
    "entirely", "especially", "exceptional", "exceptionally", "extreme",
    "extremely", "fabulously", "flipping", "flippin", "frackin", "fracking",
    "fricking", "frickin", "frigging", "friggin", "fully", "fuckin", "fucking",
    "fuggin", "fugging", "greatly", "hella", "highly", "hugely", "incredible",
    "incredibly", "intensely", "major", "majorly", "more", "most",
    "particularly", "purely", "quite", "really", "remarkably", "so",
    "substantially", "thoroughly", "total", "totally", "tremendous",
    "tremendously", "uber", "unbelievably", "unusually", "utter", "utterly",
    "very",
];

const DECREMENTS: &[&str] = &[
    "almost", "barely", "hardly", "just enough", "kind of", "kinda", "kindof",
    "kind-of", "less", "little", "marginal", "marginally", "occasional",
    "occasionally", "partly", "scarce", "scarcely", "slight", "slightly",
    "somewhat", "sort of", "sorta", "sortof", "sort-of",
];

const CONTRASTIVE: &[&str] = &["but", "however"];

/// Negators, boosters and contrastive markers. The three sets are disjoint.
#[derive(Debug, Clone)]
pub struct ModifierSets {
    negators: HashSet<String>,
    boosters: HashMap<String, f64>,
    booster_phrases: PhraseTrie<f64>,
    contrastive: HashSet<String>,
}

impl Default for ModifierSets {
    fn default() -> Self {
        Self::standard()
    }
}

impl ModifierSets {
    /// The reference word lists.
    pub fn standard() -> Self {
        let mut sets = Self::empty();
        sets.negators.extend(NEGATORS.iter().map(|w| w.to_string()));
        for &word in INCREMENTS {
            sets.add_booster(word, B_INCR);
        }
        for &word in DECREMENTS {
            sets.add_booster(word, B_DECR);
        }
        sets.contrastive.extend(CONTRASTIVE.iter().map(|w| w.to_string()));
        sets
    }

    /// Custom modifier sets, e.g. for tests with a synthetic vocabulary.
    /// Fails if a word belongs to more than one set.
    pub fn new<N, B, C, S>(negators: N, boosters: B, contrastive: C) -> Result<Self>
    where
        N: IntoIterator<Item = S>,
        B: IntoIterator<Item = (S, f64)>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sets = Self::empty();
        sets.negators
            .extend(negators.into_iter().map(|w| w.as_ref().to_lowercase()));
        for (word, delta) in boosters {
            let word = word.as_ref().to_lowercase();
            if sets.negators.contains(&word) {
                return Err(overlap(word));
            }
            sets.add_booster(&word, delta);
        }
        for word in contrastive {
            let word = word.as_ref().to_lowercase();
            if sets.negators.contains(&word) || sets.booster(&word).is_some() {
                return Err(overlap(word));
            }
            sets.contrastive.insert(word);
        }
        Ok(sets)
    }

    fn empty() -> Self {
        Self {
            negators: HashSet::new(),
            boosters: HashMap::new(),
            booster_phrases: PhraseTrie::new(),
            contrastive: HashSet::new(),
        }
    }

    fn add_booster(&mut self, word: &str, delta: f64) {
        if word.contains(char::is_whitespace) {
            self.booster_phrases.insert(word, delta);
        } else {
            self.boosters.insert(word.to_string(), delta);
        }
    }

    /// A negating word, including any contraction ending in "n't".
    pub fn is_negator(&self, normalized: &str) -> bool {
        self.negators.contains(normalized) || normalized.contains("n't")
    }

    pub fn booster(&self, normalized: &str) -> Option<f64> {
        self.boosters.get(normalized).copied()
    }

    /// Longest booster phrase starting at the first of `words`.
    pub fn booster_phrase_at<S: AsRef<str>>(&self, words: &[S]) -> Option<(usize, f64)> {
        self.booster_phrases
            .longest_prefix_match(words)
            .map(|(span, &delta)| (span, delta))
    }

    /// Booster phrase that ends with the last of `words`.
    pub fn booster_phrase_ending<S: AsRef<str>>(&self, words: &[S]) -> Option<f64> {
        self.booster_phrases
            .longest_suffix_match(words)
            .map(|(_, &delta)| delta)
    }

    pub fn is_contrastive(&self, normalized: &str) -> bool {
        self.contrastive.contains(normalized)
    }
}

fn overlap(word: String) -> EngineError {
    EngineError::unavailable("modifiers", LoadFailure::OverlappingModifiers { word })
}
