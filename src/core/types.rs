// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-way sentiment outcome derived from a compound score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    Positive,
    Neutral,
    Negative,
}

impl Label {
    /// All labels in display order.
    pub const ALL: [Label; 3] = [Label::Positive, Label::Neutral, Label::Negative];

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Positive => "Positive",
            Label::Neutral => "Neutral",
            Label::Negative => "Negative",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a token is a word (including emoticons) or a run of `!`/`?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Emphasis,
}

/// A view into the scored text. Lives only for one scoring call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// Surface form exactly as it appeared (punctuation already peeled off).
    pub raw: &'a str,
    /// Lowercased form used for every lexicon and modifier lookup.
    pub normalized: String,
    /// Position in the token sequence.
    pub index: usize,
    pub kind: TokenKind,
}

impl<'a> Token<'a> {
    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }

    /// True for words written entirely in capitals, e.g. "GREAT" or ":D".
    /// Words without any cased letter never count.
    pub fn is_shouted(&self) -> bool {
        let mut has_upper = false;
        for c in self.raw.chars() {
            if c.is_lowercase() {
                return false;
            }
            if c.is_uppercase() {
                has_upper = true;
            }
        }
        has_upper
    }

    pub fn exclamations(&self) -> usize {
        match self.kind {
            TokenKind::Emphasis => self.raw.chars().filter(|&c| c == '!').count(),
            TokenKind::Word => 0,
        }
    }

    pub fn questions(&self) -> usize {
        match self.kind {
            TokenKind::Emphasis => self.raw.chars().filter(|&c| c == '?').count(),
            TokenKind::Word => 0,
        }
    }
}

/// Proportions of positive, neutral and negative signal plus the compound score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarityScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

/// The outcome of scoring a single text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Unrounded compound score in [-1, 1]; the label is derived from this value.
    pub compound: f64,
    pub label: Label,
}

impl SentimentResult {
    pub fn neutral() -> Self {
        Self {
            compound: 0.0,
            label: Label::Neutral,
        }
    }

    /// Compound score rounded for presentation.
    pub fn score(&self) -> f64 {
        crate::core::classifier::round_score(self.compound)
    }

    pub fn to_output(&self) -> AnalysisOutput {
        AnalysisOutput {
            label: self.label,
            score: self.score(),
        }
    }
}

/// The `{label, score}` record handed to outside consumers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutput {
    pub label: Label,
    pub score: f64,
}

/// Per-word contribution, used for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenContribution {
    pub token: String,
    pub valence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(raw: &str) -> Token<'_> {
        Token {
            raw,
            normalized: raw.to_lowercase(),
            index: 0,
            kind: TokenKind::Word,
        }
    }

    #[test]
    fn shouting_requires_a_cased_letter() {
        assert!(word("GREAT").is_shouted());
        assert!(word(":D").is_shouted());
        assert!(!word("Great").is_shouted());
        assert!(!word(":)").is_shouted());
        assert!(!word("123").is_shouted());
    }

    #[test]
    fn label_serializes_as_its_name() {
        let json = serde_json::to_string(&Label::Negative).unwrap();
        assert_eq!(json, "\"Negative\"");
    }

    #[test]
    fn output_rounds_to_three_places() {
        let result = SentimentResult {
            compound: 0.63694,
            label: Label::Positive,
        };
        assert_eq!(result.to_output().score, 0.637);
    }
}
