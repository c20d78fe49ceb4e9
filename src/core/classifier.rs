// File: src/core/classifier.rs
use crate::core::types::Label;

/// Compound scores at or above this value are Positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound scores at or below this value are Negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;
/// Decimal places kept in reported scores.
pub const SCORE_DECIMALS: i32 = 3;

/// Maps a compound score onto a label using closed bounds at ±0.05.
pub fn classify(compound: f64) -> Label {
    if compound >= POSITIVE_THRESHOLD {
        Label::Positive
    } else if compound <= NEGATIVE_THRESHOLD {
        Label::Negative
    } else {
        Label::Neutral
    }
}

pub fn round_score(compound: f64) -> f64 {
    let factor = 10f64.powi(SCORE_DECIMALS);
    (compound * factor).round() / factor
}
