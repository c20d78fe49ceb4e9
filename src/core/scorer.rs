// File: src/core/scorer.rs
use crate::core::lexicon::Lexicon;
use crate::core::modifiers::ModifierSets;
use crate::core::types::{PolarityScores, Token, TokenContribution};

/// Magnitude added to an ALL-CAPS word (or booster) when the text mixes case.
pub const C_INCR: f64 = 0.733;
/// Negation flips the sign and damps the magnitude by this factor.
pub const N_SCALAR: f64 = -0.74;
/// Constant in `x / sqrt(x^2 + alpha)`.
pub const NORMALIZATION_ALPHA: f64 = 15.0;
pub const EXCLAMATION_BOOST: f64 = 0.292;
pub const MAX_EXCLAMATIONS: usize = 4;
pub const QUESTION_BOOST: f64 = 0.18;
pub const MAX_QUESTION_BOOST: f64 = 0.96;
/// How many preceding words are inspected for negators and boosters.
pub const NEGATION_WINDOW: usize = 3;
/// Booster influence by distance (1, 2, 3 words back).
pub const LOOKBACK_DECAY: [f64; NEGATION_WINDOW] = [1.0, 0.95, 0.9];
/// "never so good" intensifies instead of negating.
pub const NEVER_SO_BOOST: f64 = 1.25;
pub const CONTRAST_BEFORE_WEIGHT: f64 = 0.5;
pub const CONTRAST_AFTER_WEIGHT: f64 = 1.5;

/// Compresses an unbounded valence sum into [-1, 1].
pub fn normalize(sum: f64) -> f64 {
    let score = sum / (sum * sum + NORMALIZATION_ALPHA).sqrt();
    score.clamp(-1.0, 1.0)
}

/// Amplifier contributed by `!` and `?` emphasis runs.
pub fn punctuation_emphasis(tokens: &[Token<'_>]) -> f64 {
    let exclamations: usize = tokens.iter().map(Token::exclamations).sum();
    let questions: usize = tokens.iter().map(Token::questions).sum();

    let ep = exclamations.min(MAX_EXCLAMATIONS) as f64 * EXCLAMATION_BOOST;
    let qm = match questions {
        0 | 1 => 0.0,
        2..=3 => questions as f64 * QUESTION_BOOST,
        _ => MAX_QUESTION_BOOST,
    };
    ep + qm
}

/// Walks a token sequence and turns lexicon valences into a compound score,
/// applying negation, boosters, capitals, idioms, contrast and punctuation.
pub struct HeuristicScorer<'l> {
    lexicon: &'l Lexicon,
    modifiers: &'l ModifierSets,
}

impl<'l> HeuristicScorer<'l> {
    pub fn new(lexicon: &'l Lexicon, modifiers: &'l ModifierSets) -> Self {
        Self { lexicon, modifiers }
    }

    /// Compound score in [-1, 1]. No words means exactly 0.0.
    pub fn score(&self, tokens: &[Token<'_>]) -> f64 {
        self.polarity(tokens).compound
    }

    pub fn polarity(&self, tokens: &[Token<'_>]) -> PolarityScores {
        let words: Vec<&Token<'_>> = tokens.iter().filter(|t| t.is_word()).collect();
        let sentiments = self.sentiments(&words);
        summarize(&sentiments, punctuation_emphasis(tokens))
    }

    /// Final per-word valences, after every contextual rule.
    pub fn contributions(&self, tokens: &[Token<'_>]) -> Vec<TokenContribution> {
        let words: Vec<&Token<'_>> = tokens.iter().filter(|t| t.is_word()).collect();
        let sentiments = self.sentiments(&words);
        words
            .iter()
            .zip(sentiments)
            .map(|(token, valence)| TokenContribution {
                token: token.raw.to_string(),
                valence,
            })
            .collect()
    }

    fn sentiments(&self, words: &[&Token<'_>]) -> Vec<f64> {
        let normalized: Vec<&str> = words.iter().map(|t| t.normalized.as_str()).collect();
        let cap_diff = cap_differential(words);
        let mut sentiments = vec![0.0; words.len()];

        let mut i = 0;
        while i < words.len() {
            let rest = &normalized[i..];
            let idiom = self.lexicon.idiom_at(rest);
            let booster_span = self.modifiers.booster_phrase_at(rest).map(|(span, _)| span);

            // Longest phrase wins; an idiom wins a tie.
            match (idiom, booster_span) {
                (Some((span, valence)), other) if other.map_or(true, |b| span >= b) => {
                    sentiments[i] = self.contextual(valence, words, &normalized, i, cap_diff, false);
                    i += span;
                    continue;
                }
                (_, Some(span)) => {
                    i += span;
                    continue;
                }
                _ => {}
            }

            let word = normalized[i];
            if self.modifiers.booster(word).is_none() {
                if let Some(base) = self.lexicon.lookup(word) {
                    sentiments[i] = self.contextual(base, words, &normalized, i, cap_diff, true);
                }
            }
            i += 1;
        }

        self.apply_contrast(&normalized, &mut sentiments);
        sentiments
    }

    /// Valence of the word (or idiom) at `i` once its neighbours are considered.
    fn contextual(
        &self,
        base: f64,
        words: &[&Token<'_>],
        normalized: &[&str],
        i: usize,
        cap_diff: bool,
        single_word: bool,
    ) -> f64 {
        let mut valence = base;

        if single_word
            && normalized[i] == "no"
            && i + 1 < normalized.len()
            && self.lexicon.contains(normalized[i + 1])
        {
            valence = 0.0;
        }
        if preceded_by_no(normalized, i) {
            valence = base * N_SCALAR;
        }

        if single_word && cap_diff && words[i].is_shouted() {
            if valence > 0.0 {
                valence += C_INCR;
            } else {
                valence -= C_INCR;
            }
        }

        for (start, decay) in LOOKBACK_DECAY.iter().enumerate() {
            if i <= start {
                break;
            }
            let j = i - (start + 1);
            if self.lexicon.contains(normalized[j]) {
                continue;
            }
            valence += self.booster_scalar(words[j], valence, cap_diff) * decay;
            valence = self.negation_check(valence, normalized, start, i);
        }

        if let Some(delta) = self.modifiers.booster_phrase_ending(&normalized[..i]) {
            valence += if valence < 0.0 { -delta } else { delta };
        }

        self.least_check(valence, normalized, i)
    }

    fn booster_scalar(&self, token: &Token<'_>, valence: f64, cap_diff: bool) -> f64 {
        let Some(mut scalar) = self.modifiers.booster(&token.normalized) else {
            return 0.0;
        };
        if valence < 0.0 {
            scalar = -scalar;
        }
        if cap_diff && token.is_shouted() {
            if valence > 0.0 {
                scalar += C_INCR;
            } else {
                scalar -= C_INCR;
            }
        }
        scalar
    }

    fn negation_check(&self, valence: f64, n: &[&str], start: usize, i: usize) -> f64 {
        let so_or_this = |w: &str| w == "so" || w == "this";
        match start {
            0 => {
                if self.modifiers.is_negator(n[i - 1]) {
                    return valence * N_SCALAR;
                }
            }
            1 => {
                if n[i - 2] == "never" && so_or_this(n[i - 1]) {
                    return valence * NEVER_SO_BOOST;
                } else if n[i - 2] == "without" && n[i - 1] == "doubt" {
                    return valence;
                } else if self.modifiers.is_negator(n[i - 2]) {
                    return valence * N_SCALAR;
                }
            }
            _ => {
                if n[i - 3] == "never" && (so_or_this(n[i - 2]) || so_or_this(n[i - 1])) {
                    return valence * NEVER_SO_BOOST;
                } else if n[i - 3] == "without" && (n[i - 2] == "doubt" || n[i - 1] == "doubt") {
                    return valence;
                } else if self.modifiers.is_negator(n[i - 3]) {
                    return valence * N_SCALAR;
                }
            }
        }
        valence
    }

    // "least" negates the next word, except in "at least" / "very least".
    fn least_check(&self, valence: f64, n: &[&str], i: usize) -> f64 {
        if i == 0 || n[i - 1] != "least" || self.lexicon.contains(n[i - 1]) {
            return valence;
        }
        if i > 1 && (n[i - 2] == "at" || n[i - 2] == "very") {
            return valence;
        }
        valence * N_SCALAR
    }

    fn apply_contrast(&self, normalized: &[&str], sentiments: &mut [f64]) {
        let Some(marker) = normalized.iter().position(|w| self.modifiers.is_contrastive(w)) else {
            return;
        };
        for (idx, sentiment) in sentiments.iter_mut().enumerate() {
            if idx < marker {
                *sentiment *= CONTRAST_BEFORE_WEIGHT;
            } else if idx > marker {
                *sentiment *= CONTRAST_AFTER_WEIGHT;
            }
        }
    }
}

fn preceded_by_no(n: &[&str], i: usize) -> bool {
    (i > 0 && n[i - 1] == "no")
        || (i > 1 && n[i - 2] == "no")
        || (i > 2 && n[i - 3] == "no" && (n[i - 1] == "or" || n[i - 1] == "nor"))
}

/// True when some, but not all, words are shouted.
fn cap_differential(words: &[&Token<'_>]) -> bool {
    let shouted = words.iter().filter(|t| t.is_shouted()).count();
    let differential = words.len() - shouted;
    differential > 0 && differential < words.len()
}

fn summarize(sentiments: &[f64], amplifier: f64) -> PolarityScores {
    if sentiments.is_empty() {
        return PolarityScores::default();
    }

    let sum: f64 = sentiments.iter().sum();
    let emphasized = if sum > 0.0 {
        sum + amplifier
    } else if sum < 0.0 {
        sum - amplifier
    } else {
        sum
    };
    let compound = normalize(emphasized);

    // Each non-neutral word also carries one unit of its own class, so
    // neutral words do not swamp the proportions.
    let mut pos_sum = 0.0;
    let mut neg_sum = 0.0;
    let mut neu_count = 0.0;
    for &s in sentiments {
        if s > 0.0 {
            pos_sum += s + 1.0;
        } else if s < 0.0 {
            neg_sum += s - 1.0;
        } else {
            neu_count += 1.0;
        }
    }
    if pos_sum > f64::abs(neg_sum) {
        pos_sum += amplifier;
    } else if pos_sum < f64::abs(neg_sum) {
        neg_sum -= amplifier;
    }

    let total = pos_sum + f64::abs(neg_sum) + neu_count;
    PolarityScores {
        neg: (neg_sum / total).abs(),
        neu: (neu_count / total).abs(),
        pos: (pos_sum / total).abs(),
        compound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tokenizer::tokenize;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    fn fixture() -> (Lexicon, ModifierSets) {
        (Lexicon::bundled().unwrap(), ModifierSets::standard())
    }

    fn score(text: &str) -> f64 {
        let (lexicon, modifiers) = fixture();
        HeuristicScorer::new(&lexicon, &modifiers).score(&tokenize(text))
    }

    #[test]
    fn single_word_matches_the_normalization_curve() {
        assert!(approx(score("good"), 1.9 / (1.9f64 * 1.9 + 15.0).sqrt()));
        assert!(approx(score("good"), 0.4404));
    }

    #[test]
    fn negation_damps_and_flips() {
        let negated = score("not good");
        assert!(approx(negated, normalize(1.9 * N_SCALAR)));
        assert!(negated < 0.0);
        assert!(negated > -score("good"));
    }

    #[test]
    fn negation_reaches_three_words_back() {
        assert!(score("not at all good") < 0.0);
        assert!(score("this is never so good") > score("good"));
        assert!(score("without doubt good") > 0.0);
    }

    #[test]
    fn boosters_scale_in_the_direction_of_the_word() {
        assert!(approx(score("very good"), normalize(1.9 + 0.293)));
        assert!(approx(score("very bad"), normalize(-2.5 - 0.293)));
        assert!(approx(score("slightly good"), normalize(1.9 - 0.293)));
        assert!(approx(score("kind of good"), normalize(1.9 - 0.293)));
    }

    #[test]
    fn caps_only_count_when_case_is_mixed() {
        assert!(approx(score("GOOD day"), normalize(1.9 + C_INCR)));
        assert!(approx(score("GOOD DAY"), score("good day")));
    }

    #[test]
    fn exclamations_amplify_up_to_the_cap() {
        assert!(approx(score("good!!!"), normalize(1.9 + 3.0 * EXCLAMATION_BOOST)));
        assert!(approx(score("good!!!!!!!"), normalize(1.9 + 4.0 * EXCLAMATION_BOOST)));
        assert!(approx(score("bad!!"), normalize(-2.5 - 2.0 * EXCLAMATION_BOOST)));
    }

    #[test]
    fn exclamations_count_before_closing_punctuation() {
        let loud = score("good!!!");
        assert!(approx(score("good!!!."), loud));
        assert!(approx(score("(good!!!)"), loud));
        assert!(score("\"thanks!!\"") > score("thanks"));
    }

    #[test]
    fn question_marks_amplify_only_in_runs() {
        assert!(approx(score("good?"), score("good")));
        assert!(approx(score("good??"), normalize(1.9 + 2.0 * QUESTION_BOOST)));
        assert!(approx(score("good?????"), normalize(1.9 + MAX_QUESTION_BOOST)));
    }

    #[test]
    fn contrast_favours_the_later_clause() {
        let s = score("the food was good but the service was terrible");
        assert!(approx(s, normalize(1.9 * 0.5 - 2.1 * 1.5)));
        assert!(score("it was bad however the staff were great") > 0.0);
    }

    #[test]
    fn idioms_override_their_words() {
        assert!(score("yeah right") < 0.0);
        assert!(score("the new portal is the bomb") > 0.0);
        assert!(score("that bomb") < 0.0);
    }

    #[test]
    fn no_before_a_sentiment_word() {
        assert!(approx(score("no problems"), normalize(-1.7 * N_SCALAR)));
        assert!(score("no") < 0.0);
    }

    #[test]
    fn least_negates_except_at_least() {
        assert!(score("the least helpful reply") < 0.0);
        assert!(score("at least helpful") > 0.0);
    }

    #[test]
    fn nothing_to_score_is_exactly_zero() {
        let (lexicon, modifiers) = fixture();
        let scorer = HeuristicScorer::new(&lexicon, &modifiers);
        assert_eq!(scorer.polarity(&tokenize("")), PolarityScores::default());
        assert_eq!(scorer.score(&tokenize("!!!")), 0.0);
        assert_eq!(scorer.score(&tokenize("the table")), 0.0);
    }

    #[test]
    fn proportions_sum_to_one() {
        let (lexicon, modifiers) = fixture();
        let scorer = HeuristicScorer::new(&lexicon, &modifiers);
        let p = scorer.polarity(&tokenize("The staff were great but parking was awful!"));
        assert!(approx(p.neg + p.neu + p.pos, 1.0));
        assert!(p.pos > 0.0 && p.neg > 0.0 && p.neu > 0.0);
    }

    #[test]
    fn contributions_line_up_with_words() {
        let (lexicon, modifiers) = fixture();
        let scorer = HeuristicScorer::new(&lexicon, &modifiers);
        let parts = scorer.contributions(&tokenize("very good service!"));
        let tokens: Vec<&str> = parts.iter().map(|c| c.token.as_str()).collect();
        assert_eq!(tokens, vec!["very", "good", "service"]);
        assert_eq!(parts[0].valence, 0.0);
        assert!(approx(parts[1].valence, 1.9 + 0.293));
    }
}
