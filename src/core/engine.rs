use crate::config::EngineConfig;
use crate::core::classifier::classify;
use crate::core::lexicon::Lexicon;
use crate::core::modifiers::ModifierSets;
use crate::core::scorer::HeuristicScorer;
use crate::core::tokenizer::tokenize;
use crate::core::types::{PolarityScores, SentimentResult, TokenContribution};
use crate::error::{EngineError, Result};
use std::sync::{Arc, OnceLock};
use tracing::debug;

static SHARED_ENGINE: OnceLock<Result<SentimentEngine>> = OnceLock::new();

// The engine is the lexicon, the modifier sets and the scoring pipeline
// over them. It holds no per-call state, so one instance serves any number
// of threads.
#[derive(Debug, Clone)]
pub struct SentimentEngine {
    lexicon: Arc<Lexicon>,
    modifiers: Arc<ModifierSets>,
}

impl SentimentEngine {
    pub fn new(lexicon: Arc<Lexicon>, modifiers: Arc<ModifierSets>) -> Self {
        Self { lexicon, modifiers }
    }

    /// An engine over `lexicon` with the standard modifier sets.
    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self::new(Arc::new(lexicon), Arc::new(ModifierSets::standard()))
    }

    pub fn bundled() -> Result<Self> {
        Lexicon::bundled().map(Self::with_lexicon)
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let lexicon = config.lexicon.load()?;
        debug!(source = %config.lexicon.describe(), words = lexicon.len(), "engine ready");
        Ok(Self::with_lexicon(lexicon))
    }

    /// Process-wide engine configured from the environment. The first call
    /// loads the lexicon; later calls return the same engine, or the same
    /// error if that first load failed.
    pub fn shared() -> std::result::Result<&'static SentimentEngine, &'static EngineError> {
        SHARED_ENGINE
            .get_or_init(|| Self::from_config(&EngineConfig::from_env()))
            .as_ref()
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn modifiers(&self) -> &ModifierSets {
        &self.modifiers
    }

    pub fn scorer(&self) -> HeuristicScorer<'_> {
        HeuristicScorer::new(&self.lexicon, &self.modifiers)
    }

    /// Compound score in [-1, 1].
    pub fn score(&self, text: &str) -> f64 {
        self.scorer().score(&tokenize(text))
    }

    pub fn polarity_scores(&self, text: &str) -> PolarityScores {
        self.scorer().polarity(&tokenize(text))
    }

    pub fn analyze(&self, text: &str) -> SentimentResult {
        let compound = self.score(text);
        SentimentResult {
            compound,
            label: classify(compound),
        }
    }

    /// Per-word contributions after all contextual rules.
    pub fn explain(&self, text: &str) -> Vec<TokenContribution> {
        self.scorer().contributions(&tokenize(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Label;

    #[test]
    fn analyze_labels_the_reference_examples() {
        let engine = SentimentEngine::bundled().unwrap();
        assert_eq!(engine.analyze("I love this").label, Label::Positive);
        assert_eq!(engine.analyze("It's okay").label, Label::Neutral);
        assert_eq!(engine.analyze("I hate this").label, Label::Negative);
        assert_eq!(engine.analyze(""), SentimentResult::neutral());
    }

    #[test]
    fn everyday_complaints_are_negative() {
        let engine = SentimentEngine::bundled().unwrap();
        for text in ["this process is a nightmare", "the portal sucks", "ridiculous delays"] {
            assert_eq!(engine.analyze(text).label, Label::Negative, "{text}");
        }
    }

    #[test]
    fn synthetic_lexicon_is_isolated_from_the_bundled_one() {
        let lexicon = Lexicon::from_entries([("zorp", 2.0)]).unwrap();
        let engine = SentimentEngine::with_lexicon(lexicon);
        assert!(engine.score("zorp") > 0.0);
        assert_eq!(engine.score("love"), 0.0);
    }

    #[test]
    fn shared_engine_is_initialised_once() {
        let first = SentimentEngine::shared().unwrap();
        let second = SentimentEngine::shared().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn explain_matches_the_score() {
        let engine = SentimentEngine::bundled().unwrap();
        let parts = engine.explain("terrible");
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].valence, -2.1);
        assert!(engine.polarity_scores("terrible").neg > 0.99);
    }
}
