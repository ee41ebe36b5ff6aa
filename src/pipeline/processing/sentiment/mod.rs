//! Sentiment classification of cleaned feedback.
//!
//! A [`PolarityScorer`] produces a signed score and the sign alone picks the
//! label. Classification is total: a scoring failure becomes `(neutral, 0.0)`.

pub mod lexicon;

use std::sync::Arc;

use once_cell::sync::Lazy;
use serde_json::Value;
use tracing::debug;

use crate::domain::{stringify, Sentiment};
use crate::observability::metrics;

pub use lexicon::{LexiconScorer, PolarityScorer, ScoringFailure};

static DEFAULT_CLASSIFIER: Lazy<SentimentClassifier> = Lazy::new(SentimentClassifier::default);

/// Classify with the embedded lexicon.
pub fn classify(text: &str) -> (Sentiment, f64) {
    DEFAULT_CLASSIFIER.classify(text)
}

/// Maps text to a `(label, score)` pair through a shared scorer
#[derive(Clone)]
pub struct SentimentClassifier {
    scorer: Arc<dyn PolarityScorer>,
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::new(Arc::new(LexiconScorer::new()))
    }
}

impl SentimentClassifier {
    pub fn new(scorer: Arc<dyn PolarityScorer>) -> Self {
        Self { scorer }
    }

    pub fn classify(&self, text: &str) -> (Sentiment, f64) {
        let score = match self.scorer.polarity(text) {
            Ok(score) if score.is_finite() => score,
            Ok(score) => {
                debug!("Scorer returned non-finite polarity {}; using neutral", score);
                metrics::sentiment::scoring_failed();
                0.0
            }
            Err(e) => {
                debug!("Scoring failed ({}); using neutral", e);
                metrics::sentiment::scoring_failed();
                0.0
            }
        };

        // Fold -0.0 into 0.0 so neutral rows always carry exactly zero
        let score = if score == 0.0 { 0.0 } else { score };
        (Sentiment::from_score(score), score)
    }

    /// Classify any cell; non-string cells are stringified first.
    pub fn classify_value(&self, value: &Value) -> (Sentiment, f64) {
        self.classify(&stringify(value))
    }
}
