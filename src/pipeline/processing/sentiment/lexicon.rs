//! Embedded polarity lexicon and the averaging scorer built on it.
//!
//! Word weights are in `[-1.0, 1.0]` and approximate the values of common
//! English opinion lexicons for product and service feedback. Only the sign
//! of the final average is contractual; the magnitudes are a best effort.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

/// Multiplier applied to a sentiment word that follows a negator.
const NEGATION_FACTOR: f64 = -0.5;

/// Failure while scoring one text. Always recovered by the classifier.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringFailure {
    #[error("lexicon weight for '{word}' is not a finite number")]
    NonFiniteWeight { word: String },

    #[error("aggregate polarity is not a finite number")]
    NonFiniteScore,
}

/// Anything that can turn text into a signed polarity.
pub trait PolarityScorer: Send + Sync {
    fn polarity(&self, text: &str) -> Result<f64, ScoringFailure>;
}

const POSITIVE_WORDS: &[(&str, f64)] = &[
    ("excellent", 1.0),
    ("perfect", 1.0),
    ("awesome", 1.0),
    ("best", 1.0),
    ("wonderful", 1.0),
    ("outstanding", 0.5),
    ("superb", 1.0),
    ("flawless", 1.0),
    ("delightful", 1.0),
    ("impressive", 1.0),
    ("brilliant", 0.9),
    ("great", 0.8),
    ("happy", 0.8),
    ("beautiful", 0.85),
    ("satisfied", 0.5),
    ("good", 0.7),
    ("loved", 0.7),
    ("friendly", 0.375),
    ("fantastic", 0.4),
    ("amazing", 0.6),
    ("nice", 0.6),
    ("pleased", 0.5),
    ("love", 0.5),
    ("recommend", 0.4),
    ("recommended", 0.4),
    ("useful", 0.3),
    ("helpful", 0.5),
    ("enjoyed", 0.4),
    ("enjoy", 0.4),
    ("quick", 0.33),
    ("easy", 0.43),
    ("smooth", 0.4),
    ("reliable", 0.5),
    ("comfortable", 0.4),
    ("fresh", 0.3),
    ("clean", 0.37),
    ("affordable", 0.4),
    ("cheap", 0.4),
    ("worth", 0.3),
    ("fine", 0.42),
    ("better", 0.5),
    ("fast", 0.2),
    ("responsive", 0.3),
    ("polite", 0.3),
    ("professional", 0.1),
    ("convenient", 0.3),
    ("efficient", 0.3),
    ("quality", 0.2),
    ("thanks", 0.2),
    ("thank", 0.2),
    ("well", 0.3),
    ("like", 0.2),
    ("liked", 0.4),
    ("solid", 0.3),
    ("super", 0.33),
    ("cool", 0.35),
    ("fun", 0.3),
    ("glad", 0.5),
    ("valuable", 0.4),
    ("intuitive", 0.4),
];

const NEGATIVE_WORDS: &[(&str, f64)] = &[
    ("terrible", -1.0),
    ("awful", -1.0),
    ("worst", -1.0),
    ("horrible", -1.0),
    ("disgusting", -1.0),
    ("pathetic", -1.0),
    ("useless", -0.5),
    ("hate", -0.8),
    ("hated", -0.9),
    ("disappointed", -0.75),
    ("bad", -0.7),
    ("disappointing", -0.6),
    ("angry", -0.5),
    ("annoying", -0.8),
    ("frustrating", -0.4),
    ("frustrated", -0.7),
    ("unhappy", -0.6),
    ("poor", -0.4),
    ("expensive", -0.5),
    ("broken", -0.4),
    ("damaged", -0.5),
    ("defective", -0.5),
    ("faulty", -0.5),
    ("rude", -0.3),
    ("slow", -0.3),
    ("late", -0.3),
    ("delayed", -0.3),
    ("dirty", -0.6),
    ("wrong", -0.5),
    ("missing", -0.2),
    ("confusing", -0.3),
    ("complicated", -0.3),
    ("difficult", -0.5),
    ("hard", -0.29),
    ("worse", -0.4),
    ("cold", -0.6),
    ("problem", -0.3),
    ("issue", -0.2),
    ("issues", -0.2),
    ("fail", -0.5),
    ("failed", -0.5),
    ("crashed", -0.5),
    ("crash", -0.5),
    ("refund", -0.1),
    ("waste", -0.2),
    ("overpriced", -0.5),
    ("unreliable", -0.5),
    ("unhelpful", -0.5),
    ("unacceptable", -0.8),
    ("sad", -0.5),
    ("boring", -1.0),
    ("noisy", -0.3),
    ("stale", -0.5),
    ("cheaply", -0.3),
    ("lousy", -0.8),
    ("mediocre", -0.3),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("absolutely", 1.5),
    ("totally", 1.3),
    ("completely", 1.3),
    ("highly", 1.3),
    ("quite", 1.1),
    ("so", 1.3),
    ("too", 1.2),
    ("somewhat", 0.8),
    ("slightly", 0.7),
    ("barely", 0.6),
    ("little", 0.7),
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "nothing", "neither", "nor", "dont", "doesnt", "didnt", "cant",
    "couldnt", "wont", "wouldnt", "shouldnt", "isnt", "arent", "wasnt", "werent", "havent",
    "hasnt", "hadnt", "without",
];

/// Bag-of-words scorer: the mean polarity of the recognized words.
///
/// An intensifier scales the next recognized word and a negator flips it
/// with a damping factor. Any other unrecognized word clears both. Text with
/// no recognized word scores exactly `0.0`.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    words: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
    negators: HashSet<String>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    /// Scorer over the embedded lexicon.
    pub fn new() -> Self {
        let words = POSITIVE_WORDS
            .iter()
            .chain(NEGATIVE_WORDS.iter())
            .map(|(w, s)| (w.to_string(), *s))
            .collect();
        let intensifiers = INTENSIFIERS.iter().map(|(w, m)| (w.to_string(), *m)).collect();
        let negators = NEGATORS.iter().map(|w| w.to_string()).collect();

        Self {
            words,
            intensifiers,
            negators,
        }
    }

    /// Extend or override the embedded word weights.
    pub fn with_entries<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        for (word, score) in entries {
            self.words.insert(word.as_ref().to_lowercase(), score);
        }
        self
    }

    pub fn get_score(&self, word: &str) -> Option<f64> {
        self.words.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> Result<f64, ScoringFailure> {
        let mut total = 0.0;
        let mut recognized = 0usize;
        let mut modifier = 1.0;
        let mut negated = false;

        for token in text.split_whitespace() {
            let token = token.to_lowercase();

            if self.negators.contains(&token) {
                negated = true;
                continue;
            }

            if let Some(multiplier) = self.intensifiers.get(&token) {
                modifier *= multiplier;
                continue;
            }

            if let Some(&base) = self.words.get(&token) {
                if !base.is_finite() {
                    return Err(ScoringFailure::NonFiniteWeight { word: token });
                }
                let mut score = (base * modifier).clamp(-1.0, 1.0);
                if negated {
                    score *= NEGATION_FACTOR;
                }
                total += score;
                recognized += 1;
            }

            modifier = 1.0;
            negated = false;
        }

        if recognized == 0 {
            return Ok(0.0);
        }

        let mean = total / recognized as f64;
        if !mean.is_finite() {
            return Err(ScoringFailure::NonFiniteScore);
        }
        Ok(mean.clamp(-1.0, 1.0))
    }
}
