//! Corpus-wide keyword frequencies.
//!
//! Tokenization here is stricter than normalization: after lowercasing,
//! everything outside `a-z` and whitespace is dropped, so digits, accented
//! letters and underscores disappear. Stopwords are not filtered again.
//!
//! Counting is a multiset merge, so partial counts over any partition of
//! the corpus combine to the same table as a single sequential pass.

use std::cmp::Ordering;
use std::collections::HashMap;

use rayon::prelude::*;

use crate::domain::KeywordEntry;

/// Split one cleaned text into keyword tokens.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
        .collect();
    kept.split_whitespace().map(str::to_string).collect()
}

/// Token occurrence counts; merging is commutative and associative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordCounts {
    counts: HashMap<String, u64>,
}

impl KeywordCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, token: impl Into<String>) {
        *self.counts.entry(token.into()).or_insert(0) += 1;
    }

    /// Tokenize one text and count its tokens.
    pub fn add_text(&mut self, text: &str) {
        for token in extract_keywords(text) {
            self.add(token);
        }
    }

    pub fn merge(mut self, other: KeywordCounts) -> Self {
        // Fold the smaller map into the larger one
        let (mut into, from) = if self.counts.len() >= other.counts.len() {
            (std::mem::take(&mut self.counts), other.counts)
        } else {
            (other.counts, std::mem::take(&mut self.counts))
        };
        for (token, count) in from {
            *into.entry(token).or_insert(0) += count;
        }
        Self { counts: into }
    }

    pub fn get(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all occurrences
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Entries ranked by frequency descending, ties by keyword ascending.
    pub fn into_entries(self) -> Vec<KeywordEntry> {
        let mut entries: Vec<KeywordEntry> = self
            .counts
            .into_iter()
            .map(|(keyword, frequency)| KeywordEntry { keyword, frequency })
            .collect();
        entries.sort_by(rank_entries);
        entries
    }
}

impl<S: Into<String>> Extend<S> for KeywordCounts {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for token in iter {
            self.add(token);
        }
    }
}

fn rank_entries(a: &KeywordEntry, b: &KeywordEntry) -> Ordering {
    b.frequency
        .cmp(&a.frequency)
        .then_with(|| a.keyword.cmp(&b.keyword))
}

/// Count keywords over a corpus in one sequential pass.
pub fn aggregate_keywords<'a, I>(texts: I) -> Vec<KeywordEntry>
where
    I: IntoIterator<Item = &'a str>,
{
    count_keywords(texts).into_entries()
}

pub fn count_keywords<'a, I>(texts: I) -> KeywordCounts
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = KeywordCounts::new();
    for text in texts {
        counts.add_text(text);
    }
    counts
}

/// Count keywords with per-worker partial counts merged at the end.
pub fn count_keywords_par<S>(texts: &[S]) -> KeywordCounts
where
    S: AsRef<str> + Sync,
{
    texts
        .par_iter()
        .fold(KeywordCounts::new, |mut counts, text| {
            counts.add_text(text.as_ref());
            counts
        })
        .reduce(KeywordCounts::new, KeywordCounts::merge)
}

pub fn aggregate_keywords_par<S>(texts: &[S]) -> Vec<KeywordEntry>
where
    S: AsRef<str> + Sync,
{
    count_keywords_par(texts).into_entries()
}
