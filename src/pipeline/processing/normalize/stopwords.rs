use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Function words dropped by the normalizer. Closed set; lowercase only.
pub const STOPWORDS: [&str; 31] = [
    "is", "the", "and", "a", "an", "to", "of", "in", "on", "for", "with", "this", "that", "it",
    "was", "are", "as", "at", "be", "by", "from", "or", "but", "so", "if", "then", "there",
    "about", "more", "all", "any",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOPWORDS.into_iter().collect());

/// Exact, case-sensitive membership test against [`STOPWORDS`].
pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}
