// Pipeline processing: pure per-stage transformations

pub mod keywords;
pub mod normalize;
pub mod sentiment;

pub use keywords::{aggregate_keywords, aggregate_keywords_par, extract_keywords, KeywordCounts};
pub use normalize::{normalize_text, normalize_value};
pub use sentiment::{classify, SentimentClassifier};
