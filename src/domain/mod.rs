// Domain data shapes shared across layers

pub mod records;
pub mod table;

pub use records::{keyword_table, FeedbackRecord, KeywordEntry, Sentiment, SentimentSummary};
pub use table::{stringify, Table};
