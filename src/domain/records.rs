use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::constants::{FREQUENCY_COLUMN, KEYWORD_COLUMN, SENTIMENT_COLUMN};
use crate::common::error::Result;
use crate::domain::table::{stringify, Table};

/// One row of the working table, viewed through its known columns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackRecord {
    /// Row position, stable across stages
    pub id: usize,
    /// Raw ingested text (any cell type)
    pub feedback: Value,
    pub clean_feedback: Option<String>,
    pub sentiment: Option<Sentiment>,
    pub confidence_score: Option<f64>,
}

/// Categorical sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    /// The sign rule: above zero is positive, below zero negative, zero neutral.
    pub fn from_score(score: f64) -> Self {
        if score > 0.0 {
            Sentiment::Positive
        } else if score < 0.0 {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    pub fn all() -> [Sentiment; 3] {
        [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral]
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            other => Err(format!("unknown sentiment label '{}'", other)),
        }
    }
}

/// Label distribution over a classified corpus
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentSummary {
    /// Summarize the `sentiment` column, if the table has one. Unknown labels
    /// are not counted.
    pub fn from_table(table: &Table) -> Option<Self> {
        let labels = table.column(SENTIMENT_COLUMN).ok()?;
        let mut summary = Self::default();
        for label in labels {
            if let Ok(sentiment) = stringify(label).parse::<Sentiment>() {
                summary.record(sentiment);
            }
        }
        Some(summary)
    }

    pub fn record(&mut self, sentiment: Sentiment) {
        match sentiment {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
        }
    }

    pub fn count(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    /// Labels ordered by count descending, ties by label name.
    pub fn ranked(&self) -> Vec<(Sentiment, usize)> {
        let mut counts: Vec<(Sentiment, usize)> =
            Sentiment::all().into_iter().map(|s| (s, self.count(s))).collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));
        counts
    }
}

/// One row of the keyword frequency table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub keyword: String,
    pub frequency: u64,
}

impl KeywordEntry {
    pub fn new(keyword: impl Into<String>, frequency: u64) -> Self {
        Self {
            keyword: keyword.into(),
            frequency,
        }
    }
}

/// Render keyword entries as the two-column output table.
pub fn keyword_table(entries: &[KeywordEntry]) -> Result<Table> {
    let mut table = Table::new([KEYWORD_COLUMN, FREQUENCY_COLUMN])?;
    for entry in entries {
        table.push_row(vec![
            Value::from(entry.keyword.as_str()),
            Value::from(entry.frequency),
        ])?;
    }
    Ok(table)
}
