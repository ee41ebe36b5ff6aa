//! Metrics for the feedback pipeline
//!
//! Stages record through the `metrics` facade. When a Prometheus recorder is
//! installed with [`init`] the values can be rendered as a text snapshot;
//! otherwise the macros are no-ops.

use std::fmt;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::info;

/// Every metric name used in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Pipeline
    PipelineRuns,
    PipelineDuration,
    StepDuration,
    StepsSkipped,

    // Normalize
    NormalizeRecordsProcessed,
    NormalizeEmptyOutputs,

    // Sentiment
    SentimentRecordsClassified,
    SentimentLabels,
    SentimentScore,
    SentimentScoringFailures,

    // Keywords
    KeywordsDistinct,
    KeywordsOccurrences,
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::PipelineRuns => "reviewsense_pipeline_runs_total",
            MetricName::PipelineDuration => "reviewsense_pipeline_duration_seconds",
            MetricName::StepDuration => "reviewsense_step_duration_seconds",
            MetricName::StepsSkipped => "reviewsense_steps_skipped_total",

            MetricName::NormalizeRecordsProcessed => "reviewsense_normalize_records_processed_total",
            MetricName::NormalizeEmptyOutputs => "reviewsense_normalize_empty_outputs_total",

            MetricName::SentimentRecordsClassified => "reviewsense_sentiment_records_classified_total",
            MetricName::SentimentLabels => "reviewsense_sentiment_labels_total",
            MetricName::SentimentScore => "reviewsense_sentiment_score",
            MetricName::SentimentScoringFailures => "reviewsense_sentiment_scoring_failures_total",

            MetricName::KeywordsDistinct => "reviewsense_keywords_distinct",
            MetricName::KeywordsOccurrences => "reviewsense_keywords_occurrences_total",
        }
    }

    pub fn all_metrics() -> impl Iterator<Item = MetricName> {
        use MetricName::*;
        [
            PipelineRuns,
            PipelineDuration,
            StepDuration,
            StepsSkipped,
            NormalizeRecordsProcessed,
            NormalizeEmptyOutputs,
            SentimentRecordsClassified,
            SentimentLabels,
            SentimentScore,
            SentimentScoringFailures,
            KeywordsDistinct,
            KeywordsOccurrences,
        ]
        .into_iter()
    }

    /// Returns (phase, description)
    pub fn metadata(&self) -> (&'static str, &'static str) {
        match self {
            MetricName::PipelineRuns => ("pipeline", "Pipeline runs started"),
            MetricName::PipelineDuration => ("pipeline", "Wall time of a whole run"),
            MetricName::StepDuration => ("pipeline", "Wall time per step"),
            MetricName::StepsSkipped => ("pipeline", "Steps skipped because their output already existed"),

            MetricName::NormalizeRecordsProcessed => ("normalize", "Records normalized"),
            MetricName::NormalizeEmptyOutputs => ("normalize", "Records that normalized to empty text"),

            MetricName::SentimentRecordsClassified => ("sentiment", "Records classified"),
            MetricName::SentimentLabels => ("sentiment", "Records per sentiment label"),
            MetricName::SentimentScore => ("sentiment", "Polarity score distribution"),
            MetricName::SentimentScoringFailures => ("sentiment", "Scoring failures mapped to neutral"),

            MetricName::KeywordsDistinct => ("keywords", "Distinct keywords in the last aggregation"),
            MetricName::KeywordsOccurrences => ("keywords", "Keyword occurrences counted"),
        }
    }
}

/// Install the Prometheus recorder and return a handle for rendering snapshots.
pub fn init() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_all();
    info!("Metrics recorder installed");
    Ok(handle)
}

fn describe_all() {
    for metric in MetricName::all_metrics() {
        let (_, description) = metric.metadata();
        match metric {
            MetricName::PipelineDuration | MetricName::StepDuration | MetricName::SentimentScore => {
                ::metrics::describe_histogram!(metric.as_str(), description)
            }
            MetricName::KeywordsDistinct => ::metrics::describe_gauge!(metric.as_str(), description),
            _ => ::metrics::describe_counter!(metric.as_str(), description),
        }
    }
}

pub mod pipeline {
    use super::MetricName;

    pub fn run_started(pipeline: &str) {
        ::metrics::counter!(MetricName::PipelineRuns.as_str(), "pipeline" => pipeline.to_string())
            .increment(1);
    }

    pub fn run_finished(pipeline: &str, duration_secs: f64) {
        ::metrics::histogram!(MetricName::PipelineDuration.as_str(), "pipeline" => pipeline.to_string())
            .record(duration_secs);
    }

    pub fn step_finished(step: &'static str, duration_secs: f64) {
        ::metrics::histogram!(MetricName::StepDuration.as_str(), "step" => step).record(duration_secs);
    }

    pub fn step_skipped(step: &'static str) {
        ::metrics::counter!(MetricName::StepsSkipped.as_str(), "step" => step).increment(1);
    }
}

pub mod normalize {
    use super::MetricName;

    pub fn batch_processed(records: usize, empty_outputs: usize) {
        ::metrics::counter!(MetricName::NormalizeRecordsProcessed.as_str()).increment(records as u64);
        ::metrics::counter!(MetricName::NormalizeEmptyOutputs.as_str())
            .increment(empty_outputs as u64);
    }
}

pub mod sentiment {
    use super::MetricName;
    use crate::domain::Sentiment;

    pub fn record_classified(label: Sentiment, score: f64) {
        ::metrics::counter!(MetricName::SentimentRecordsClassified.as_str()).increment(1);
        ::metrics::counter!(MetricName::SentimentLabels.as_str(), "label" => label.as_str())
            .increment(1);
        ::metrics::histogram!(MetricName::SentimentScore.as_str()).record(score);
    }

    pub fn scoring_failed() {
        ::metrics::counter!(MetricName::SentimentScoringFailures.as_str()).increment(1);
    }
}

pub mod keywords {
    use super::MetricName;

    pub fn aggregated(distinct: usize, occurrences: u64) {
        ::metrics::gauge!(MetricName::KeywordsDistinct.as_str()).set(distinct as f64);
        ::metrics::counter!(MetricName::KeywordsOccurrences.as_str()).increment(occurrences);
    }
}
