use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::pipeline_config::{PipelineConfig, PipelineStepConfig};
use super::steps::{
    KeywordStep, NormalizeStep, PipelineContext, PipelineStep, SentimentStep, StepResult,
};
use crate::common::error::Result;
use crate::config::SentimentSettings;
use crate::domain::{KeywordEntry, SentimentSummary, Table};
use crate::observability::metrics;
use crate::pipeline::processing::sentiment::{LexiconScorer, SentimentClassifier};

/// Runs declarative pipelines over an in-memory table
#[derive(Clone, Default)]
pub struct PipelineOrchestrator {
    classifier: SentimentClassifier,
}

impl PipelineOrchestrator {
    pub fn new(classifier: SentimentClassifier) -> Self {
        Self { classifier }
    }

    /// Orchestrator whose lexicon is extended with the configured weights
    pub fn from_settings(settings: &SentimentSettings) -> Self {
        let scorer = LexiconScorer::new().with_entries(
            settings
                .lexicon
                .iter()
                .map(|(word, weight)| (word.as_str(), *weight)),
        );
        Self::new(SentimentClassifier::new(Arc::new(scorer)))
    }

    /// Run every configured step in order.
    ///
    /// The first step error aborts the run and is returned as is; no partial
    /// run is reported.
    pub fn run(&self, config: &PipelineConfig, table: Table) -> Result<PipelineRun> {
        config.validate()?;

        let run_id = Uuid::new_v4();
        info!(
            "Starting pipeline '{}' (run {}) over {} records",
            config.name,
            run_id,
            table.len()
        );
        info!("Pipeline description: {}", config.description);
        metrics::pipeline::run_started(&config.name);

        let started_at = Utc::now();
        let clock = Instant::now();
        let mut ctx = PipelineContext::new(table, config.parallel);
        let mut step_results = Vec::with_capacity(config.steps.len());

        for (step_index, step_config) in config.steps.iter().enumerate() {
            let step = self.create_step(*step_config);
            info!(
                "Executing step {}/{}: {}",
                step_index + 1,
                config.steps.len(),
                step.step_name()
            );

            let step_clock = Instant::now();
            let result = step.execute(&mut ctx).map_err(|e| {
                error!("Step '{}' failed: {}", step.step_name(), e);
                e
            })?;
            let duration_secs = step_clock.elapsed().as_secs_f64();

            if result.skipped {
                warn!("Step '{}' skipped: {}", step.step_name(), result.message);
                metrics::pipeline::step_skipped(step.step_name());
            } else {
                metrics::pipeline::step_finished(step.step_name(), duration_secs);
            }

            step_results.push(StepReport {
                step: step.step_name().to_string(),
                duration_ms: (duration_secs * 1000.0).round() as u64,
                result,
            });
        }

        metrics::pipeline::run_finished(&config.name, clock.elapsed().as_secs_f64());

        let report = RunReport {
            run_id,
            pipeline: config.name.clone(),
            started_at,
            completed_at: Utc::now(),
            records: ctx.table.len(),
            step_results,
            sentiment: SentimentSummary::from_table(&ctx.table),
            distinct_keywords: ctx.keywords.as_ref().map(Vec::len),
            total_keyword_occurrences: ctx
                .keywords
                .as_ref()
                .map(|entries| entries.iter().map(|e| e.frequency).sum()),
        };

        info!(
            "Pipeline '{}' completed: {} records in {} ms",
            config.name,
            report.records,
            report.duration().num_milliseconds()
        );

        Ok(PipelineRun {
            table: ctx.table,
            keywords: ctx.keywords,
            report,
        })
    }

    /// Create a step instance from configuration
    fn create_step(&self, step_config: PipelineStepConfig) -> Box<dyn PipelineStep> {
        match step_config {
            PipelineStepConfig::Normalize => Box::new(NormalizeStep::new()),
            PipelineStepConfig::Sentiment => Box::new(SentimentStep::new(self.classifier.clone())),
            PipelineStepConfig::Keywords => Box::new(KeywordStep::new()),
        }
    }
}

/// Everything a successful run produced
#[derive(Debug, Clone)]
pub struct PipelineRun {
    /// Input table plus every per-record column the run added
    pub table: Table,
    /// Ranked keyword entries, when the keyword step ran
    pub keywords: Option<Vec<KeywordEntry>>,
    pub report: RunReport,
}

/// Outcome of one step inside a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    pub step: String,
    pub duration_ms: u64,
    #[serde(flatten)]
    pub result: StepResult,
}

/// Machine-readable summary of a completed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub pipeline: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub records: usize,
    pub step_results: Vec<StepReport>,
    pub sentiment: Option<SentimentSummary>,
    pub distinct_keywords: Option<usize>,
    pub total_keyword_occurrences: Option<u64>,
}

impl RunReport {
    pub fn duration(&self) -> chrono::Duration {
        self.completed_at - self.started_at
    }

    pub fn step(&self, name: &str) -> Option<&StepReport> {
        self.step_results.iter().find(|s| s.step == name)
    }
}
