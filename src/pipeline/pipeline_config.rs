use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::common::constants::{KEYWORDS_STEP, NORMALIZE_STEP, SENTIMENT_STEP};
use crate::common::error::{PipelineError, Result};

/// Configuration for a complete pipeline execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: String,
    pub steps: Vec<PipelineStepConfig>,
    /// Map per-record stages across the rayon pool
    pub parallel: bool,
}

/// Configuration for individual pipeline steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStepConfig {
    Normalize,
    Sentiment,
    Keywords,
}

impl PipelineConfig {
    /// Normalize, classify and aggregate in one pass
    pub fn full() -> Self {
        Self {
            name: "full".to_string(),
            description: "Normalize feedback, classify sentiment and aggregate keywords".to_string(),
            steps: vec![
                PipelineStepConfig::Normalize,
                PipelineStepConfig::Sentiment,
                PipelineStepConfig::Keywords,
            ],
            parallel: true,
        }
    }

    pub fn normalize_only() -> Self {
        Self {
            name: "normalize_only".to_string(),
            description: "Clean raw feedback into clean_feedback".to_string(),
            steps: vec![PipelineStepConfig::Normalize],
            parallel: true,
        }
    }

    /// Classify a table that already carries clean_feedback
    pub fn sentiment_only() -> Self {
        Self {
            name: "sentiment_only".to_string(),
            description: "Classify sentiment of already cleaned feedback".to_string(),
            steps: vec![PipelineStepConfig::Sentiment],
            parallel: true,
        }
    }

    /// Aggregate keywords of a table that already carries clean_feedback
    pub fn keywords_only() -> Self {
        Self {
            name: "keywords_only".to_string(),
            description: "Aggregate keyword frequencies of already cleaned feedback".to_string(),
            steps: vec![PipelineStepConfig::Keywords],
            parallel: true,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validate the pipeline configuration.
    ///
    /// A dependency left out of the pipeline is allowed (its output may
    /// already be on the input table), but one listed after its dependent is not.
    pub fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(PipelineError::InvalidPipeline(
                "Pipeline must have at least one step".to_string(),
            ));
        }

        let mut seen_steps = HashSet::new();

        for (index, step) in self.steps.iter().enumerate() {
            let step_name = step.step_name();

            if !seen_steps.insert(step_name) {
                return Err(PipelineError::InvalidPipeline(format!(
                    "Step '{}' appears more than once",
                    step_name
                )));
            }

            for dep in step.dependencies() {
                let later = self.steps[index + 1..]
                    .iter()
                    .any(|s| s.step_name() == dep);
                if later {
                    return Err(PipelineError::InvalidPipeline(format!(
                        "Step '{}' depends on '{}' which appears later in the pipeline",
                        step_name, dep
                    )));
                }
            }
        }

        Ok(())
    }
}

impl PipelineStepConfig {
    /// Get the step name for dependency checking
    pub fn step_name(&self) -> &'static str {
        match self {
            PipelineStepConfig::Normalize => NORMALIZE_STEP,
            PipelineStepConfig::Sentiment => SENTIMENT_STEP,
            PipelineStepConfig::Keywords => KEYWORDS_STEP,
        }
    }

    /// Get the dependencies for this step
    pub fn dependencies(&self) -> Vec<&'static str> {
        match self {
            PipelineStepConfig::Normalize => vec![],
            PipelineStepConfig::Sentiment => vec![NORMALIZE_STEP],
            PipelineStepConfig::Keywords => vec![NORMALIZE_STEP],
        }
    }
}
