use tracing::info;

use crate::app::ports::{OutputPort, TableSource};
use crate::common::error::Result;
use crate::pipeline::{PipelineConfig, PipelineOrchestrator, PipelineRun, PipelineStepConfig};

/// Use case for taking one feedback batch through a pipeline and persisting
/// what it produced
pub struct AnalyzeFeedbackUseCase {
    orchestrator: PipelineOrchestrator,
    output: Box<dyn OutputPort>,
}

impl AnalyzeFeedbackUseCase {
    pub fn new(orchestrator: PipelineOrchestrator, output: Box<dyn OutputPort>) -> Self {
        Self {
            orchestrator,
            output,
        }
    }

    /// Create a use case with the embedded lexicon
    pub fn with_default_orchestrator(output: Box<dyn OutputPort>) -> Self {
        Self::new(PipelineOrchestrator::default(), output)
    }

    /// Load, run and write.
    ///
    /// Nothing is written unless every step succeeded.
    pub fn execute(&self, source: &dyn TableSource, config: &PipelineConfig) -> Result<PipelineRun> {
        info!("Loading feedback from {}", source.describe());
        let table = source.load()?;
        info!("Loaded {} records with columns {:?}", table.len(), table.columns());

        let run = self.orchestrator.run(config, table)?;

        let per_record = config
            .steps
            .iter()
            .any(|s| matches!(s, PipelineStepConfig::Normalize | PipelineStepConfig::Sentiment));
        if per_record {
            self.output.write_feedback(&run.table)?;
        }
        if let Some(keywords) = &run.keywords {
            self.output.write_keywords(keywords)?;
        }
        self.output.write_report(&run.report)?;

        Ok(run)
    }
}
