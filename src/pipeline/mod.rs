// Pipeline: pure processing stages, step wrappers and orchestration

pub mod orchestrator;
pub mod pipeline_config;
pub mod processing;
pub mod steps;

pub use orchestrator::{PipelineOrchestrator, PipelineRun, RunReport, StepReport};
pub use pipeline_config::{PipelineConfig, PipelineStepConfig};
pub use steps::{PipelineContext, PipelineStep, StepResult};
