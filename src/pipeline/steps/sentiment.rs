use serde_json::Value;
use tracing::{info, instrument};

use super::{map_cells, outputs_present, PipelineContext, PipelineStep, StepResult};
use crate::common::constants::{
    CLEAN_FEEDBACK_COLUMN, CONFIDENCE_SCORE_COLUMN, NORMALIZE_STEP, SENTIMENT_COLUMN,
    SENTIMENT_STEP,
};
use crate::common::error::Result;
use crate::domain::SentimentSummary;
use crate::observability::metrics;
use crate::pipeline::processing::sentiment::SentimentClassifier;

/// Pipeline step adding `sentiment` and `confidence_score` from `clean_feedback`
#[derive(Clone, Default)]
pub struct SentimentStep {
    classifier: SentimentClassifier,
}

impl SentimentStep {
    pub fn new(classifier: SentimentClassifier) -> Self {
        Self { classifier }
    }
}

impl PipelineStep for SentimentStep {
    #[instrument(skip_all, fields(step = SENTIMENT_STEP, records = ctx.table.len()))]
    fn execute(&self, ctx: &mut PipelineContext) -> Result<StepResult> {
        if outputs_present(&ctx.table, &[SENTIMENT_COLUMN, CONFIDENCE_SCORE_COLUMN])? {
            info!("Data already contains sentiment results; skipping classification");
            return Ok(StepResult::skipped(format!(
                "{} and {} already present, nothing recomputed",
                SENTIMENT_COLUMN, CONFIDENCE_SCORE_COLUMN
            )));
        }

        let classified = {
            let clean = ctx.table.column(CLEAN_FEEDBACK_COLUMN)?;
            map_cells(&clean, ctx.parallel, |cell| {
                let (label, score) = self.classifier.classify_value(cell);
                metrics::sentiment::record_classified(label, score);
                (label, score)
            })
        };

        let mut summary = SentimentSummary::default();
        let mut labels = Vec::with_capacity(classified.len());
        let mut scores = Vec::with_capacity(classified.len());
        for (label, score) in classified {
            summary.record(label);
            labels.push(Value::String(label.as_str().to_string()));
            scores.push(Value::from(score));
        }

        // Both columns are checked absent above, so neither insert can collide
        ctx.table.add_column(SENTIMENT_COLUMN, labels)?;
        ctx.table.add_column(CONFIDENCE_SCORE_COLUMN, scores)?;

        let processed = summary.total();
        let message = format!(
            "Classified {} records: {} positive, {} negative, {} neutral",
            processed, summary.positive, summary.negative, summary.neutral
        );
        info!("{}", message);
        Ok(StepResult::success(processed, message))
    }

    fn step_name(&self) -> &'static str {
        SENTIMENT_STEP
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![NORMALIZE_STEP]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::PipelineError;
    use crate::domain::{Sentiment, Table};
    use serde_json::json;

    fn context(values: Vec<Value>, parallel: bool) -> PipelineContext {
        PipelineContext::new(Table::from_column(CLEAN_FEEDBACK_COLUMN, values), parallel)
    }

    #[test]
    fn test_labels_follow_score_sign() {
        let mut ctx = context(
            vec![json!("great product"), json!(""), json!("terrible slow delivery"), Value::Null],
            true,
        );
        let result = SentimentStep::default().execute(&mut ctx).unwrap();
        assert_eq!(result.processed_count, 4);

        let labels = ctx.table.column(SENTIMENT_COLUMN).unwrap();
        let scores = ctx.table.column(CONFIDENCE_SCORE_COLUMN).unwrap();
        assert_eq!(labels[0], &json!("positive"));
        assert_eq!(labels[1], &json!("neutral"));
        assert_eq!(scores[1], &json!(0.0));
        assert_eq!(labels[2], &json!("negative"));
        assert_eq!(labels[3], &json!("neutral"));

        for (label, score) in labels.iter().zip(scores.iter()) {
            let label: Sentiment = label.as_str().unwrap().parse().unwrap();
            assert_eq!(label, Sentiment::from_score(score.as_f64().unwrap()));
        }
    }

    #[test]
    fn test_missing_clean_feedback() {
        let mut ctx = PipelineContext::new(Table::from_column("feedback", vec![json!("x")]), false);
        let err = SentimentStep::default().execute(&mut ctx).unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumn { ref column } if column == "clean_feedback"));
    }

    #[test]
    fn test_partial_outputs_conflict() {
        let mut ctx = context(vec![json!("good")], false);
        ctx.table.add_column(SENTIMENT_COLUMN, vec![json!("positive")]).unwrap();
        let err = SentimentStep::default().execute(&mut ctx).unwrap_err();
        assert!(matches!(err, PipelineError::DuplicateColumn { .. }));
    }

    #[test]
    fn test_existing_results_are_skipped() {
        let mut ctx = context(vec![json!("good")], false);
        ctx.table.add_column(SENTIMENT_COLUMN, vec![json!("negative")]).unwrap();
        ctx.table.add_column(CONFIDENCE_SCORE_COLUMN, vec![json!(-0.2)]).unwrap();

        let result = SentimentStep::default().execute(&mut ctx).unwrap();
        assert!(result.skipped);
        assert_eq!(ctx.table.column(SENTIMENT_COLUMN).unwrap()[0], &json!("negative"));
    }
}
