use serde_json::Value;
use tracing::{debug, info, instrument};

use super::{map_cells, outputs_present, PipelineContext, PipelineStep, StepResult};
use crate::common::constants::{CLEAN_FEEDBACK_COLUMN, FEEDBACK_COLUMN, NORMALIZE_STEP};
use crate::common::error::Result;
use crate::observability::metrics;
use crate::pipeline::processing::normalize::normalize_value;

/// Pipeline step adding `clean_feedback` from the raw `feedback` column
#[derive(Debug, Clone, Default)]
pub struct NormalizeStep;

impl NormalizeStep {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineStep for NormalizeStep {
    #[instrument(skip_all, fields(step = NORMALIZE_STEP, records = ctx.table.len()))]
    fn execute(&self, ctx: &mut PipelineContext) -> Result<StepResult> {
        if outputs_present(&ctx.table, &[CLEAN_FEEDBACK_COLUMN])? {
            info!("Data already contains {}; skipping normalization", CLEAN_FEEDBACK_COLUMN);
            return Ok(StepResult::skipped(format!(
                "{} already present, nothing recomputed",
                CLEAN_FEEDBACK_COLUMN
            )));
        }

        let cleaned: Vec<String> = {
            let raw = ctx.table.column(FEEDBACK_COLUMN)?;
            map_cells(&raw, ctx.parallel, normalize_value)
        };

        let empty_outputs = cleaned.iter().filter(|s| s.is_empty()).count();
        let processed = cleaned.len();
        debug!("{} of {} records normalized to empty text", empty_outputs, processed);

        ctx.table.add_column(
            CLEAN_FEEDBACK_COLUMN,
            cleaned.into_iter().map(Value::String).collect(),
        )?;
        metrics::normalize::batch_processed(processed, empty_outputs);

        let message = format!("Normalized {} records ({} empty)", processed, empty_outputs);
        info!("{}", message);
        Ok(StepResult::success(processed, message).with_metadata("empty_outputs", empty_outputs))
    }

    fn step_name(&self) -> &'static str {
        NORMALIZE_STEP
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::PipelineError;
    use crate::domain::Table;
    use serde_json::json;

    fn context(values: Vec<Value>, parallel: bool) -> PipelineContext {
        PipelineContext::new(Table::from_column(FEEDBACK_COLUMN, values), parallel)
    }

    #[test]
    fn test_adds_clean_column_in_row_order() {
        let mut ctx = context(
            vec![
                json!("This is a great product"),
                Value::Null,
                json!("Visit http://x.com NOW!!! 123"),
            ],
            false,
        );
        let result = NormalizeStep::new().execute(&mut ctx).unwrap();

        assert_eq!(result.processed_count, 3);
        assert_eq!(result.metadata.get("empty_outputs").map(String::as_str), Some("1"));
        let clean = ctx.table.column(CLEAN_FEEDBACK_COLUMN).unwrap();
        assert_eq!(clean, vec![&json!("great product"), &json!(""), &json!("visit now")]);
        // Raw text untouched
        assert_eq!(ctx.table.column(FEEDBACK_COLUMN).unwrap()[0], &json!("This is a great product"));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let values: Vec<Value> = (0..300)
            .map(|i| json!(format!("Order {} was GREAT, see www.shop.com/{}", i, i)))
            .collect();
        let mut seq = context(values.clone(), false);
        let mut par = context(values, true);
        NormalizeStep::new().execute(&mut seq).unwrap();
        NormalizeStep::new().execute(&mut par).unwrap();
        assert_eq!(seq.table, par.table);
    }

    #[test]
    fn test_missing_feedback_column() {
        let mut ctx = PipelineContext::new(Table::from_column("review", vec![json!("x")]), false);
        let err = NormalizeStep::new().execute(&mut ctx).unwrap_err();
        assert!(matches!(err, PipelineError::MissingColumn { ref column } if column == "feedback"));
        assert!(!ctx.table.has_column(CLEAN_FEEDBACK_COLUMN));
    }

    #[test]
    fn test_already_normalized_table_is_skipped() {
        let mut ctx = context(vec![json!("Great!")], false);
        ctx.table
            .add_column(CLEAN_FEEDBACK_COLUMN, vec![json!("kept as is")])
            .unwrap();
        let before = ctx.table.clone();

        let result = NormalizeStep::new().execute(&mut ctx).unwrap();
        assert!(result.skipped);
        assert_eq!(ctx.table, before);
    }
}
