use std::borrow::Cow;

use tracing::{debug, info, instrument};

use super::{PipelineContext, PipelineStep, StepResult};
use crate::common::constants::{CLEAN_FEEDBACK_COLUMN, KEYWORDS_STEP, NORMALIZE_STEP};
use crate::common::error::Result;
use crate::domain::stringify;
use crate::observability::metrics;
use crate::pipeline::processing::keywords::{count_keywords, count_keywords_par};

/// Pipeline step building the corpus-wide keyword table from `clean_feedback`
#[derive(Debug, Clone, Default)]
pub struct KeywordStep;

impl KeywordStep {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineStep for KeywordStep {
    #[instrument(skip_all, fields(step = KEYWORDS_STEP, records = ctx.table.len()))]
    fn execute(&self, ctx: &mut PipelineContext) -> Result<StepResult> {
        let counts = {
            let texts: Vec<Cow<'_, str>> = ctx
                .table
                .column(CLEAN_FEEDBACK_COLUMN)?
                .into_iter()
                .map(stringify)
                .collect();

            if ctx.parallel {
                count_keywords_par(&texts)
            } else {
                count_keywords(texts.iter().map(|t| &**t))
            }
        };

        let distinct = counts.len();
        let occurrences = counts.total();
        let entries = counts.into_entries();
        debug!(
            "Top keyword: {:?}",
            entries.first().map(|e| (&e.keyword, e.frequency))
        );
        metrics::keywords::aggregated(distinct, occurrences);

        let records = ctx.table.len();
        ctx.keywords = Some(entries);

        let message = format!(
            "Aggregated {} distinct keywords ({} occurrences) over {} records",
            distinct, occurrences, records
        );
        info!("{}", message);
        Ok(StepResult::success(records, message)
            .with_metadata("distinct_keywords", distinct)
            .with_metadata("total_occurrences", occurrences))
    }

    fn step_name(&self) -> &'static str {
        KEYWORDS_STEP
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![NORMALIZE_STEP]
    }
}
