use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::common::error::{PipelineError, Result};
use crate::domain::{KeywordEntry, Table};

/// Common trait for all pipeline steps
pub trait PipelineStep: Send + Sync {
    /// Execute this step against the shared run context
    fn execute(&self, ctx: &mut PipelineContext) -> Result<StepResult>;

    /// Get the name of this pipeline step
    fn step_name(&self) -> &'static str;

    /// Steps whose output this step reads
    fn dependencies(&self) -> Vec<&'static str>;
}

/// Working state threaded through the steps of one run
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub table: Table,
    /// Set once the keyword step has run
    pub keywords: Option<Vec<KeywordEntry>>,
    /// Map per-record stages across the rayon pool
    pub parallel: bool,
}

impl PipelineContext {
    pub fn new(table: Table, parallel: bool) -> Self {
        Self {
            table,
            keywords: None,
            parallel,
        }
    }
}

/// Result of executing a pipeline step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub success: bool,
    /// Outputs were already present and nothing was recomputed
    pub skipped: bool,
    pub processed_count: usize,
    pub message: String,
    pub metadata: BTreeMap<String, String>,
}

impl StepResult {
    pub fn success(processed: usize, message: String) -> Self {
        Self {
            success: true,
            skipped: false,
            processed_count: processed,
            message,
            metadata: BTreeMap::new(),
        }
    }

    pub fn skipped(message: String) -> Self {
        Self {
            success: true,
            skipped: true,
            processed_count: 0,
            message,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: &str, value: impl ToString) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }
}

/// Whether a per-record stage has already run on this table.
///
/// All outputs present means the stage is done; none present means it
/// should run. Anything in between is a conflicting table.
pub(crate) fn outputs_present(table: &Table, outputs: &[&str]) -> Result<bool> {
    let present: Vec<&str> = outputs
        .iter()
        .copied()
        .filter(|c| table.has_column(c))
        .collect();

    if present.is_empty() {
        Ok(false)
    } else if present.len() == outputs.len() {
        Ok(true)
    } else {
        Err(PipelineError::DuplicateColumn {
            column: present[0].to_string(),
        })
    }
}

/// Apply `f` to every cell, in row order, optionally across the rayon pool.
pub(crate) fn map_cells<T, F>(cells: &[&Value], parallel: bool, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(&Value) -> T + Send + Sync,
{
    if parallel {
        cells.par_iter().map(|cell| f(cell)).collect()
    } else {
        cells.iter().map(|cell| f(cell)).collect()
    }
}

pub mod keywords;
pub mod normalize;
pub mod sentiment;

pub use keywords::KeywordStep;
pub use normalize::NormalizeStep;
pub use sentiment::SentimentStep;
