use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::constants::{
    CLEAN_FEEDBACK_COLUMN, CONFIDENCE_SCORE_COLUMN, FEEDBACK_COLUMN, SENTIMENT_COLUMN,
};
use crate::common::error::{PipelineError, Result};
use crate::domain::records::{FeedbackRecord, Sentiment};

/// The working table every stage consumes and extends.
///
/// Row order is the record identity: row `i` keeps position `i` through every
/// stage. Columns are only ever appended, never edited or removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with the given header. Header names must be unique.
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for column in columns {
            let column = column.into();
            if table.has_column(&column) {
                return Err(PipelineError::DuplicateColumn { column });
            }
            table.columns.push(column);
        }
        Ok(table)
    }

    /// Build a single-column table, one row per value.
    pub fn from_column(name: &str, values: Vec<Value>) -> Self {
        Self {
            columns: vec![name.to_string()],
            rows: values.into_iter().map(|v| vec![v]).collect(),
        }
    }

    pub fn push_row(&mut self, cells: Vec<Value>) -> Result<()> {
        if cells.len() != self.columns.len() {
            return Err(PipelineError::RowWidth {
                row: self.rows.len(),
                expected: self.columns.len(),
                actual: cells.len(),
            });
        }
        self.rows.push(cells);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// True when every named column is present.
    pub fn has_columns(&self, names: &[&str]) -> bool {
        names.iter().all(|name| self.has_column(name))
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| PipelineError::missing_column(name))
    }

    /// Borrow every cell of a column in row order.
    pub fn column(&self, name: &str) -> Result<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Append a new column. Fails if the name is taken or the length does not match.
    pub fn add_column(&mut self, name: &str, values: Vec<Value>) -> Result<()> {
        if self.has_column(name) {
            return Err(PipelineError::DuplicateColumn {
                column: name.to_string(),
            });
        }
        if values.len() != self.rows.len() {
            return Err(PipelineError::ColumnLength {
                column: name.to_string(),
                expected: self.rows.len(),
                actual: values.len(),
            });
        }

        self.columns.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    /// Typed view over the feedback columns. Requires `feedback`; later-stage
    /// columns are read when present.
    pub fn feedback_records(&self) -> Result<Vec<FeedbackRecord>> {
        let feedback_idx = self.column_index(FEEDBACK_COLUMN)?;
        let clean_idx = self.column_index(CLEAN_FEEDBACK_COLUMN).ok();
        let sentiment_idx = self.column_index(SENTIMENT_COLUMN).ok();
        let score_idx = self.column_index(CONFIDENCE_SCORE_COLUMN).ok();

        let records = self
            .rows
            .iter()
            .enumerate()
            .map(|(id, row)| FeedbackRecord {
                id,
                feedback: row[feedback_idx].clone(),
                clean_feedback: clean_idx.map(|i| stringify(&row[i]).into_owned()),
                sentiment: sentiment_idx
                    .and_then(|i| stringify(&row[i]).parse::<Sentiment>().ok()),
                confidence_score: score_idx.and_then(|i| cell_as_f64(&row[i])),
            })
            .collect();

        Ok(records)
    }
}

/// Defensive text form of any cell.
///
/// Strings pass through, numbers and booleans use their display form, null is
/// the empty string and nested values are rendered as compact JSON.
pub fn stringify(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed(""),
        Value::Bool(b) => Cow::Owned(b.to_string()),
        Value::Number(n) => Cow::Owned(n.to_string()),
        other => Cow::Owned(other.to_string()),
    }
}

fn cell_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
