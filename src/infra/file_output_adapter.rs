use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::app::ports::OutputPort;
use crate::common::constants::{
    CLEAN_FEEDBACK_FILE, KEYWORD_INSIGHTS_FILE, RUN_REPORT_FILE, SENTIMENT_COLUMN,
    SENTIMENT_RESULTS_FILE,
};
use crate::common::error::Result;
use crate::domain::{keyword_table, KeywordEntry, Table};
use crate::infra::csv_table::write_table_to_path;
use crate::pipeline::RunReport;

/// File-based implementation of OutputPort.
/// Writes CSV tables and a JSON run report into one directory.
#[derive(Debug, Clone)]
pub struct FileOutputAdapter {
    dir: PathBuf,
}

impl FileOutputAdapter {
    /// The directory is created on first write, not here.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the per-record table goes: classified tables get their own name.
    pub fn feedback_path(&self, table: &Table) -> PathBuf {
        if table.has_column(SENTIMENT_COLUMN) {
            self.dir.join(SENTIMENT_RESULTS_FILE)
        } else {
            self.dir.join(CLEAN_FEEDBACK_FILE)
        }
    }

    pub fn keywords_path(&self) -> PathBuf {
        self.dir.join(KEYWORD_INSIGHTS_FILE)
    }

    pub fn report_path(&self) -> PathBuf {
        self.dir.join(RUN_REPORT_FILE)
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }
}

impl OutputPort for FileOutputAdapter {
    fn write_feedback(&self, table: &Table) -> Result<()> {
        self.ensure_dir()?;
        let path = self.feedback_path(table);
        write_table_to_path(&path, table)?;
        info!("Wrote {} records to {}", table.len(), path.display());
        Ok(())
    }

    fn write_keywords(&self, entries: &[KeywordEntry]) -> Result<()> {
        self.ensure_dir()?;
        let path = self.keywords_path();
        write_table_to_path(&path, &keyword_table(entries)?)?;
        info!("Wrote {} keywords to {}", entries.len(), path.display());
        Ok(())
    }

    fn write_report(&self, report: &RunReport) -> Result<()> {
        self.ensure_dir()?;
        let path = self.report_path();
        let writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(writer, report)?;
        info!("Wrote run report to {}", path.display());
        Ok(())
    }
}
