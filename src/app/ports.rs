use crate::common::error::Result;
use crate::domain::{KeywordEntry, Table};
use crate::pipeline::RunReport;

/// Where the input table comes from
pub trait TableSource: Send + Sync {
    fn load(&self) -> Result<Table>;

    /// Human-readable origin, for logs
    fn describe(&self) -> String;
}

/// Where run artifacts go
pub trait OutputPort: Send + Sync {
    /// Write the per-record table (input columns plus every added column)
    fn write_feedback(&self, table: &Table) -> Result<()>;

    fn write_keywords(&self, entries: &[KeywordEntry]) -> Result<()>;

    fn write_report(&self, report: &RunReport) -> Result<()>;
}
