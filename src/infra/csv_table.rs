//! Delimited-text boundary for [`Table`].
//!
//! Reading is header-first. Empty cells become null and every other cell is
//! kept as a string; the stages stringify defensively, so no type inference
//! is attempted. Writing renders cells through [`stringify`], which gives
//! numbers their display form and null the empty string.

use csv::{ReaderBuilder, Writer};
use serde_json::Value;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::app::ports::TableSource;
use crate::common::error::Result;
use crate::domain::{stringify, Table};

/// [`TableSource`] reading a CSV file from disk
#[derive(Debug, Clone)]
pub struct CsvTableSource {
    path: PathBuf,
    delimiter: u8,
}

impl CsvTableSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableSource for CsvTableSource {
    fn load(&self) -> Result<Table> {
        let file = File::open(&self.path)?;
        let table = read_table(file, self.delimiter)?;
        debug!("Read {} rows from {}", table.len(), self.path.display());
        Ok(table)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parse a header-first delimited table from any reader.
pub fn read_table<R: Read>(reader: R, delimiter: u8) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut table = Table::new(reader.headers()?.iter())?;

    for record in reader.records() {
        let record = record?;
        let cells = record
            .iter()
            .map(|cell| {
                if cell.is_empty() {
                    Value::Null
                } else {
                    Value::String(cell.to_string())
                }
            })
            .collect();
        table.push_row(cells)?;
    }

    Ok(table)
}

/// Write a table as CSV with a header row.
pub fn write_table<W: Write>(writer: W, table: &Table) -> Result<()> {
    let mut writer = Writer::from_writer(writer);
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| stringify(cell).into_owned()))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_table_to_path(path: &Path, table: &Table) -> Result<()> {
    let file = File::create(path)?;
    write_table(file, table)
}
