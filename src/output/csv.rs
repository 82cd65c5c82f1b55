//! CSV table writer.

use crate::constants::UTF8_BOM;
use crate::error::{Error, Result};
use crate::output::{OutputWriter, Table};
use crate::timeline::Report;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// CSV format output writer.
pub struct CsvWriter {
    writer: csv::Writer<File>,
    path: PathBuf,
}

impl CsvWriter {
    /// Create a new CSV writer.
    ///
    /// With `bom` set the file starts with a UTF-8 byte order mark so that
    /// spreadsheet applications pick the right encoding for CJK labels.
    pub fn new(path: &Path, bom: bool) -> Result<Self> {
        let mut file = File::create(path)?;
        if bom {
            file.write_all(UTF8_BOM)?;
        }
        Ok(Self {
            writer: csv::Writer::from_writer(file),
            path: path.to_path_buf(),
        })
    }

    /// Write a header row and one record per table row.
    pub fn write_table(&mut self, table: &Table) -> Result<()> {
        if table.columns().is_empty() {
            return Ok(());
        }

        self.writer
            .write_record(table.columns())
            .map_err(|e| table_write_error(&self.path, e))?;

        for row in table.aligned_rows() {
            self.writer
                .write_record(row)
                .map_err(|e| table_write_error(&self.path, e))?;
        }

        Ok(())
    }
}

impl OutputWriter for CsvWriter {
    fn write_report(&mut self, _source: &Path, report: &Report) -> Result<()> {
        self.write_table(&Table::from_report(report))
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

fn table_write_error(path: &Path, source: csv::Error) -> Error {
    Error::TableWrite {
        path: path.to_path_buf(),
        source,
    }
}
