//! Plain text report writer.

use crate::error::Result;
use crate::output::OutputWriter;
use crate::timeline::Report;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the human-readable text report.
pub struct TextWriter {
    writer: BufWriter<File>,
}

impl TextWriter {
    /// Create a new text writer.
    pub fn new(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl OutputWriter for TextWriter {
    fn write_report(&mut self, _source: &Path, report: &Report) -> Result<()> {
        write!(self.writer, "{report}")?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
