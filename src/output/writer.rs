//! Output writer trait definition.

use crate::error::Result;
use crate::timeline::Report;
use std::path::Path;

/// Trait for writing extraction results.
pub trait OutputWriter {
    /// Write the report extracted from `source`.
    fn write_report(&mut self, source: &Path, report: &Report) -> Result<()>;

    /// Finalize the output (flush, close, etc.).
    fn finalize(&mut self) -> Result<()>;
}
