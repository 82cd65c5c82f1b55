//! Output format writers.

mod csv;
mod json;
pub mod progress;
mod table;
mod text;
mod writer;

pub use csv::CsvWriter;
pub use json::{JsonClip, JsonResultFile, JsonResultWriter, JsonSummary, JsonTrack, write_table_json};
pub use table::{Row, Table};
pub use text::TextWriter;
pub use writer::OutputWriter;
