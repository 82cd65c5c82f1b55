//! Report-to-table conversion.
//!
//! Tables are rebuilt from the text report: a row starts at every clip name
//! line and each following `key: value` line becomes a cell of that row.
//! Columns appear in the order their keys are first seen. Values never span
//! lines because the harvester folds line breaks.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::constants::report::{CLIP_NAME_KEY, VIDEO_HEADER};
use crate::error::{Error, Result};
use crate::timeline::Report;

/// One clip row: cells in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    /// Cell value for a column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(key, _)| key == column)
            .map(|(_, value)| value.as_str())
    }

    /// Number of cells in the row.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn set(&mut self, column: &str, value: &str) {
        if let Some(cell) = self.cells.iter_mut().find(|(key, _)| key == column) {
            value.clone_into(&mut cell.1);
        } else {
            self.cells.push((column.to_string(), value.to_string()));
        }
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (key, value) in &self.cells {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Row-per-clip table with dynamically derived columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Build the table for an extraction result.
    pub fn from_report(report: &Report) -> Self {
        Self::parse_lines(&report.to_text())
    }

    /// Rebuild a table from saved report text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoExtractionResult`] when the text does not contain
    /// the video section header every report starts with.
    pub fn from_report_text(text: &str) -> Result<Self> {
        let text = text.trim_start_matches('\u{feff}');
        if !text.lines().any(|line| line.trim() == VIDEO_HEADER) {
            return Err(Error::NoExtractionResult {
                reason: format!("missing '{VIDEO_HEADER}' header"),
            });
        }
        Ok(Self::parse_lines(text))
    }

    fn parse_lines(text: &str) -> Self {
        let mut table = Self::default();
        let mut current: Option<Row> = None;

        for line in text.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let (key, value) = (key.trim(), value.trim());

            if key == CLIP_NAME_KEY && !line.starts_with(char::is_whitespace) {
                if let Some(row) = current.take() {
                    table.push_row(row);
                }
                let mut row = Row::default();
                row.set(CLIP_NAME_KEY, value);
                current = Some(row);
                continue;
            }

            // Headings carry no value; lines before the first clip belong to no row.
            if key.is_empty() || value.is_empty() {
                continue;
            }
            if let Some(row) = current.as_mut() {
                row.set(key, value);
            }
        }

        if let Some(row) = current {
            table.push_row(row);
        }

        table
    }

    fn push_row(&mut self, row: Row) {
        for (key, _) in &row.cells {
            if !self.columns.iter().any(|column| column == key) {
                self.columns.push(key.clone());
            }
        }
        self.rows.push(row);
    }

    /// Column names in first-seen order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in report order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Row cells aligned to [`Table::columns`]; missing cells are empty.
    pub fn aligned_rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        self.rows.iter().map(|row| {
            self.columns
                .iter()
                .map(|column| row.get(column).unwrap_or_default())
                .collect()
        })
    }
}
