//! JSON output format writer.

use crate::error::{Error, Result};
use crate::output::{OutputWriter, Table};
use crate::timeline::{FieldKey, FilterPolicy, Report, TrackKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// JSON result file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonResultFile {
    /// Source timeline file name.
    pub source_file: String,
    /// Extraction timestamp.
    pub generated_at: DateTime<Utc>,
    /// Clip name filter policy used.
    pub filter_policy: FilterPolicy,
    /// Clips per track kind, video first.
    pub tracks: Vec<JsonTrack>,
    /// Summary statistics.
    pub summary: JsonSummary,
}

/// Clips of one track kind.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonTrack {
    /// Track kind.
    pub kind: TrackKind,
    /// Kept clips in document order.
    pub clips: Vec<JsonClip>,
}

/// Single clip in JSON format.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonClip {
    /// Clip name.
    pub clip_name: String,
    /// Field values with defaults applied.
    pub fields: BTreeMap<FieldKey, String>,
}

/// Summary statistics.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct JsonSummary {
    /// Total number of reported clips.
    pub total_clips: usize,
    /// `clipitem` elements found under any track.
    pub candidates: usize,
    /// Clips dropped by the name filter.
    pub filtered_out: usize,
    /// Clips without a name.
    pub unnamed: usize,
}

impl JsonResultFile {
    /// Build the JSON structure for a report.
    pub fn from_report(source: &Path, report: &Report) -> Self {
        let tracks = report
            .sections
            .iter()
            .map(|section| JsonTrack {
                kind: section.kind,
                clips: section
                    .clips
                    .iter()
                    .map(|clip| JsonClip {
                        clip_name: clip.clip_name().to_string(),
                        fields: clip
                            .resolved_fields()
                            .map(|(spec, value)| (spec.key, value.to_string()))
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        let summary = report
            .sections
            .iter()
            .fold(JsonSummary::default(), |mut acc, section| {
                acc.total_clips += section.clips.len();
                acc.candidates += section.stats.candidates;
                acc.filtered_out += section.stats.filtered_out;
                acc.unnamed += section.stats.unnamed;
                acc
            });

        Self {
            source_file: source
                .file_name()
                .map_or_else(String::new, |n| n.to_string_lossy().into_owned()),
            generated_at: Utc::now(),
            filter_policy: report.policy,
            tracks,
            summary,
        }
    }
}

/// Writer for JSON extraction output files.
pub struct JsonResultWriter {
    output_path: PathBuf,
    result: Option<JsonResultFile>,
}

impl JsonResultWriter {
    /// Create a new JSON writer.
    pub fn new(path: &Path) -> Self {
        Self {
            output_path: path.to_path_buf(),
            result: None,
        }
    }
}

impl OutputWriter for JsonResultWriter {
    fn write_report(&mut self, source: &Path, report: &Report) -> Result<()> {
        self.result = Some(JsonResultFile::from_report(source, report));
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        let Some(result) = self.result.take() else {
            return Ok(());
        };
        write_json(&self.output_path, &result)
    }
}

/// Write a table as a JSON array of row objects.
pub fn write_table_json(path: &Path, table: &Table) -> Result<()> {
    write_json(path, table.rows())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| Error::JsonWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
