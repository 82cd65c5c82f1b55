//! Single file processing pipeline.

use crate::config::OutputFormat;
use crate::error::{Error, Result};
use crate::output::{CsvWriter, JsonResultWriter, OutputWriter, TextWriter};
use crate::pipeline::output_path_for;
use crate::timeline::{FilterPolicy, Report, extract_file};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Options for processing a single file.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Output formats to generate.
    pub formats: Vec<OutputFormat>,
    /// Clip name filter policy.
    pub filter_policy: FilterPolicy,
    /// Whether to include a UTF-8 BOM in CSV output.
    pub csv_bom: bool,
}

/// Extract a timeline file and write every requested output.
pub fn process_file(
    input_path: &Path,
    output_dir: &Path,
    options: &ProcessOptions,
) -> Result<ProcessResult> {
    let start_time = Instant::now();

    info!("Processing: {}", input_path.display());

    let report = extract_file(input_path, options.filter_policy)?;

    std::fs::create_dir_all(output_dir).map_err(|e| Error::OutputDirCreateFailed {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    for format in &options.formats {
        write_output(input_path, output_dir, *format, &report, options.csv_bom)?;
    }

    let duration_secs = start_time.elapsed().as_secs_f64();
    let result = ProcessResult::from_report(&report, duration_secs);
    info!(
        "Extracted {} clip(s) from {} in {:.2}s",
        result.clips,
        input_path.display(),
        duration_secs
    );

    Ok(result)
}

/// Write a report to an output file.
fn write_output(
    input_path: &Path,
    output_dir: &Path,
    format: OutputFormat,
    report: &Report,
    csv_bom: bool,
) -> Result<()> {
    let output_path = output_path_for(input_path, output_dir, format);
    debug!("Writing {} output: {}", format, output_path.display());

    let mut writer: Box<dyn OutputWriter> = match format {
        OutputFormat::Text => Box::new(TextWriter::new(&output_path)?),
        OutputFormat::Csv => Box::new(CsvWriter::new(&output_path, csv_bom)?),
        OutputFormat::Json => Box::new(JsonResultWriter::new(&output_path)),
    };

    writer.write_report(input_path, report)?;
    writer.finalize()?;

    Ok(())
}

/// Result of processing a single file.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessResult {
    /// Number of clips reported.
    pub clips: usize,
    /// Number of clips dropped by the name filter.
    pub filtered_out: usize,
    /// Number of clips skipped for lack of a name.
    pub unnamed: usize,
    /// Processing duration in seconds.
    pub duration_secs: f64,
}

impl ProcessResult {
    fn from_report(report: &Report, duration_secs: f64) -> Self {
        let (filtered_out, unnamed) = report
            .sections
            .iter()
            .fold((0, 0), |(filtered, unnamed), section| {
                (
                    filtered + section.stats.filtered_out,
                    unnamed + section.stats.unnamed,
                )
            });

        Self {
            clips: report.total_clips(),
            filtered_out,
            unnamed,
            duration_secs,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TIMELINE: &str = r#"<xmeml><sequence><media>
        <video><track>
            <clipitem><name>Final_Edit.mp4</name><width>1920</width></clipitem>
            <clipitem><name>B-roll.mov</name></clipitem>
        </track></video>
        <audio><track><clipitem><name>Voice.wav</name></clipitem></track></audio>
    </media></sequence></xmeml>"#;

    fn options(formats: Vec<OutputFormat>) -> ProcessOptions {
        ProcessOptions {
            formats,
            filter_policy: FilterPolicy::Legacy,
            csv_bom: false,
        }
    }

    #[test]
    fn test_process_file_writes_all_formats() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("edit.xml");
        std::fs::write(&input, TIMELINE).unwrap();
        let out = dir.path().join("reports");

        let result = process_file(
            &input,
            &out,
            &options(vec![OutputFormat::Text, OutputFormat::Csv, OutputFormat::Json]),
        )
        .unwrap();

        assert_eq!(result.clips, 1);
        assert_eq!(result.filtered_out, 2);
        assert_eq!(result.unnamed, 0);

        let text = std::fs::read_to_string(out.join("edit.clips.txt")).unwrap();
        assert!(text.contains("片段名称: Final_Edit.mp4"));
        assert!(text.contains("  素材长度: 1920"));

        let csv = std::fs::read_to_string(out.join("edit.clips.csv")).unwrap();
        assert!(csv.starts_with("片段名称,素材长度,"));
        assert!(out.join("edit.clips.json").exists());
    }

    #[test]
    fn test_process_file_malformed_xml() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("broken.xml");
        std::fs::write(&input, "<xmeml><video>").unwrap();

        let result = process_file(&input, dir.path(), &options(vec![OutputFormat::Text]));
        assert!(matches!(result, Err(Error::DocumentParse { .. })));
        assert!(!dir.path().join("broken.clips.txt").exists());
    }
}
