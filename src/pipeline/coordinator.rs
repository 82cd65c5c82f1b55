//! Pipeline coordination for file processing.

use crate::config::OutputFormat;
use crate::constants::{TIMELINE_EXTENSION, output_extensions};
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Result of checking whether a file should be processed.
#[derive(Debug, PartialEq, Eq)]
pub enum ProcessCheck {
    /// File should be processed.
    Process,
    /// Skip - every requested output already exists.
    SkipExists,
}

/// A timeline file found on the command line or under a directory argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    /// Path to the timeline.
    pub path: PathBuf,
    /// Directory of the file relative to the scanned directory argument.
    /// Empty for files named explicitly.
    pub relative_dir: PathBuf,
}

impl InputFile {
    /// An explicitly named file.
    pub fn explicit(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            relative_dir: PathBuf::new(),
        }
    }
}

/// Determine the output directory for a file.
///
/// With an explicit output directory, files found by a directory scan keep
/// their subdirectory below it so equal file names do not collide.
pub fn output_dir_for(input: &InputFile, explicit_output_dir: Option<&Path>) -> PathBuf {
    explicit_output_dir.map_or_else(
        || {
            input
                .path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        },
        |dir| dir.join(&input.relative_dir),
    )
}

/// Get output file path for a given format.
pub fn output_path_for(input: &Path, output_dir: &Path, format: OutputFormat) -> PathBuf {
    // Non-UTF-8 names are converted lossily.
    let stem = input.file_stem().map_or_else(
        || std::borrow::Cow::Borrowed("timeline"),
        |s| s.to_string_lossy(),
    );

    let extension = match format {
        OutputFormat::Text => output_extensions::TEXT,
        OutputFormat::Csv => output_extensions::CSV,
        OutputFormat::Json => output_extensions::JSON,
    };

    output_dir.join(format!("{stem}{extension}"))
}

/// Check if a file should be processed.
pub fn should_process(
    input: &Path,
    output_dir: &Path,
    formats: &[OutputFormat],
    force: bool,
) -> ProcessCheck {
    if !force {
        let all_exist = formats
            .iter()
            .all(|fmt| output_path_for(input, output_dir, *fmt).exists());
        if all_exist {
            return ProcessCheck::SkipExists;
        }
    }

    ProcessCheck::Process
}

/// Collect timeline files from paths (files and directories).
///
/// Explicit file arguments are taken as given whatever their extension;
/// directories are searched recursively for `.xml` files in sorted order.
pub fn collect_input_files(paths: &[PathBuf]) -> Result<Vec<InputFile>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(InputFile::explicit(path.clone()));
        } else if path.is_dir() {
            collect_timeline_files_recursive(path, Path::new(""), &mut files)?;
        } else {
            warn!("Skipping non-existent path: {}", path.display());
        }
    }

    Ok(files)
}

fn collect_timeline_files_recursive(
    dir: &Path,
    relative_dir: &Path,
    files: &mut Vec<InputFile>,
) -> Result<()> {
    let mut entries = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            let nested = path
                .file_name()
                .map_or_else(|| relative_dir.to_path_buf(), |name| relative_dir.join(name));
            collect_timeline_files_recursive(&path, &nested, files)?;
        } else if is_timeline_file(&path) {
            files.push(InputFile {
                path,
                relative_dir: relative_dir.to_path_buf(),
            });
        }
    }

    Ok(())
}

/// Check if a file has the timeline export extension.
fn is_timeline_file(path: &Path) -> bool {
    use std::ffi::OsStr;

    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(OsStr::new(TIMELINE_EXTENSION)))
}
