//! Clipscan - clip metadata extraction for NLE timeline exports.
//!
//! This crate reads XML timeline exports, selects the clips on video and
//! audio tracks, and reports their technical attributes as text, CSV or JSON.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod timeline;

use clap::Parser;
use cli::{Cli, Command, ExtractArgs};
use config::{
    Config, OutputFormat, config_file_path, load_default_config, save_default_config,
};
use output::{CsvWriter, Table, write_table_json};
use pipeline::{ProcessCheck, ProcessOptions, collect_input_files, output_dir_for, process_file};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

pub use error::{Error, Result};

/// Main entry point for clipscan CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.extract.verbose, cli.extract.quiet);

    let config = load_default_config()?;

    if let Some(command) = cli.command {
        return handle_command(command, &config);
    }

    if cli.inputs.is_empty() {
        cli::help::print_smart_help(&config);
        return Ok(());
    }

    extract_files(&cli.inputs, &cli.extract, &config)
}

/// Extract every input timeline with the given options.
fn extract_files(inputs: &[PathBuf], args: &ExtractArgs, config: &Config) -> Result<()> {
    use crate::output::progress;
    use std::time::Instant;

    validate_stdout_args(inputs, args)?;

    let total_start = Instant::now();

    let files = collect_input_files(inputs)?;
    if files.is_empty() {
        return Err(Error::NoValidInputFiles);
    }

    let filter_policy = args.policy.unwrap_or(config.defaults.filter_policy);
    info!(
        "Found {} timeline file(s), filter policy: {}",
        files.len(),
        filter_policy
    );

    if args.stdout {
        // A directory argument can expand to several timelines.
        let [file] = files.as_slice() else {
            return Err(stdout_single_input_error());
        };
        return print_report(&file.path, filter_policy);
    }

    let options = ProcessOptions {
        formats: args
            .format
            .clone()
            .unwrap_or_else(|| config.defaults.formats.clone()),
        filter_policy,
        csv_bom: config.defaults.csv_bom && !args.no_csv_bom,
    };
    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| config.defaults.output_dir.clone());

    let progress_enabled = !args.quiet && !args.no_progress;
    let file_progress = progress::create_file_progress(files.len(), progress_enabled);

    let mut processed = 0;
    let mut skipped = 0;
    let mut errors = 0;
    let mut total_clips = 0;
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();

    for input in &files {
        let file = input.path.as_path();
        let file_output_dir = output_dir_for(input, output_dir.as_deref());

        // Explicit files with equal names can still map to the same outputs.
        let stem_path = pipeline::output_path_for(file, &file_output_dir, OutputFormat::Text);
        if let Some(first) = claimed.get(&stem_path) {
            warn!(
                "Skipping {}: its outputs would overwrite those of {}",
                file.display(),
                first.display()
            );
            skipped += 1;
            progress::inc_progress(file_progress.as_ref());
            continue;
        }
        claimed.insert(stem_path, file);

        if pipeline::should_process(file, &file_output_dir, &options.formats, args.force)
            == ProcessCheck::SkipExists
        {
            info!("Skipping (output exists): {}", file.display());
            skipped += 1;
            progress::inc_progress(file_progress.as_ref());
            continue;
        }

        match process_file(file, &file_output_dir, &options) {
            Ok(result) => {
                processed += 1;
                total_clips += result.clips;
            }
            Err(e) => {
                error!("Failed to process {}: {}", file.display(), e);
                errors += 1;
                if args.fail_fast {
                    progress::finish_progress(file_progress, "Failed");
                    return Err(e);
                }
            }
        }
        progress::inc_progress(file_progress.as_ref());
    }

    progress::finish_progress(file_progress, "Complete");

    info!(
        "Complete: {} processed, {} skipped, {} errors, {} clips in {:.2}s",
        processed,
        skipped,
        errors,
        total_clips,
        total_start.elapsed().as_secs_f64()
    );

    if errors > 0 && !args.fail_fast {
        warn!("{} file(s) had errors", errors);
    }

    Ok(())
}

fn stdout_single_input_error() -> Error {
    Error::InvalidArguments {
        message: "--stdout requires exactly one input file".to_string(),
    }
}

/// Reject option combinations that `--stdout` cannot honour.
fn validate_stdout_args(inputs: &[PathBuf], args: &ExtractArgs) -> Result<()> {
    if !args.stdout {
        return Ok(());
    }

    if inputs.len() != 1 {
        return Err(stdout_single_input_error());
    }

    let message = if args.output_dir.is_some() {
        "--stdout cannot be used with --output-dir"
    } else if args.format.is_some() {
        "--stdout cannot be used with --format"
    } else {
        return Ok(());
    };

    Err(Error::InvalidArguments {
        message: message.to_string(),
    })
}

#[allow(clippy::print_stdout)]
fn print_report(file: &Path, policy: timeline::FilterPolicy) -> Result<()> {
    use std::io::Write;

    let report = timeline::extract_file(file, policy)?;
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{report}")?;
    stdout.flush()?;
    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // stdout is reserved for reports.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_command(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action),
        Command::Export {
            report,
            output,
            no_csv_bom,
        } => export_report(
            &report,
            output.as_deref(),
            config.defaults.csv_bom && !no_csv_bom,
        ),
    }
}

/// Convert a saved text report into a CSV or JSON table.
fn export_report(report_path: &Path, output: Option<&Path>, csv_bom: bool) -> Result<()> {
    let text = std::fs::read_to_string(report_path).map_err(|e| Error::DocumentRead {
        path: report_path.to_path_buf(),
        source: e,
    })?;
    let table = Table::from_report_text(&text)?;

    let output_path = output.map_or_else(|| report_path.with_extension("csv"), Path::to_path_buf);
    let is_json = output_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        write_table_json(&output_path, &table)?;
    } else {
        let mut writer = CsvWriter::new(&output_path, csv_bom)?;
        writer.write_table(&table)?;
        output::OutputWriter::finalize(&mut writer)?;
    }

    info!(
        "Exported {} row(s) x {} column(s) to {}",
        table.rows().len(),
        table.columns().len(),
        output_path.display()
    );

    Ok(())
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: cli::ConfigAction) -> Result<()> {
    use cli::ConfigAction;

    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default())?;
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(stdout: bool) -> ExtractArgs {
        ExtractArgs {
            format: None,
            output_dir: None,
            policy: None,
            stdout,
            force: false,
            fail_fast: false,
            no_csv_bom: false,
            no_progress: false,
            quiet: false,
            verbose: 0,
        }
    }

    #[test]
    fn test_stdout_validation() {
        let one = [PathBuf::from("edit.xml")];
        let two = [PathBuf::from("a.xml"), PathBuf::from("b.xml")];

        assert!(validate_stdout_args(&one, &args(true)).is_ok());
        assert!(validate_stdout_args(&two, &args(false)).is_ok());
        assert!(matches!(
            validate_stdout_args(&two, &args(true)),
            Err(Error::InvalidArguments { .. })
        ));

        let mut with_dir = args(true);
        with_dir.output_dir = Some(PathBuf::from("/tmp"));
        assert!(validate_stdout_args(&one, &with_dir).is_err());

        let mut with_format = args(true);
        with_format.format = Some(vec![OutputFormat::Csv]);
        assert!(validate_stdout_args(&one, &with_format).is_err());
    }
}
