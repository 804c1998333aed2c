//! Process command implementation.
//!
//! The process command:
//! 1. Enumerates input extracts matching the configured glob
//! 2. Opens the four roll-up destinations
//! 3. Streams each file through the aggregator, strictly sequentially
//! 4. Reports run-level tallies (and optionally a JSON summary)
//!
//! Per-file faults (schema mismatch, malformed GEOID, unreadable data) are
//! logged and counted without halting the run. Sink write failures abort
//! the run: partial output across the four destinations is not acceptable.

use crate::aggregator::{FileCounts, StreamingAggregator};
use crate::output::csv_sink::CsvRollupSink;
use crate::source::{CsvRecordSource, Period, SchemaVariant};
use crate::utils::config::{DEFAULT_INPUT_GLOB, DEFAULT_OUTPUT_DIR, SCHEMA_VERSION};
use crate::utils::error::AggregateError;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the process command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ProcessArgs {
    /// Glob pattern selecting input extract files
    pub input_glob: String,

    /// Directory receiving the four roll-up files
    pub output_dir: PathBuf,

    /// Header casing variant to expect (auto inspects each file)
    pub schema_variant: SchemaVariant,

    /// Optional path for a machine-readable run summary
    pub summary_json: Option<PathBuf>,
}

impl Default for ProcessArgs {
    fn default() -> Self {
        Self {
            input_glob: DEFAULT_INPUT_GLOB.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            schema_variant: SchemaVariant::Auto,
            summary_json: None,
        }
    }
}

/// One failed input file in the run summary
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub file: String,
    pub error: String,
}

/// Machine-readable account of one run
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub schema_version: &'static str,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub input_glob: String,
    pub files_found: usize,
    pub files_processed: usize,
    pub files_failed: usize,
    pub totals: FileCounts,
    pub failures: Vec<FileFailure>,
}

/// Validate process arguments
///
/// **Public** - can be called before execute_process for early validation
pub fn validate_args(args: &ProcessArgs) -> Result<()> {
    if args.input_glob.is_empty() {
        anyhow::bail!("input glob cannot be empty");
    }

    // Surface a bad pattern before any output file is created
    glob::Pattern::new(&args.input_glob)
        .with_context(|| format!("invalid input glob: {}", args.input_glob))?;

    if args.output_dir.as_os_str().is_empty() {
        anyhow::bail!("output directory cannot be empty");
    }

    Ok(())
}

/// Execute the process command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Process command arguments
///
/// # Returns
/// The run summary on success (some input files may still have failed;
/// see `files_failed`)
///
/// # Errors
/// * Output destinations cannot be created or written
/// * The input glob is invalid
pub fn execute_process(args: ProcessArgs) -> Result<RunSummary> {
    let start_time = Instant::now();
    let started_at = Utc::now();

    info!("Input pattern: {}", args.input_glob);

    let files = find_input_files(&args.input_glob)?;
    if files.is_empty() {
        warn!("No input files match {}", args.input_glob);
    } else {
        info!("Found {} input file(s)", files.len());
    }

    let mut sink = CsvRollupSink::create(&args.output_dir)
        .context("Failed to create output destinations")?;

    let mut totals = FileCounts::default();
    let mut failures = Vec::new();
    let mut processed = 0usize;

    for path in &files {
        info!("Processing {}", path.display());

        match process_file(path, args.schema_variant, &mut sink) {
            Ok(counts) => {
                processed += 1;
                info!(
                    "{}: {} records -> {} county, {} state, {} national row(s); {:.2}s since start",
                    path.display(),
                    counts.records,
                    counts.county_rows,
                    counts.state_rows,
                    counts.national_rows,
                    start_time.elapsed().as_secs_f64()
                );
                totals.merge(&counts);
            }
            Err(e) if e.is_fatal_for_run() => {
                return Err(anyhow::Error::new(e)
                    .context(format!("Output failure while processing {}", path.display())));
            }
            Err(e) => {
                error!("Skipping {}: {}", path.display(), e);
                failures.push(FileFailure {
                    file: path.display().to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    sink.flush().context("Failed to flush output destinations")?;

    let summary = RunSummary {
        schema_version: SCHEMA_VERSION,
        started_at,
        finished_at: Utc::now(),
        input_glob: args.input_glob.clone(),
        files_found: files.len(),
        files_processed: processed,
        files_failed: failures.len(),
        totals,
        failures,
    };

    info!(
        "Run complete: {}/{} file(s) processed, {} failed",
        summary.files_processed, summary.files_found, summary.files_failed
    );
    info!(
        "Rows emitted: {} tract, {} county, {} state, {} national ({} records)",
        totals.tract_rows, totals.county_rows, totals.state_rows, totals.national_rows,
        totals.records
    );
    info!("Total time: {:.2}s", start_time.elapsed().as_secs_f64());

    if let Some(path) = &args.summary_json {
        write_summary(&summary, path)?;
        info!("Run summary written to: {}", path.display());
    }

    Ok(summary)
}

/// Stream one extract through the aggregator.
///
/// **Private** - internal helper for execute_process
fn process_file(
    path: &Path,
    variant: SchemaVariant,
    sink: &mut CsvRollupSink,
) -> Result<FileCounts, AggregateError> {
    let source = CsvRecordSource::open(path, variant)?;
    let has_period_columns = source.columns().has_period_columns();
    let mut records = source.peekable();

    // Prefer the in-record period fields; fall back to the filename. A peek
    // at an unreadable first record defers the error to the main loop.
    let period = match records.peek() {
        Some(Ok(first)) if has_period_columns => match (first.month, first.year) {
            (Some(month), Some(year)) => Period::new(month, year),
            _ => Period::from_filename(path)?,
        },
        _ => Period::from_filename(path)?,
    };
    debug!("{}: period {}", path.display(), period);

    StreamingAggregator::new(period).run(records, sink)
}

/// Expand the input glob into a sorted file list
///
/// **Private** - internal helper for execute_process
fn find_input_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = glob::glob(pattern)
        .with_context(|| format!("invalid input glob: {pattern}"))?
        .filter_map(|entry| match entry {
            Ok(path) if path.is_file() => Some(path),
            Ok(_) => None,
            Err(e) => {
                warn!("Skipping unreadable path: {e}");
                None
            }
        })
        .collect();

    // Deterministic processing order regardless of filesystem enumeration
    files.sort();
    Ok(files)
}

/// Write the run summary as pretty-printed JSON
///
/// **Private** - internal helper for execute_process
fn write_summary(summary: &RunSummary, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create directory {}", parent.display()))?;
        }
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("cannot create summary file {}", path.display()))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), summary)
        .context("Failed to serialize run summary")?;
    Ok(())
}
