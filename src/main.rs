//! Vacancy Rollup CLI
//!
//! Turns periodic tract-level housing vacancy extracts into roll-up
//! summary files at tract, county, state, and national scale.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use vacancy_rollup::commands::{execute_process, validate_args, ProcessArgs};
use vacancy_rollup::output::OUTPUT_HEADERS;
use vacancy_rollup::source::{CsvRecordSource, Period, SchemaVariant};
use vacancy_rollup::utils::config::SCHEMA_VERSION;

/// Vacancy Rollup - multi-scale summaries of housing vacancy extracts
#[derive(Parser, Debug)]
#[command(name = "vacancy-rollup")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Roll up all matching extracts into the four output files
    Process {
        /// Glob pattern selecting input extract files
        #[arg(short, long, default_value = "*Data.csv")]
        input_glob: String,

        /// Directory receiving the four roll-up files
        #[arg(short, long, default_value = "rollups")]
        output_dir: PathBuf,

        /// Header casing variant to expect in the extracts
        #[arg(long, value_enum, default_value_t = SchemaVariant::Auto)]
        schema_variant: SchemaVariant,

        /// Write a machine-readable run summary to this path
        #[arg(long)]
        summary_json: Option<PathBuf>,
    },

    /// Inspect a single extract: schema variant, period, record count
    Inspect {
        /// Path to the extract file
        #[arg(short, long)]
        file: PathBuf,

        /// Header casing variant to expect
        #[arg(long, value_enum, default_value_t = SchemaVariant::Auto)]
        schema_variant: SchemaVariant,
    },

    /// Display the output schema
    Schema {
        /// Show full column details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Process {
            input_glob,
            output_dir,
            schema_variant,
            summary_json,
        } => {
            let args = ProcessArgs {
                input_glob,
                output_dir,
                schema_variant,
                summary_json,
            };

            // Validate args first
            validate_args(&args)?;

            let summary = execute_process(args)?;
            if summary.files_failed > 0 {
                anyhow::bail!(
                    "{} of {} input file(s) failed; see log for details",
                    summary.files_failed,
                    summary.files_found
                );
            }
        }

        Commands::Inspect {
            file,
            schema_variant,
        } => {
            inspect_extract(file, schema_variant)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Inspect a single extract file
///
/// **Private** - internal command implementation
fn inspect_extract(path: PathBuf, variant: SchemaVariant) -> Result<()> {
    println!("Inspecting extract: {}", path.display());

    let source = CsvRecordSource::open(&path, variant)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let detected = source.columns().detected_variant();
    let in_record_period = source.columns().has_period_columns();

    let mut records = 0u64;
    let mut first_geoid = None;
    let mut last_geoid = None;
    let mut period_from_record = None;

    for record in source {
        let record =
            record.with_context(|| format!("Failed to read record {}", records + 1))?;
        if first_geoid.is_none() {
            first_geoid = Some(record.geo_id.clone());
            if let (Some(month), Some(year)) = (record.month, record.year) {
                period_from_record = Some(Period::new(month, year));
            }
        }
        last_geoid = Some(record.geo_id);
        records += 1;
    }

    let period = match period_from_record {
        Some(p) => p,
        None => Period::from_filename(&path).context("No reporting period found")?,
    };

    println!("✓ Readable extract");
    println!("  Header casing: {:?}", detected);
    println!(
        "  Period: {} ({})",
        period,
        if in_record_period {
            "from record fields"
        } else {
            "from filename"
        }
    );
    println!("  Records: {}", records);
    if let (Some(first), Some(last)) = (first_geoid, last_geoid) {
        println!("  First GEOID: {}", first);
        println!("  Last GEOID:  {}", last);
    }

    Ok(())
}

/// Display schema information
///
/// **Private** - internal command implementation
fn display_schema(show_details: bool) {
    println!("Vacancy Rollup Output Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("All four destinations share one 11-column layout:");
        println!("  {:<16} - reporting period (MM/YYYY)", OUTPUT_HEADERS[0]);
        println!("  {:<16} - geography id (2/5/11 chars by scale)", OUTPUT_HEADERS[1]);
        println!("  {:<16} - active residential addresses", OUTPUT_HEADERS[2]);
        println!("  {:<16} - residential addresses vacant", OUTPUT_HEADERS[3]);
        println!("  {:<16} - mean days vacant (per-record mean)", OUTPUT_HEADERS[4]);
        println!("  {:<16} - vacant under 3 months", OUTPUT_HEADERS[5]);
        println!("  {:<16} - vacant 3-6 months", OUTPUT_HEADERS[6]);
        println!("  {:<16} - vacant 6-12 months", OUTPUT_HEADERS[7]);
        println!("  {:<16} - vacant 12-24 months", OUTPUT_HEADERS[8]);
        println!("  {:<16} - vacant 24-36 months", OUTPUT_HEADERS[9]);
        println!("  {:<16} - vacant 36+ months", OUTPUT_HEADERS[10]);
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Vacancy Rollup v{}", env!("CARGO_PKG_VERSION"));
    println!("Output Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Multi-scale roll-up summaries of census-tract housing vacancy extracts.");
}
