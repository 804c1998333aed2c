//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading an input extract
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("expected column not found in header: {0}")]
    MissingColumn(String),

    #[error("input file has no header row")]
    MissingHeader,

    #[error("row {row}: column {column} holds non-numeric value {value:?}")]
    InvalidNumber {
        row: u64,
        column: &'static str,
        value: String,
    },

    #[error("no reporting period in record fields or filename: {0}")]
    UnknownPeriod(String),
}

/// Errors that can occur inside the streaming aggregation pass
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("geographic identifier too short to derive keys: {0:?}")]
    MalformedKey(String),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Sink(#[from] OutputError),
}

/// Errors that can occur while writing roll-up files
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to write roll-up row: {0}")]
    WriteFailed(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid output path: {0}")]
    InvalidPath(String),
}

impl AggregateError {
    /// Whether this error must abort the whole run rather than just the
    /// current input file. Partial output across the four destinations is
    /// not acceptable, so sink failures are never skipped.
    pub fn is_fatal_for_run(&self) -> bool {
        matches!(self, AggregateError::Sink(_))
    }
}
