//! Output writers for roll-up rows.
//!
//! This module handles:
//! - The fixed 11-column row shape shared by all four levels
//! - The sink contract and its four-file CSV implementation

pub mod csv_sink;
pub mod row;

// Re-export main types
pub use csv_sink::{CsvRollupSink, RollupSink};
pub use row::{Level, LevelTotals, OutputRow, OUTPUT_HEADERS};
