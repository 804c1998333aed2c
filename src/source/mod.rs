//! Input side: extract files, column schemas, and record parsing.
//!
//! This module handles:
//! - Resolving the upper/lower header casing variants
//! - Parsing one extract into a lazy record sequence
//! - Deriving the reporting period of a file

pub mod csv_source;
pub mod period;
pub mod record;
pub mod schema;

// Re-export main types
pub use csv_source::CsvRecordSource;
pub use period::Period;
pub use record::{TractMetrics, TractRecord};
pub use schema::{ColumnMap, SchemaVariant};
