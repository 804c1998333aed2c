//! CSV record source for one input extract.
//!
//! Produces a lazy, finite, forward-only sequence of [`TractRecord`]s.
//! Column names are resolved once from the header row; see
//! [`crate::source::schema`] for the casing variants.

use crate::source::record::{TractMetrics, TractRecord};
use crate::source::schema::{ColumnMap, SchemaVariant, GEOID_COLUMN, METRIC_COLUMNS};
use crate::utils::error::SourceError;
use csv::StringRecord;
use log::debug;
use std::fs::File;
use std::path::Path;

/// Streaming reader over one extract file
pub struct CsvRecordSource {
    columns: ColumnMap,
    rows: csv::StringRecordsIntoIter<File>,
    row_num: u64,
}

impl std::fmt::Debug for CsvRecordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvRecordSource")
            .field("columns", &self.columns)
            .field("row_num", &self.row_num)
            .finish_non_exhaustive()
    }
}

impl CsvRecordSource {
    /// Open an extract and resolve its header row.
    ///
    /// # Errors
    /// * `SourceError::Io` - file cannot be opened
    /// * `SourceError::MissingHeader` / `MissingColumn` - header row absent
    ///   or lacking a required column under the requested variant
    pub fn open(path: &Path, variant: SchemaVariant) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(SourceError::MissingHeader);
        }

        let columns = ColumnMap::resolve(&headers, variant)?;
        debug!(
            "{}: resolved {:?} headers, period columns: {}",
            path.display(),
            columns.detected_variant(),
            columns.has_period_columns()
        );

        Ok(Self {
            columns,
            rows: reader.into_records(),
            row_num: 0,
        })
    }

    /// The resolved column layout of this extract
    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    fn parse_row(&self, row: &StringRecord) -> Result<TractRecord, SourceError> {
        let geo_id = field(row, self.columns.geoid, GEOID_COLUMN, self.row_num)?.to_string();

        let m = &self.columns.metrics;
        let metrics = TractMetrics {
            active_res: self.count(row, m[0], METRIC_COLUMNS[0])?,
            res_vac: self.count(row, m[1], METRIC_COLUMNS[1])?,
            avg_days_vacant: self.ratio(row, m[2], METRIC_COLUMNS[2])?,
            vac_0_3: self.count(row, m[3], METRIC_COLUMNS[3])?,
            vac_3_6: self.count(row, m[4], METRIC_COLUMNS[4])?,
            vac_6_12: self.count(row, m[5], METRIC_COLUMNS[5])?,
            vac_12_24: self.count(row, m[6], METRIC_COLUMNS[6])?,
            vac_24_36: self.count(row, m[7], METRIC_COLUMNS[7])?,
            vac_36_plus: self.count(row, m[8], METRIC_COLUMNS[8])?,
        };

        let month = match self.columns.month {
            Some(idx) => Some(self.int(row, idx, "month")? as u32),
            None => None,
        };
        let year = match self.columns.year {
            Some(idx) => Some(self.int(row, idx, "year")? as i32),
            None => None,
        };

        Ok(TractRecord {
            geo_id,
            month,
            year,
            metrics,
        })
    }

    /// Count columns come back as integer text, or as fraction-less decimal
    /// text in extracts that round-tripped through a floating-point export.
    fn count(&self, row: &StringRecord, idx: usize, name: &'static str) -> Result<u64, SourceError> {
        let raw = field(row, idx, name, self.row_num)?;
        if let Ok(v) = raw.parse::<u64>() {
            return Ok(v);
        }
        match raw.parse::<f64>() {
            Ok(v) if v >= 0.0 && v.fract() == 0.0 => Ok(v as u64),
            _ => Err(self.invalid(name, raw)),
        }
    }

    fn ratio(&self, row: &StringRecord, idx: usize, name: &'static str) -> Result<f64, SourceError> {
        let raw = field(row, idx, name, self.row_num)?;
        raw.parse::<f64>().map_err(|_| self.invalid(name, raw))
    }

    fn int(&self, row: &StringRecord, idx: usize, name: &'static str) -> Result<i64, SourceError> {
        let raw = field(row, idx, name, self.row_num)?;
        if let Ok(v) = raw.parse::<i64>() {
            return Ok(v);
        }
        match raw.parse::<f64>() {
            Ok(v) if v.fract() == 0.0 => Ok(v as i64),
            _ => Err(self.invalid(name, raw)),
        }
    }

    fn invalid(&self, column: &'static str, value: &str) -> SourceError {
        SourceError::InvalidNumber {
            row: self.row_num,
            column,
            value: value.to_string(),
        }
    }
}

fn field<'r>(
    row: &'r StringRecord,
    idx: usize,
    name: &'static str,
    row_num: u64,
) -> Result<&'r str, SourceError> {
    row.get(idx).ok_or(SourceError::InvalidNumber {
        row: row_num,
        column: name,
        value: String::new(),
    })
}

impl Iterator for CsvRecordSource {
    type Item = Result<TractRecord, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = match self.rows.next()? {
            Ok(row) => row,
            Err(e) => return Some(Err(e.into())),
        };
        self.row_num += 1;
        Some(self.parse_row(&row))
    }
}
