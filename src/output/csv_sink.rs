//! CSV sink: four append-only destinations, one per spatial scale.
//!
//! Each destination receives its single header row at creation. Files are
//! created fresh per run; re-running regenerates them from the same inputs
//! rather than appending.

use crate::output::row::{Level, OutputRow, OUTPUT_HEADERS};
use crate::utils::config::{COUNTY_FILE, NATIONAL_FILE, STATE_FILE, TRACT_FILE};
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::path::Path;

/// Destination for finished roll-up rows.
///
/// One call per emitted row; implementations must keep the four levels
/// independent of each other.
pub trait RollupSink {
    fn write_row(&mut self, level: Level, row: &OutputRow) -> Result<(), OutputError>;
}

/// Writes each level to its own CSV file in one output directory
#[derive(Debug)]
pub struct CsvRollupSink {
    tract: csv::Writer<File>,
    county: csv::Writer<File>,
    state: csv::Writer<File>,
    national: csv::Writer<File>,
}

impl CsvRollupSink {
    /// Create the four destination files and write their header rows.
    ///
    /// # Errors
    /// * `OutputError::InvalidPath` - the output directory cannot be created
    /// * `OutputError::WriteFailed` - a header row cannot be written
    pub fn create(output_dir: &Path) -> Result<Self, OutputError> {
        if output_dir.exists() && !output_dir.is_dir() {
            return Err(OutputError::InvalidPath(format!(
                "not a directory: {}",
                output_dir.display()
            )));
        }
        if !output_dir.exists() {
            debug!("Creating output directory: {}", output_dir.display());
            std::fs::create_dir_all(output_dir).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "cannot create directory {}: {}",
                    output_dir.display(),
                    e
                ))
            })?;
        }

        info!("Writing roll-ups to: {}", output_dir.display());

        Ok(Self {
            tract: open_destination(output_dir, TRACT_FILE)?,
            county: open_destination(output_dir, COUNTY_FILE)?,
            state: open_destination(output_dir, STATE_FILE)?,
            national: open_destination(output_dir, NATIONAL_FILE)?,
        })
    }

    fn writer(&mut self, level: Level) -> &mut csv::Writer<File> {
        match level {
            Level::Tract => &mut self.tract,
            Level::County => &mut self.county,
            Level::State => &mut self.state,
            Level::National => &mut self.national,
        }
    }

    /// Flush all four destinations. Called once at end of run.
    pub fn flush(&mut self) -> Result<(), OutputError> {
        for level in [Level::Tract, Level::County, Level::State, Level::National] {
            self.writer(level).flush()?;
        }
        Ok(())
    }
}

fn open_destination(dir: &Path, name: &str) -> Result<csv::Writer<File>, OutputError> {
    let path = dir.join(name);
    let file = File::create(&path)?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(OUTPUT_HEADERS)?;
    Ok(writer)
}

impl RollupSink for CsvRollupSink {
    fn write_row(&mut self, level: Level, row: &OutputRow) -> Result<(), OutputError> {
        self.writer(level).write_record(row.to_fields())?;
        Ok(())
    }
}

/// Collects rows in memory, keyed by level. Test support.
#[cfg(test)]
#[derive(Default)]
pub struct MemorySink {
    pub rows: Vec<(Level, OutputRow)>,
}

#[cfg(test)]
impl MemorySink {
    pub fn rows_at(&self, level: Level) -> Vec<&OutputRow> {
        self.rows
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, r)| r)
            .collect()
    }
}

#[cfg(test)]
impl RollupSink for MemorySink {
    fn write_row(&mut self, level: Level, row: &OutputRow) -> Result<(), OutputError> {
        self.rows.push((level, row.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::row::LevelTotals;
    use crate::source::period::Period;

    fn sample_row() -> OutputRow {
        OutputRow::from_totals(
            Period::new(6, 2013),
            "01001",
            LevelTotals {
                active_res: 20,
                res_vac: 5,
                avg_days_vacant: 5.0,
                vac_0_3: 2,
                vac_3_6: 1,
                vac_6_12: 1,
                vac_12_24: 1,
                vac_24_36: 0,
                vac_36_plus: 0,
            },
        )
    }

    #[test]
    fn test_create_writes_headers_to_all_four_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvRollupSink::create(dir.path()).unwrap();
        sink.flush().unwrap();

        for name in [TRACT_FILE, COUNTY_FILE, STATE_FILE, NATIONAL_FILE] {
            let contents = std::fs::read_to_string(dir.path().join(name)).unwrap();
            let header = contents.lines().next().unwrap();
            assert!(header.starts_with("Month/Year,GEOID,totalAMS_RES"), "{name}");
        }
    }

    #[test]
    fn test_rows_land_in_their_level_file_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = CsvRollupSink::create(dir.path()).unwrap();
        sink.write_row(Level::County, &sample_row()).unwrap();
        sink.flush().unwrap();

        let county = std::fs::read_to_string(dir.path().join(COUNTY_FILE)).unwrap();
        assert_eq!(county.lines().count(), 2);
        assert!(county.lines().nth(1).unwrap().starts_with("06/2013,01001,20,5,5"));

        let state = std::fs::read_to_string(dir.path().join(STATE_FILE)).unwrap();
        assert_eq!(state.lines().count(), 1);
    }

    #[test]
    fn test_create_rejects_file_as_output_dir() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = CsvRollupSink::create(file.path()).unwrap_err();
        assert!(matches!(err, OutputError::InvalidPath(_)));
    }

    #[test]
    fn test_rerun_truncates_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut sink = CsvRollupSink::create(dir.path()).unwrap();
            sink.write_row(Level::Tract, &sample_row()).unwrap();
            sink.flush().unwrap();
        }
        {
            let mut sink = CsvRollupSink::create(dir.path()).unwrap();
            sink.flush().unwrap();
        }
        let tract = std::fs::read_to_string(dir.path().join(TRACT_FILE)).unwrap();
        assert_eq!(tract.lines().count(), 1);
    }
}
