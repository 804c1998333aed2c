//! Single-pass streaming aggregation over one file's record sequence.
//!
//! Records arrive grouped by state, then county (extracts are published in
//! ascending GEOID order). The pass keeps one accumulator per level and
//! O(1) auxiliary state: when a record's county or state prefix differs
//! from the previous record's, the finished group is flushed before the new
//! record is folded in. End of stream flushes county, state, and national
//! together - that final flush is triggered by iterator exhaustion, never
//! by a row-count constant.
//!
//! Sortedness is assumed, not checked: an unsorted file silently produces
//! one roll-up row per contiguous run of a key rather than per key.

use crate::aggregator::accumulator::LevelAccumulator;
use crate::aggregator::key::{county_of, state_of};
use crate::output::csv_sink::RollupSink;
use crate::output::row::{Level, OutputRow};
use crate::source::period::Period;
use crate::source::record::TractRecord;
use crate::utils::config::NATIONAL_GEOID;
use crate::utils::error::{AggregateError, SourceError};
use log::{debug, warn};

/// Rows emitted per level while processing one file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct FileCounts {
    pub records: u64,
    pub tract_rows: u64,
    pub county_rows: u64,
    pub state_rows: u64,
    pub national_rows: u64,
}

impl FileCounts {
    /// Fold another file's counts into a run-level tally
    pub fn merge(&mut self, other: &FileCounts) {
        self.records += other.records;
        self.tract_rows += other.tract_rows;
        self.county_rows += other.county_rows;
        self.state_rows += other.state_rows;
        self.national_rows += other.national_rows;
    }
}

/// Streaming hierarchical aggregator for one input file.
///
/// Owns the three level accumulators for the duration of one file; they
/// start zeroed and national totals never carry over to the next file.
pub struct StreamingAggregator {
    period: Period,
    national: LevelAccumulator,
    state: LevelAccumulator,
    county: LevelAccumulator,
    current_state: Option<String>,
    current_county: Option<String>,
    counts: FileCounts,
}

impl StreamingAggregator {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            national: LevelAccumulator::new(),
            state: LevelAccumulator::new(),
            county: LevelAccumulator::new(),
            current_state: None,
            current_county: None,
            counts: FileCounts::default(),
        }
    }

    /// Drive the full pass: consume every record, then run the end-of-file
    /// flush. Consumes the aggregator; per-file state cannot leak into a
    /// later run.
    ///
    /// # Errors
    /// * `AggregateError::MalformedKey` - a GEOID too short for key
    ///   derivation; fatal for this file
    /// * `AggregateError::Source` - the record iterator failed; fatal for
    ///   this file
    /// * `AggregateError::Sink` - an output destination failed; fatal for
    ///   the whole run
    pub fn run<I, S>(mut self, records: I, sink: &mut S) -> Result<FileCounts, AggregateError>
    where
        I: IntoIterator<Item = Result<TractRecord, SourceError>>,
        S: RollupSink + ?Sized,
    {
        for record in records {
            let record = record?;
            self.observe(&record, sink)?;
        }
        self.finish(sink)
    }

    /// Process one record: tract passthrough, boundary flushes, then fold
    /// the record into all three accumulators.
    fn observe<S>(&mut self, record: &TractRecord, sink: &mut S) -> Result<(), AggregateError>
    where
        S: RollupSink + ?Sized,
    {
        // Tract level is a 1:1 passthrough, written before any flush
        sink.write_row(Level::Tract, &OutputRow::from_record(self.period, record))?;
        self.counts.records += 1;
        self.counts.tract_rows += 1;

        let county_key = county_of(&record.geo_id)?.to_string();
        let state_key = state_of(&record.geo_id)?.to_string();

        if self.current_county.is_none() {
            debug!(
                "First record: state {}, county {}",
                state_key, county_key
            );
        }

        // A boundary flushes the finished group before this record is added
        // to the fresh one. State is checked independently of county: a
        // state change always coincides with a county change, but neither
        // check may assume the other fired.
        if let Some(current) = self.current_county.clone() {
            if current != county_key {
                self.flush_county(&current, sink)?;
            }
        }
        if let Some(current) = self.current_state.clone() {
            if current != state_key {
                self.flush_state(&current, sink)?;
            }
        }

        self.national.add(&record.metrics);
        self.state.add(&record.metrics);
        self.county.add(&record.metrics);

        self.current_state = Some(state_key);
        self.current_county = Some(county_key);
        Ok(())
    }

    /// End-of-stream flush: the final county and state groups and the
    /// whole-file national row, unconditionally and in that order.
    fn finish<S>(mut self, sink: &mut S) -> Result<FileCounts, AggregateError>
    where
        S: RollupSink + ?Sized,
    {
        let (Some(county_key), Some(state_key)) =
            (self.current_county.clone(), self.current_state.clone())
        else {
            warn!("Input file held no records; nothing to flush");
            return Ok(self.counts);
        };

        self.flush_county(&county_key, sink)?;
        self.flush_state(&state_key, sink)?;

        match self.national.finalize() {
            Some(totals) => {
                sink.write_row(
                    Level::National,
                    &OutputRow::from_totals(self.period, NATIONAL_GEOID, totals),
                )?;
                self.counts.national_rows += 1;
            }
            None => debug!("Empty national group, skipping emission"),
        }
        self.national.reset();

        Ok(self.counts)
    }

    fn flush_county<S>(&mut self, key: &str, sink: &mut S) -> Result<(), AggregateError>
    where
        S: RollupSink + ?Sized,
    {
        match self.county.finalize() {
            Some(totals) => {
                sink.write_row(
                    Level::County,
                    &OutputRow::from_totals(self.period, key, totals),
                )?;
                self.counts.county_rows += 1;
            }
            None => debug!("Empty county group {}, skipping emission", key),
        }
        self.county.reset();
        Ok(())
    }

    fn flush_state<S>(&mut self, key: &str, sink: &mut S) -> Result<(), AggregateError>
    where
        S: RollupSink + ?Sized,
    {
        match self.state.finalize() {
            Some(totals) => {
                sink.write_row(
                    Level::State,
                    &OutputRow::from_totals(self.period, key, totals),
                )?;
                self.counts.state_rows += 1;
            }
            None => debug!("Empty state group {}, skipping emission", key),
        }
        self.state.reset();
        Ok(())
    }
}
