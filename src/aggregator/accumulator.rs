//! Running totals for one grouping level.
//!
//! One accumulator exists per roll-up level (national, state, county). The
//! eight count metrics accumulate by summation; the days-vacant ratio
//! accumulates as a running sum divided by the record count at finalize.

use crate::output::row::LevelTotals;
use crate::source::record::TractMetrics;

/// Mutable running state for one grouping level within one file
#[derive(Debug, Clone, Default)]
pub struct LevelAccumulator {
    active_res: u64,
    res_vac: u64,
    days_vacant_sum: f64,
    vac_0_3: u64,
    vac_3_6: u64,
    vac_6_12: u64,
    vac_12_24: u64,
    vac_24_36: u64,
    vac_36_plus: u64,
    records: u64,
}

impl LevelAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record's metrics into the running totals
    pub fn add(&mut self, m: &TractMetrics) {
        self.active_res += m.active_res;
        self.res_vac += m.res_vac;
        self.days_vacant_sum += m.avg_days_vacant;
        self.vac_0_3 += m.vac_0_3;
        self.vac_3_6 += m.vac_3_6;
        self.vac_6_12 += m.vac_6_12;
        self.vac_12_24 += m.vac_12_24;
        self.vac_24_36 += m.vac_24_36;
        self.vac_36_plus += m.vac_36_plus;
        self.records += 1;
    }

    /// Records contributed since the last reset
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Turn the running state into emitted totals.
    ///
    /// Returns `None` for a zero-record group: flushing an empty group is
    /// skipped rather than emitting a meaningless zero mean (or dividing
    /// by zero).
    pub fn finalize(&self) -> Option<LevelTotals> {
        if self.records == 0 {
            return None;
        }
        Some(LevelTotals {
            active_res: self.active_res,
            res_vac: self.res_vac,
            avg_days_vacant: self.days_vacant_sum / self.records as f64,
            vac_0_3: self.vac_0_3,
            vac_3_6: self.vac_3_6,
            vac_6_12: self.vac_6_12,
            vac_12_24: self.vac_12_24,
            vac_24_36: self.vac_24_36,
            vac_36_plus: self.vac_36_plus,
        })
    }

    /// Zero all sums and the counter, ready for the next group
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accumulator_is_empty() {
        let acc = LevelAccumulator::new();
        assert_eq!(acc.records(), 0);
        assert!(acc.finalize().is_none());
    }

    #[test]
    fn test_add_sums_counts_and_averages_ratio() {
        let mut acc = LevelAccumulator::new();
        acc.add(&TractMetrics::uniform(10, 4.0));
        acc.add(&TractMetrics::uniform(20, 8.0));

        let totals = acc.finalize().unwrap();
        assert_eq!(totals.active_res, 30);
        assert_eq!(totals.vac_36_plus, 30);
        // mean of the ratio, not its sum
        assert_eq!(totals.avg_days_vacant, 6.0);
    }

    #[test]
    fn test_single_record_mean_is_the_value() {
        let mut acc = LevelAccumulator::new();
        acc.add(&TractMetrics::uniform(5, 7.5));
        let totals = acc.finalize().unwrap();
        assert_eq!(totals.avg_days_vacant, 7.5);
    }

    #[test]
    fn test_reset_returns_to_empty() {
        let mut acc = LevelAccumulator::new();
        acc.add(&TractMetrics::uniform(10, 4.0));
        acc.reset();
        assert_eq!(acc.records(), 0);
        assert!(acc.finalize().is_none());
    }

    #[test]
    fn test_finalize_does_not_consume_state() {
        let mut acc = LevelAccumulator::new();
        acc.add(&TractMetrics::uniform(10, 4.0));
        let first = acc.finalize().unwrap();
        let second = acc.finalize().unwrap();
        assert_eq!(first, second);
    }
}
