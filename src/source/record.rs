//! Input data model: one record per census tract.

use serde::{Deserialize, Serialize};

/// The nine vacancy metrics reported for one tract.
///
/// Eight are counts and roll up by summation. `avg_days_vacant` is a
/// per-tract ratio and must be averaged across records, never summed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TractMetrics {
    /// Active residential addresses
    pub active_res: u64,

    /// Residential addresses flagged vacant
    pub res_vac: u64,

    /// Average days vacant across the tract's vacant addresses
    pub avg_days_vacant: f64,

    /// Vacant less than 3 months
    pub vac_0_3: u64,

    /// Vacant 3 to 6 months
    pub vac_3_6: u64,

    /// Vacant 6 to 12 months
    pub vac_6_12: u64,

    /// Vacant 12 to 24 months
    pub vac_12_24: u64,

    /// Vacant 24 to 36 months
    pub vac_24_36: u64,

    /// Vacant 36 months or longer
    pub vac_36_plus: u64,
}

/// One row of an input extract.
///
/// `geo_id` is hierarchical: the first 2 characters are the state code and
/// the first 5 the state + county code; the full string identifies the tract.
#[derive(Debug, Clone, PartialEq)]
pub struct TractRecord {
    /// Hierarchical geographic identifier
    pub geo_id: String,

    /// Reporting month, when the extract carries it in-record
    pub month: Option<u32>,

    /// Reporting year, when the extract carries it in-record
    pub year: Option<i32>,

    /// The nine vacancy metrics
    pub metrics: TractMetrics,
}

#[cfg(test)]
impl TractMetrics {
    /// Uniform metrics for tests: every count `n`, mean field `avg`.
    pub fn uniform(n: u64, avg: f64) -> Self {
        Self {
            active_res: n,
            res_vac: n,
            avg_days_vacant: avg,
            vac_0_3: n,
            vac_3_6: n,
            vac_6_12: n,
            vac_12_24: n,
            vac_24_36: n,
            vac_36_plus: n,
        }
    }
}
