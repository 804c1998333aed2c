//! Output row schema shared by all four spatial scales.
//!
//! Every destination receives the same fixed 11-column shape so downstream
//! tooling can treat the four files uniformly; only the granularity of the
//! GEOID column differs between them.

use crate::source::record::TractRecord;
use crate::source::period::Period;
use serde::Serialize;

/// Spatial scale of an emitted roll-up row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Tract,
    County,
    State,
    National,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Tract => "tract",
            Level::County => "county",
            Level::State => "state",
            Level::National => "national",
        }
    }
}

/// Column headers written once at the top of each destination
pub const OUTPUT_HEADERS: [&str; 11] = [
    "Month/Year",
    "GEOID",
    "totalAMS_RES",
    "totalRES_VAC",
    "totalAVG_VAC_R",
    "totalVAC_3_RES",
    "totalVAC_3_6_R",
    "totalVAC_6_12R",
    "totalVAC_12_24R",
    "totalVAC_24_36R",
    "totalVAC_36_RES",
];

/// Finalized totals for one group at one level.
///
/// Eight summed counts plus the per-record mean of the days-vacant ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelTotals {
    pub active_res: u64,
    pub res_vac: u64,
    pub avg_days_vacant: f64,
    pub vac_0_3: u64,
    pub vac_3_6: u64,
    pub vac_6_12: u64,
    pub vac_12_24: u64,
    pub vac_24_36: u64,
    pub vac_36_plus: u64,
}

/// One emitted line: period, geography id, nine metrics.
///
/// Created once per flush, handed to the sink, not retained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRow {
    pub period: String,
    pub geo_id: String,
    pub totals: LevelTotals,
}

impl OutputRow {
    /// Roll-up row from a finalized accumulator
    pub fn from_totals(period: Period, geo_id: &str, totals: LevelTotals) -> Self {
        Self {
            period: period.to_string(),
            geo_id: geo_id.to_string(),
            totals,
        }
    }

    /// Tract-level passthrough row: the record's own values, unchanged
    pub fn from_record(period: Period, record: &TractRecord) -> Self {
        let m = &record.metrics;
        Self {
            period: period.to_string(),
            geo_id: record.geo_id.clone(),
            totals: LevelTotals {
                active_res: m.active_res,
                res_vac: m.res_vac,
                avg_days_vacant: m.avg_days_vacant,
                vac_0_3: m.vac_0_3,
                vac_3_6: m.vac_3_6,
                vac_6_12: m.vac_6_12,
                vac_12_24: m.vac_12_24,
                vac_24_36: m.vac_24_36,
                vac_36_plus: m.vac_36_plus,
            },
        }
    }

    /// The row as the 11 field strings of the output layout
    pub fn to_fields(&self) -> [String; 11] {
        let t = &self.totals;
        [
            self.period.clone(),
            self.geo_id.clone(),
            t.active_res.to_string(),
            t.res_vac.to_string(),
            t.avg_days_vacant.to_string(),
            t.vac_0_3.to_string(),
            t.vac_3_6.to_string(),
            t.vac_6_12.to_string(),
            t.vac_12_24.to_string(),
            t.vac_24_36.to_string(),
            t.vac_36_plus.to_string(),
        ]
    }
}
