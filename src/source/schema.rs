//! Input column schema and header resolution.
//!
//! Extracts alternate between all-uppercase and all-lowercase column headers
//! depending on reporting period. Rather than guessing the variant from a
//! date embedded in the filename, we resolve it from the parsed header row
//! itself, which holds up if the publisher ever switches casing again.

use crate::utils::error::SourceError;
use csv::StringRecord;

/// Canonical (lowercase) names of the metric columns, in output order.
pub const METRIC_COLUMNS: [&str; 9] = [
    "ams_res",
    "res_vac",
    "avg_vac_r",
    "vac_3_res",
    "vac_3_6_r",
    "vac_6_12r",
    "vac_12_24r",
    "vac_24_36r",
    "vac_36_res",
];

/// Canonical name of the geographic identifier column.
pub const GEOID_COLUMN: &str = "geoid";

// Early extracts carry the reporting period in-record; later ones only in
// the filename. Both columns are optional.
pub const MONTH_COLUMN: &str = "month";
pub const YEAR_COLUMN: &str = "year";

/// Header casing variant of an input extract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SchemaVariant {
    /// Resolve headers case-insensitively and report what was found
    #[default]
    Auto,
    /// Require exact all-uppercase headers
    Upper,
    /// Require exact all-lowercase headers
    Lower,
}

impl SchemaVariant {
    fn matches(self, header: &str, canonical: &str) -> bool {
        match self {
            SchemaVariant::Auto => header.eq_ignore_ascii_case(canonical),
            SchemaVariant::Upper => header == canonical.to_ascii_uppercase(),
            SchemaVariant::Lower => header == canonical,
        }
    }
}

/// Resolved positions of the needed columns within one extract's header row
#[derive(Debug, Clone)]
pub struct ColumnMap {
    pub geoid: usize,
    pub metrics: [usize; 9],
    pub month: Option<usize>,
    pub year: Option<usize>,
    detected: SchemaVariant,
}

impl ColumnMap {
    /// Resolve column positions from a header row.
    ///
    /// # Errors
    /// `SourceError::MissingColumn` when a required column is absent under
    /// the requested variant (a wrong-casing guess reports the same way as
    /// a genuinely missing field).
    pub fn resolve(headers: &StringRecord, variant: SchemaVariant) -> Result<Self, SourceError> {
        let find = |canonical: &str| -> Option<usize> {
            headers
                .iter()
                .position(|h| variant.matches(h.trim(), canonical))
        };

        let require = |canonical: &str| -> Result<usize, SourceError> {
            find(canonical).ok_or_else(|| SourceError::MissingColumn(canonical.to_string()))
        };

        let geoid = require(GEOID_COLUMN)?;
        let mut metrics = [0usize; 9];
        for (slot, canonical) in metrics.iter_mut().zip(METRIC_COLUMNS) {
            *slot = require(canonical)?;
        }

        // Period columns are optional in every variant
        let month = find(MONTH_COLUMN);
        let year = find(YEAR_COLUMN);

        let detected = match variant {
            SchemaVariant::Auto => detect_casing(headers, geoid),
            explicit => explicit,
        };

        Ok(Self {
            geoid,
            metrics,
            month,
            year,
            detected,
        })
    }

    /// The casing variant actually present in the file
    pub fn detected_variant(&self) -> SchemaVariant {
        self.detected
    }

    /// Whether the extract carries the reporting period in-record
    pub fn has_period_columns(&self) -> bool {
        self.month.is_some() && self.year.is_some()
    }
}

fn detect_casing(headers: &StringRecord, geoid_idx: usize) -> SchemaVariant {
    match headers.get(geoid_idx) {
        Some(h) if h.chars().any(|c| c.is_ascii_lowercase()) => SchemaVariant::Lower,
        _ => SchemaVariant::Upper,
    }
}
