//! Reporting period of one extract file.
//!
//! Early extracts carry `month`/`year` columns in each record; later ones
//! only embed the period in the filename. We prefer the in-record fields and
//! fall back to scanning the filename for a four-digit year followed by a
//! one- or two-digit month.

use crate::utils::error::SourceError;
use std::fmt;
use std::path::Path;

/// Reporting month/year of one input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub month: u32,
    pub year: i32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Self {
        Self { month, year }
    }

    /// Derive the period from digit groups embedded in a filename.
    ///
    /// The first group that parses as a plausible year (1990..=2099) is
    /// taken; the next group that parses as a month (1..=12) completes the
    /// period. Anything else is a data-format fault for that file.
    pub fn from_filename(path: &Path) -> Result<Self, SourceError> {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();

        let mut year: Option<i32> = None;
        for group in stem.split(|c: char| !c.is_ascii_digit()) {
            if group.is_empty() {
                continue;
            }
            match year {
                None => {
                    if group.len() == 4 {
                        if let Ok(y) = group.parse::<i32>() {
                            if (1990..=2099).contains(&y) {
                                year = Some(y);
                            }
                        }
                    }
                }
                Some(y) => {
                    if group.len() <= 2 {
                        if let Ok(m) = group.parse::<u32>() {
                            if (1..=12).contains(&m) {
                                return Ok(Self::new(m, y));
                            }
                        }
                    }
                }
            }
        }

        Err(SourceError::UnknownPeriod(stem.to_string()))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}
