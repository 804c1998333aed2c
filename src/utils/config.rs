//! Configuration and constants for the CLI.

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Leading characters of a GEOID that identify the state
pub const STATE_KEY_LEN: usize = 2;

/// Leading characters of a GEOID that identify the state + county
pub const COUNTY_KEY_LEN: usize = 5;

/// Synthetic geography identifier carried by the national roll-up row
pub const NATIONAL_GEOID: &str = "01";

/// Default glob pattern for locating input extract files
pub const DEFAULT_INPUT_GLOB: &str = "*Data.csv";

/// Default directory for the four roll-up files
pub const DEFAULT_OUTPUT_DIR: &str = "rollups";

// One output file per spatial scale. Record layouts are identical across
// all four; only the granularity of the GEOID column differs.
pub const TRACT_FILE: &str = "tract.csv";
pub const COUNTY_FILE: &str = "county.csv";
pub const STATE_FILE: &str = "state.csv";
pub const NATIONAL_FILE: &str = "national.csv";
