//! Streaming hierarchical aggregation - the core of the tool.
//!
//! This module transforms one file's ordered tract records into:
//! - Tract passthrough rows (1:1 with input)
//! - County, state, and national roll-up rows with summed counts and a
//!   per-record mean of the days-vacant ratio

pub mod accumulator;
pub mod key;
pub mod stream;

// Re-export main types and functions
pub use accumulator::LevelAccumulator;
pub use key::{county_of, state_of};
pub use stream::{FileCounts, StreamingAggregator};
