//! Vacancy Rollup
//!
//! Multi-scale roll-up summaries of census-tract housing vacancy extracts.
//!
//! One input file per reporting period, one record per tract; the output is
//! four delimited files holding the same metrics at tract, county, state,
//! and national granularity.
//!
//! This crate provides the core implementation for the
//! `vacancy-rollup` CLI tool.

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod source;
pub mod utils;
