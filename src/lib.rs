//! oshaprof
//!
//! Loading and aggregation of the dumps written by a communication
//! checker: per-run profiles and per-benchmark static-analysis stats.
//!
//! This crate provides the core implementation for the `oshaprof` CLI
//! tool:
//!
//! - [`parser`] reads the data-literal dump format
//! - [`profile`] and [`stats`] load dumps and expose named fields
//! - [`aggregator`] groups records and summarizes distributions
//! - [`reports`] computes the summary tables
//!
//! ## Getting Started
//!
//! ```bash
//! oshaprof caches results/*.py
//! oshaprof slowdown -O arrayIndexStates=true -o slowdown.json results/*.py
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod profile;
pub mod reports;
pub mod stats;
pub mod utils;
