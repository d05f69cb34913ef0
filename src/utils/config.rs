//! Configuration and constants for the CLI.

use super::error::ConfigError;
use crate::profile::OptionFilter;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Current JSON report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

// File-name conventions of the profiler's output directory
pub const WARMUP_SUFFIX: &str = "warmup.py";
pub const MONTE_CARLO_PREFIX: &str = "JGFMonteCarlo";

// Main-class conventions. Java Grande classes look like "JGFSeriesBenchSizeC",
// DaCapo runs all go through the "Harness" main class.
pub const JGF_PREFIX: &str = "JGF";
pub const JGF_SUFFIX_LEN: usize = 10;
pub const HARNESS_MAIN_CLASS: &str = "Harness";
pub const DACAPO_BENCHMARKS: &[&str] = &["avrora", "batik", "xalan"];

/// Profiled and recorded runs
pub const RECORD_PRESET: &[(&str, &str)] = &[("profile", "true"), ("record", "true")];

/// Profiled runs with the default cache configuration and no extra tooling
pub const CHECKS_PRESET: &[(&str, &str)] = &[
    ("objectStates", "false"),
    ("profile", "true"),
    ("arrayCacheSize", "16"),
    ("lockCacheSize", "4"),
    ("traces", "false"),
    ("record", "true"),
    ("create", "false"),
    ("instrumentFullJDK", "false"),
    ("bytecodeDump", "false"),
    ("verify", "false"),
    ("preVerify", "false"),
    ("frames", "false"),
];

/// Timing runs: profiling and recording off so the numbers are clean
pub const TIMING_PRESET: &[(&str, &str)] = &[
    ("arrayIndexStates", "false"),
    ("objectStates", "false"),
    ("profile", "false"),
    ("arrayCacheSize", "16"),
    ("lockCacheSize", "4"),
    ("traces", "false"),
    ("record", "false"),
    ("create", "false"),
    ("instrumentFullJDK", "false"),
    ("bytecodeDump", "false"),
    ("verify", "false"),
    ("preVerify", "false"),
    ("frames", "false"),
];

/// Timing runs of either state granularity, for the element-state overheads
pub const ELEMENT_TIMING_PRESET: &[(&str, &str)] = &[
    ("objectStates", "false"),
    ("profile", "false"),
    ("arrayCacheSize", "16"),
    ("lockCacheSize", "4"),
    ("traces", "false"),
    ("record", "false"),
    ("create", "false"),
    ("instrumentFullJDK", "false"),
    ("bytecodeDump", "false"),
    ("verify", "false"),
    ("preVerify", "false"),
    ("frames", "false"),
];

/// Element-state overheads are measured on this thread count only
pub const ELEMENT_STATES_THREADS: u32 = 8;

/// Profiled runs with array (not element) states
pub const STACKS_PRESET: &[(&str, &str)] = &[
    ("arrayIndexStates", "false"),
    ("objectStates", "false"),
    ("profile", "true"),
    ("arrayCacheSize", "16"),
    ("lockCacheSize", "4"),
    ("traces", "false"),
    ("record", "true"),
    ("create", "false"),
    ("instrumentFullJDK", "false"),
    ("bytecodeDump", "false"),
    ("verify", "false"),
    ("preVerify", "false"),
    ("frames", "false"),
];

/// Recorded runs without profiling overhead
pub const PRECISION_PRESET: &[(&str, &str)] =
    &[("profile", "false"), ("traces", "false"), ("record", "true")];

/// User preset overrides, read from a TOML file
///
/// ```toml
/// [presets.caches]
/// arrayCacheSize = "32"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PresetConfig {
    /// Per-report option tables, merged over the built-in preset
    #[serde(default)]
    pub presets: BTreeMap<String, OptionFilter>,
}

impl PresetConfig {
    /// Build the effective filter for a report
    ///
    /// Keys from the config table override the built-in preset; keys not
    /// named in the table keep their built-in value.
    pub fn resolve(&self, report: &str, builtin: &[(&str, &str)]) -> OptionFilter {
        let mut filter = OptionFilter::from_pairs(builtin);

        if let Some(table) = self.presets.get(report) {
            debug!("Applying {} configured option(s) to '{}'", table.len(), report);
            filter.extend(table.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        }

        filter
    }
}

/// Load preset overrides from a TOML file
///
/// # Errors
/// * `ConfigError::ReadFailed` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid
pub fn load_presets(path: impl AsRef<Path>) -> Result<PresetConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let config: PresetConfig = toml::from_str(&contents)?;
    Ok(config)
}

/// Split a `KEY=VALUE` command-line option
pub fn parse_option_assignment(raw: &str) -> Result<(String, String), ConfigError> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(ConfigError::InvalidOption(raw.to_string())),
    }
}
