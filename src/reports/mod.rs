//! Summary reports over loaded profiles and static stats.
//!
//! Each report is a pure function from loaded records to a serializable
//! struct whose `Display` impl is the text table printed by the CLI.
//! Ratios follow one rule: `dist_average` and precision treat an empty
//! denominator as `0`, everything else reports `ReportError::ZeroDenominator`.

pub mod checks;
pub mod overhead;
pub mod precision;
pub mod runs;
pub mod stacks;
pub mod static_summary;

pub use checks::{checks_report, CheckFractions, ChecksReport, ChecksRow};
pub use overhead::{
    memory_element_states_report, memory_report, slowdown_element_states_report,
    slowdown_report, ElementStatesReport, MemoryReport, OverheadRow, SlowdownReport, ThreadGroup,
};
pub use precision::{precision_report, PrecisionReport, PrecisionRow};
pub use runs::{
    caches_report, freq_stacks_report, threads_report, walks_report, CacheRow, CachesReport,
    FreqStacksReport, FreqStacksRow, ThreadsReport, ThreadsRow, WalksReport, WalksRow,
};
pub use stacks::{stacks_report, StackShapeRow, StacksReport};
pub use static_summary::{
    annotations_report, conciseness_report, inlining_report, modules_report, AnnotationsReport,
    AnnotationsRow, ConcisenessReport, ConcisenessRow, InliningReport, InliningRow, ModulesReport,
    ModulesRow,
};

use crate::profile::{match_options, OptionFilter, Profile};
use crate::utils::config::{
    CHECKS_PRESET, ELEMENT_TIMING_PRESET, MONTE_CARLO_PREFIX, PRECISION_PRESET, RECORD_PRESET, STACKS_PRESET,
    TIMING_PRESET, WARMUP_SUFFIX,
};
use crate::utils::error::{AccessError, ReportError};
use serde::Serialize;

/// Label of the row aggregated over every benchmark
pub const ALL_ROW: &str = "all";

/// What a report reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Profiles,
    StaticStats,
}

/// Every report the CLI can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    Threads,
    Caches,
    Walks,
    FreqStacks,
    Checks,
    Slowdown,
    Memory,
    SlowdownElementStates,
    MemoryElementStates,
    Stacks,
    Precision,
    Modules,
    Annotations,
    Inlining,
    Conciseness,
}

impl ReportKind {
    pub const ALL: [ReportKind; 15] = [
        ReportKind::Threads,
        ReportKind::Caches,
        ReportKind::Walks,
        ReportKind::FreqStacks,
        ReportKind::Checks,
        ReportKind::Slowdown,
        ReportKind::Memory,
        ReportKind::SlowdownElementStates,
        ReportKind::MemoryElementStates,
        ReportKind::Stacks,
        ReportKind::Precision,
        ReportKind::Modules,
        ReportKind::Annotations,
        ReportKind::Inlining,
        ReportKind::Conciseness,
    ];

    /// Name used on the command line and in preset tables
    pub fn name(self) -> &'static str {
        match self {
            ReportKind::Threads => "threads",
            ReportKind::Caches => "caches",
            ReportKind::Walks => "walks",
            ReportKind::FreqStacks => "freq-stacks",
            ReportKind::Checks => "checks",
            ReportKind::Slowdown => "slowdown",
            ReportKind::Memory => "memory",
            ReportKind::SlowdownElementStates => "slowdown-element-states",
            ReportKind::MemoryElementStates => "memory-element-states",
            ReportKind::Stacks => "stacks",
            ReportKind::Precision => "precision",
            ReportKind::Modules => "modules",
            ReportKind::Annotations => "annotations",
            ReportKind::Inlining => "inlining",
            ReportKind::Conciseness => "conciseness",
        }
    }

    pub fn input(self) -> InputKind {
        match self {
            ReportKind::Modules
            | ReportKind::Annotations
            | ReportKind::Inlining
            | ReportKind::Conciseness => InputKind::StaticStats,
            _ => InputKind::Profiles,
        }
    }

    /// Options a profile must carry to be included
    pub fn builtin_preset(self) -> &'static [(&'static str, &'static str)] {
        match self {
            ReportKind::Caches | ReportKind::Walks | ReportKind::FreqStacks => RECORD_PRESET,
            ReportKind::Checks => CHECKS_PRESET,
            ReportKind::Slowdown | ReportKind::Memory => TIMING_PRESET,
            ReportKind::SlowdownElementStates | ReportKind::MemoryElementStates => {
                ELEMENT_TIMING_PRESET
            }
            ReportKind::Stacks => STACKS_PRESET,
            ReportKind::Precision => PRECISION_PRESET,
            _ => &[],
        }
    }

    /// File-name filter applied before any file is opened
    pub fn accepts_file(self, base_name: &str) -> bool {
        match self {
            ReportKind::Threads => true,
            ReportKind::Caches | ReportKind::Walks => {
                !base_name.ends_with(WARMUP_SUFFIX) && !base_name.starts_with(MONTE_CARLO_PREFIX)
            }
            _ => !base_name.ends_with(WARMUP_SUFFIX),
        }
    }
}

/// Unguarded ratio: a zero denominator is an error naming the quantity
pub(crate) fn ratio(
    numerator: f64,
    denominator: f64,
    what: impl FnOnce() -> String,
) -> Result<f64, ReportError> {
    if denominator == 0.0 {
        return Err(ReportError::ZeroDenominator(what()));
    }
    Ok(numerator / denominator)
}

/// Sum an integer accessor over profiles
pub(crate) fn sum_by(
    profiles: &[&Profile],
    accessor: fn(&Profile) -> Result<i64, AccessError>,
) -> Result<i64, AccessError> {
    profiles
        .iter()
        .try_fold(0i64, |acc, p| accessor(p).map(|n| acc.saturating_add(n)))
}

pub(crate) fn max_by(
    profiles: &[&Profile],
    accessor: fn(&Profile) -> Result<i64, AccessError>,
    what: impl FnOnce() -> String,
) -> Result<i64, ReportError> {
    let values = profiles
        .iter()
        .map(|p| accessor(p))
        .collect::<Result<Vec<_>, _>>()?;
    values
        .into_iter()
        .max()
        .ok_or_else(|| ReportError::EmptyGroup(what()))
}

pub(crate) fn min_by(
    profiles: &[&Profile],
    accessor: fn(&Profile) -> Result<i64, AccessError>,
    what: impl FnOnce() -> String,
) -> Result<i64, ReportError> {
    let values = profiles
        .iter()
        .map(|p| accessor(p))
        .collect::<Result<Vec<_>, _>>()?;
    values
        .into_iter()
        .min()
        .ok_or_else(|| ReportError::EmptyGroup(what()))
}

/// Split into (array-state runs, element-state runs)
pub(crate) fn split_array_states<'a>(
    profiles: &[&'a Profile],
) -> (Vec<&'a Profile>, Vec<&'a Profile>) {
    let array_states = OptionFilter::new().with("arrayIndexStates", "false");
    crate::aggregator::bisect(|p: &&Profile| match_options(&array_states, p), profiles.iter().copied())
}

/// Split into (instrumented runs, uninstrumented baseline runs)
pub(crate) fn split_instrumented<'a>(
    profiles: &[&'a Profile],
) -> (Vec<&'a Profile>, Vec<&'a Profile>) {
    let instrumented = OptionFilter::new().with("noInstrument", "false");
    crate::aggregator::bisect(|p: &&Profile| match_options(&instrumented, p), profiles.iter().copied())
}
