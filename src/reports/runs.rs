//! Reports over recorded profiling runs: thread counts, array cache hit
//! rates, stack-walk extremes and frequently communicating stacks.

use super::{max_by, min_by, ratio, split_array_states, sum_by, ALL_ROW};
use crate::aggregator::{partition, try_partition};
use crate::output::table::{fmt_ratio, Table};
use crate::profile::accessors::{array_hits, array_misses, comms, frequent_stacks, stack_walks, threads};
use crate::profile::naming::{bench_name, capitalize, harness_name, jgf_name};
use crate::profile::Profile;
use crate::utils::error::ReportError;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadsRow {
    pub benchmark: String,
    pub threads: Vec<i64>,
}

/// Recorded thread counts per DaCapo benchmark
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadsReport {
    pub rows: Vec<ThreadsRow>,
}

pub fn threads_report(profiles: &[Profile]) -> Result<ThreadsReport, ReportError> {
    let groups = try_partition(|p: &&Profile| harness_name(p).map(|n| capitalize(&n)), profiles)?;

    let rows = groups
        .into_iter()
        .map(|(benchmark, group)| -> Result<ThreadsRow, ReportError> {
            let counts = group
                .into_iter()
                .map(threads)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ThreadsRow {
                benchmark,
                threads: counts,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ThreadsReport { rows })
}

impl fmt::Display for ThreadsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new("Threads per run", &["Benchmark", "Threads"]);
        for row in &self.rows {
            let counts: Vec<String> = row.threads.iter().map(i64::to_string).collect();
            table.push_row(vec![row.benchmark.clone(), format!("[{}]", counts.join(", "))]);
        }
        write!(f, "{}", table)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheRow {
    pub benchmark: String,
    /// Hit rate of runs keeping one state per array
    pub array_states_hit_rate: f64,
    /// Hit rate of runs keeping one state per element
    pub index_states_hit_rate: f64,
}

/// Array cache hit rates for both array-state modes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CachesReport {
    pub rows: Vec<CacheRow>,
    pub all: CacheRow,
}

fn hit_rate(benchmark: &str, mode: &str, profiles: &[&Profile]) -> Result<f64, ReportError> {
    let hits = sum_by(profiles, array_hits)?;
    let misses = sum_by(profiles, array_misses)?;
    ratio(hits as f64, (hits + misses) as f64, || {
        format!("array cache lookups of {} ({})", benchmark, mode)
    })
}

fn cache_row(benchmark: &str, profiles: &[&Profile]) -> Result<CacheRow, ReportError> {
    let (array, index) = split_array_states(profiles);
    Ok(CacheRow {
        benchmark: benchmark.to_string(),
        array_states_hit_rate: hit_rate(benchmark, "array states", &array)?,
        index_states_hit_rate: hit_rate(benchmark, "index states", &index)?,
    })
}

pub fn caches_report(profiles: &[Profile]) -> Result<CachesReport, ReportError> {
    let all: Vec<&Profile> = profiles.iter().collect();
    let rows = partition(|p: &&Profile| jgf_name(p.main_class()), all.iter().copied())
        .into_iter()
        .map(|(benchmark, group)| cache_row(&benchmark, &group))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CachesReport {
        rows,
        all: cache_row(ALL_ROW, &all)?,
    })
}

impl fmt::Display for CachesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new(
            "Array cache hit rate",
            &["Benchmark", "Array states", "Index states"],
        );
        for row in self.rows.iter().chain(std::iter::once(&self.all)) {
            table.push_row(vec![
                row.benchmark.clone(),
                fmt_ratio(row.array_states_hit_rate),
                fmt_ratio(row.index_states_hit_rate),
            ]);
        }
        write!(f, "{}", table)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalksRow {
    pub benchmark: String,
    pub max_walks_array: i64,
    pub max_walks_index: i64,
    pub max_comms_array: i64,
    pub max_comms_index: i64,
    pub min_comms_array: i64,
    pub min_comms_index: i64,
}

/// Extremes of full stack walks and communications per benchmark
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalksReport {
    pub rows: Vec<WalksRow>,
    pub all: WalksRow,
}

fn walks_row(benchmark: &str, profiles: &[&Profile]) -> Result<WalksRow, ReportError> {
    let (array, index) = split_array_states(profiles);
    let what = |mode: &str| format!("{} runs of {}", mode, benchmark);

    Ok(WalksRow {
        benchmark: benchmark.to_string(),
        max_walks_array: max_by(&array, stack_walks, || what("array-state"))?,
        max_walks_index: max_by(&index, stack_walks, || what("index-state"))?,
        max_comms_array: max_by(&array, comms, || what("array-state"))?,
        max_comms_index: max_by(&index, comms, || what("index-state"))?,
        min_comms_array: min_by(&array, comms, || what("array-state"))?,
        min_comms_index: min_by(&index, comms, || what("index-state"))?,
    })
}

pub fn walks_report(profiles: &[Profile]) -> Result<WalksReport, ReportError> {
    let all: Vec<&Profile> = profiles.iter().collect();
    let rows = partition(|p: &&Profile| jgf_name(p.main_class()), all.iter().copied())
        .into_iter()
        .map(|(benchmark, group)| walks_row(&benchmark, &group))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(WalksReport {
        rows,
        all: walks_row(ALL_ROW, &all)?,
    })
}

impl fmt::Display for WalksReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new(
            "Stack walks and communications",
            &[
                "Benchmark",
                "Max walks (array)",
                "Max walks (index)",
                "Max comms (array)",
                "Max comms (index)",
                "Min comms (array)",
                "Min comms (index)",
            ],
        );
        for row in self.rows.iter().chain(std::iter::once(&self.all)) {
            table.push_row(vec![
                row.benchmark.clone(),
                row.max_walks_array.to_string(),
                row.max_walks_index.to_string(),
                row.max_comms_array.to_string(),
                row.max_comms_index.to_string(),
                row.min_comms_array.to_string(),
                row.min_comms_index.to_string(),
            ]);
        }
        write!(f, "{}", table)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreqStacksRow {
    pub benchmark: String,
    pub max_frequent_stacks: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreqStacksReport {
    pub rows: Vec<FreqStacksRow>,
    pub all: FreqStacksRow,
}

fn freq_stacks_row(benchmark: &str, profiles: &[&Profile]) -> Result<FreqStacksRow, ReportError> {
    Ok(FreqStacksRow {
        benchmark: benchmark.to_string(),
        max_frequent_stacks: max_by(profiles, frequent_stacks, || format!("runs of {}", benchmark))?,
    })
}

pub fn freq_stacks_report(profiles: &[Profile]) -> Result<FreqStacksReport, ReportError> {
    let all: Vec<&Profile> = profiles.iter().collect();
    let rows = try_partition(|p: &&Profile| bench_name(p), all.iter().copied())?
        .into_iter()
        .map(|(benchmark, group)| freq_stacks_row(&benchmark, &group))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FreqStacksReport {
        rows,
        all: freq_stacks_row(ALL_ROW, &all)?,
    })
}

impl fmt::Display for FreqStacksReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new(
            "Frequently communicating call stacks",
            &["Benchmark", "Max stacks"],
        );
        for row in self.rows.iter().chain(std::iter::once(&self.all)) {
            table.push_row(vec![row.benchmark.clone(), row.max_frequent_stacks.to_string()]);
        }
        write!(f, "{}", table)
    }
}
