//! How checks were resolved: thread-local, fast memo, slow memo or a full
//! stack walk, as fractions of all checks.

use super::{ratio, split_array_states, sum_by, ALL_ROW};
use crate::aggregator::{bisect, try_partition};
use crate::output::table::{fmt_percent, Table};
use crate::profile::accessors::{checks, fast_memo_hits, slow_memo_hits, stack_walks, thread_local_hits};
use crate::profile::naming::{bench_name, capitalize, is_jgf};
use crate::profile::Profile;
use crate::utils::error::ReportError;
use serde::Serialize;
use std::fmt;

/// Fractions of checks by resolution path
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CheckFractions {
    pub thread_local: f64,
    pub fast_memo: f64,
    pub slow_memo: f64,
    pub stack_walk: f64,
}

impl CheckFractions {
    fn of(label: &str, profiles: &[&Profile]) -> Result<Self, ReportError> {
        let total = sum_by(profiles, checks)? as f64;
        let share = |hits: i64| ratio(hits as f64, total, || format!("checks of {}", label));

        Ok(Self {
            thread_local: share(sum_by(profiles, thread_local_hits)?)?,
            fast_memo: share(sum_by(profiles, fast_memo_hits)?)?,
            slow_memo: share(sum_by(profiles, slow_memo_hits)?)?,
            stack_walk: share(sum_by(profiles, stack_walks)?)?,
        })
    }

    fn cells(&self) -> [String; 4] {
        [
            fmt_percent(self.thread_local),
            fmt_percent(self.fast_memo),
            fmt_percent(self.slow_memo),
            fmt_percent(self.stack_walk),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChecksRow {
    pub benchmark: String,
    /// Runs keeping one state per array
    pub array: CheckFractions,
    /// Runs keeping one state per element
    pub index: CheckFractions,
}

fn checks_row(benchmark: &str, profiles: &[&Profile]) -> Result<ChecksRow, ReportError> {
    let (array, index) = split_array_states(profiles);
    Ok(ChecksRow {
        benchmark: benchmark.to_string(),
        array: CheckFractions::of(&format!("{} (array states)", benchmark), &array)?,
        index: CheckFractions::of(&format!("{} (index states)", benchmark), &index)?,
    })
}

/// Per-suite check breakdown, Java Grande and DaCapo reported separately
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChecksReport {
    pub jgf: Vec<ChecksRow>,
    pub dacapo: Vec<ChecksRow>,
    pub all: ChecksRow,
}

fn suite_rows(profiles: &[&Profile]) -> Result<Vec<ChecksRow>, ReportError> {
    try_partition(
        |p: &&Profile| bench_name(p).map(|n| capitalize(&n)),
        profiles.iter().copied(),
    )?
    .into_iter()
    .map(|(benchmark, group)| checks_row(&benchmark, &group))
    .collect()
}

pub fn checks_report(profiles: &[Profile]) -> Result<ChecksReport, ReportError> {
    let all: Vec<&Profile> = profiles.iter().collect();
    let (jgf, dacapo) = bisect(|p: &&Profile| is_jgf(p), all.iter().copied());

    Ok(ChecksReport {
        jgf: suite_rows(&jgf)?,
        dacapo: suite_rows(&dacapo)?,
        all: checks_row(ALL_ROW, &all)?,
    })
}

fn suite_table(title: &str, rows: &[ChecksRow]) -> Table {
    let mut table = Table::new(
        title,
        &[
            "Benchmark",
            "Array: thread-local",
            "fast memo",
            "slow memo",
            "stack walk",
            "Element: thread-local",
            "fast memo",
            "slow memo",
            "stack walk",
        ],
    );
    for row in rows {
        let mut cells = vec![row.benchmark.clone()];
        cells.extend(row.array.cells());
        cells.extend(row.index.cells());
        table.push_row(cells);
    }
    table
}

impl fmt::Display for ChecksReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", suite_table("Java Grande checks", &self.jgf))?;
        writeln!(f)?;
        writeln!(f, "{}", suite_table("DaCapo checks", &self.dacapo))?;
        writeln!(f)?;
        writeln!(f, "{}", suite_table("Across all runs", std::slice::from_ref(&self.all)))?;
        Ok(())
    }
}
