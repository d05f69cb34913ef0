//! Cost of instrumentation relative to uninstrumented baseline runs.

use super::{ratio, split_instrumented};
use crate::aggregator::{bisect, partition, try_partition};
use crate::output::table::{fmt_ratio, Table};
use crate::profile::accessors::{peak_memory, runtime};
use crate::profile::naming::{jgf_name, runs_with_threads, thread_count};
use crate::profile::{match_options, OptionFilter, Profile};
use crate::utils::config::ELEMENT_STATES_THREADS;
use crate::utils::error::{AccessError, ReportError};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverheadRow {
    pub benchmark: String,
    /// Instrumented total over baseline total
    pub ratio: f64,
}

fn total(
    profiles: &[&Profile],
    accessor: fn(&Profile) -> Result<f64, AccessError>,
) -> Result<f64, AccessError> {
    profiles
        .iter()
        .try_fold(0.0, |acc, p| accessor(p).map(|x| acc + x))
}

/// One row per `jgf_name`, sorted by benchmark
fn overhead_rows(
    profiles: &[&Profile],
    accessor: fn(&Profile) -> Result<f64, AccessError>,
    what: &str,
) -> Result<Vec<OverheadRow>, ReportError> {
    let mut rows = partition(|p: &&Profile| jgf_name(p.main_class()), profiles.iter().copied())
        .into_iter()
        .map(|(benchmark, group)| -> Result<OverheadRow, ReportError> {
            let (instrumented, baseline) = split_instrumented(&group);
            let value = ratio(total(&instrumented, accessor)?, total(&baseline, accessor)?, || {
                format!("baseline {} of {}", what, benchmark)
            })?;
            Ok(OverheadRow {
                benchmark,
                ratio: value,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    rows.sort_by(|a, b| {
        a.benchmark
            .cmp(&b.benchmark)
            .then(a.ratio.total_cmp(&b.ratio))
    });
    Ok(rows)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadGroup {
    pub threads: u32,
    pub rows: Vec<OverheadRow>,
}

/// Runtime slowdown per thread count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlowdownReport {
    pub by_threads: Vec<ThreadGroup>,
}

pub fn slowdown_report(profiles: &[Profile]) -> Result<SlowdownReport, ReportError> {
    let by_threads = try_partition(|p: &&Profile| thread_count(p), profiles)?
        .into_iter()
        .map(|(threads, group)| -> Result<ThreadGroup, ReportError> {
            Ok(ThreadGroup {
                threads,
                rows: overhead_rows(&group, runtime, "runtime")?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SlowdownReport { by_threads })
}

impl fmt::Display for SlowdownReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.by_threads.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let mut table = Table::new(
                format!("Slowdown with {} threads", group.threads),
                &["Benchmark", "Slowdown"],
            );
            for row in &group.rows {
                table.push_row(vec![row.benchmark.clone(), fmt_ratio(row.ratio)]);
            }
            writeln!(f, "{}", table)?;
        }
        Ok(())
    }
}

/// Peak memory overhead per benchmark
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryReport {
    pub rows: Vec<OverheadRow>,
}

pub fn memory_report(profiles: &[Profile]) -> Result<MemoryReport, ReportError> {
    let all: Vec<&Profile> = profiles.iter().collect();
    Ok(MemoryReport {
        rows: overhead_rows(&all, peak_memory, "peak memory")?,
    })
}

impl fmt::Display for MemoryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new("Peak memory overhead", &["Benchmark", "Overhead"]);
        for row in &self.rows {
            table.push_row(vec![row.benchmark.clone(), fmt_ratio(row.ratio)]);
        }
        write!(f, "{}", table)
    }
}

/// Element-state overhead at a fixed thread count
///
/// The instrumented side is restricted to `arrayIndexStates=true` runs,
/// while the baseline keeps every uninstrumented run whatever its state
/// granularity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementStatesReport {
    /// `Slowdown` or `Memory overhead`
    pub measure: &'static str,
    pub threads: u32,
    pub rows: Vec<OverheadRow>,
}

fn element_states_rows(
    profiles: &[Profile],
    accessor: fn(&Profile) -> Result<f64, AccessError>,
    what: &str,
) -> Result<Vec<OverheadRow>, ReportError> {
    let element_states = OptionFilter::new().with("arrayIndexStates", "true");
    let selected = profiles
        .iter()
        .filter(|p| runs_with_threads(p, ELEMENT_STATES_THREADS));

    let mut rows = partition(|p: &&Profile| jgf_name(p.main_class()), selected)
        .into_iter()
        .map(|(benchmark, group)| -> Result<OverheadRow, ReportError> {
            let (instrumented, baseline) = split_instrumented(&group);
            let (instrumented, _) =
                bisect(|p: &&Profile| match_options(&element_states, p), instrumented);
            let value = ratio(total(&instrumented, accessor)?, total(&baseline, accessor)?, || {
                format!("baseline {} of {}", what, benchmark)
            })?;
            Ok(OverheadRow {
                benchmark,
                ratio: value,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    rows.sort_by(|a, b| {
        a.benchmark
            .cmp(&b.benchmark)
            .then(a.ratio.total_cmp(&b.ratio))
    });
    Ok(rows)
}

pub fn slowdown_element_states_report(
    profiles: &[Profile],
) -> Result<ElementStatesReport, ReportError> {
    Ok(ElementStatesReport {
        measure: "Slowdown",
        threads: ELEMENT_STATES_THREADS,
        rows: element_states_rows(profiles, runtime, "runtime")?,
    })
}

pub fn memory_element_states_report(
    profiles: &[Profile],
) -> Result<ElementStatesReport, ReportError> {
    Ok(ElementStatesReport {
        measure: "Memory overhead",
        threads: ELEMENT_STATES_THREADS,
        rows: element_states_rows(profiles, peak_memory, "peak memory")?,
    })
}

impl fmt::Display for ElementStatesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new(
            format!("{} with element states, {} threads", self.measure, self.threads),
            &["Benchmark", self.measure],
        );
        for row in &self.rows {
            table.push_row(vec![row.benchmark.clone(), fmt_ratio(row.ratio)]);
        }
        write!(f, "{}", table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_record;
    use std::path::PathBuf;

    fn run(bench: &str, threads: u32, instrumented: bool, time: f64, memory: i64) -> Profile {
        let text = format!(
            "{{'options' : {{'mainClass' : 'JGF{}BenchSizeA', \
             'profileExt' : '-{}-threads-prof-0.py', 'noInstrument' : '{}'}}, \
             'Premain to fini time' : {:?}, 'Memory peak' : {}}}",
            bench, threads, !instrumented, time, memory
        );
        Profile::from_record(parse_record(&text).unwrap(), PathBuf::from("run.py"), "run.py").unwrap()
    }

    #[test]
    fn test_slowdown_by_threads_then_bench() {
        let profiles = vec![
            run("Series", 8, true, 6.0, 10),
            run("Series", 8, false, 2.0, 10),
            run("Crypt", 8, true, 3.0, 10),
            run("Crypt", 8, false, 2.0, 10),
            run("Crypt", 2, true, 4.0, 10),
            run("Crypt", 2, true, 4.0, 10),
            run("Crypt", 2, false, 1.0, 10),
        ];

        let report = slowdown_report(&profiles).unwrap();
        let threads: Vec<u32> = report.by_threads.iter().map(|g| g.threads).collect();
        assert_eq!(threads, vec![2, 8]);
        assert_eq!(report.by_threads[0].rows[0].ratio, 8.0);
        assert_eq!(
            report.by_threads[1].rows,
            vec![
                OverheadRow {
                    benchmark: "Crypt".to_string(),
                    ratio: 1.5
                },
                OverheadRow {
                    benchmark: "Series".to_string(),
                    ratio: 3.0
                },
            ]
        );
    }

    #[test]
    fn test_memory_overhead() {
        let profiles = vec![run("Crypt", 4, true, 1.0, 300), run("Crypt", 4, false, 1.0, 200)];
        let report = memory_report(&profiles).unwrap();
        assert_eq!(report.rows[0].ratio, 1.5);
    }

    fn element_run(bench: &str, threads: u32, index_states: Option<bool>, time: f64) -> Profile {
        // None is an uninstrumented baseline, which still records arrayIndexStates=false
        let (no_instrument, index_states) = match index_states {
            Some(states) => (false, states),
            None => (true, false),
        };
        let text = format!(
            "{{'options' : {{'mainClass' : 'JGF{}BenchSizeA', \
             'profileExt' : '-{}-threads-prof-0.py', 'noInstrument' : '{}', \
             'arrayIndexStates' : '{}'}}, \
             'Premain to fini time' : {:?}, 'Memory peak' : {}}}",
            bench, threads, no_instrument, index_states, time, (time * 100.0) as i64
        );
        Profile::from_record(parse_record(&text).unwrap(), PathBuf::from("run.py"), "run.py").unwrap()
    }

    #[test]
    fn test_element_states_against_full_baseline() {
        let profiles = vec![
            element_run("Crypt", 8, Some(true), 6.0),
            element_run("Crypt", 8, Some(false), 100.0),
            element_run("Crypt", 8, None, 2.0),
            element_run("Crypt", 8, None, 1.0),
            // Other thread counts are ignored
            element_run("Crypt", 4, Some(true), 50.0),
            element_run("Crypt", 4, None, 1.0),
        ];

        let slowdown = slowdown_element_states_report(&profiles).unwrap();
        assert_eq!(slowdown.threads, 8);
        assert_eq!(
            slowdown.rows,
            vec![OverheadRow {
                benchmark: "Crypt".to_string(),
                ratio: 2.0
            }]
        );

        let memory = memory_element_states_report(&profiles).unwrap();
        assert_eq!(memory.rows[0].ratio, 2.0);
        assert!(memory.to_string().contains("Memory overhead with element states, 8 threads"));
    }

    #[test]
    fn test_element_states_without_eight_thread_baseline() {
        let profiles = vec![
            element_run("Crypt", 8, Some(true), 6.0),
            element_run("Crypt", 4, None, 1.0),
        ];
        assert!(matches!(
            slowdown_element_states_report(&profiles),
            Err(ReportError::ZeroDenominator(_))
        ));
    }

    #[test]
    fn test_missing_baseline_is_zero_denominator() {
        let profiles = vec![run("Crypt", 4, true, 1.0, 300)];
        assert!(matches!(
            memory_report(&profiles),
            Err(ReportError::ZeroDenominator(_))
        ));
    }
}
