//! Reports over static-analysis summaries: module structure, annotation
//! burden, and inlining.
//!
//! Benchmarks are named by their dump file stem.

use super::ratio;
use crate::aggregator::{bisect, dist_average, dist_count, dist_total};
use crate::output::table::{fmt_percent, fmt_ratio, Table};
use crate::stats::accessors::{annotation_total, annotation_totals, comm_groups, inlined, methods};
use crate::stats::StaticStats;
use crate::utils::config::DACAPO_BENCHMARKS;
use crate::utils::error::ReportError;
use serde::Serialize;
use std::fmt;

fn total_methods(stats: &StaticStats) -> Result<i64, ReportError> {
    Ok(dist_total([methods(stats)?]))
}

fn per_method(count: i64, stats: &StaticStats) -> Result<f64, ReportError> {
    ratio(count as f64, total_methods(stats)? as f64, || {
        format!("methods of {}", stats.name())
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModulesRow {
    pub benchmark: String,
    pub modules: u64,
    pub avg_methods_per_module: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModulesReport {
    pub rows: Vec<ModulesRow>,
    pub overall_methods_per_module: f64,
}

pub fn modules_report(statses: &[StaticStats]) -> Result<ModulesReport, ReportError> {
    let mut rows = Vec::with_capacity(statses.len());
    let mut all_methods = 0i64;
    let mut all_modules = 0u64;

    for stats in statses {
        let dist = methods(stats)?;
        let modules = dist_count([dist]);
        rows.push(ModulesRow {
            benchmark: stats.name().to_string(),
            modules,
            avg_methods_per_module: dist_average([dist], false),
        });
        all_methods += dist_total([dist]);
        all_modules += modules;
    }

    let overall = ratio(all_methods as f64, all_modules as f64, || "modules".to_string())?;
    Ok(ModulesReport {
        rows,
        overall_methods_per_module: overall,
    })
}

impl fmt::Display for ModulesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new("Modules", &["Benchmark", "Modules", "Methods per module"]);
        for row in &self.rows {
            table.push_row(vec![
                row.benchmark.clone(),
                row.modules.to_string(),
                fmt_ratio(row.avg_methods_per_module),
            ]);
        }
        writeln!(f, "{}", table)?;
        write!(f, "  Overall methods per module: {}", fmt_ratio(self.overall_methods_per_module))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationsRow {
    pub benchmark: String,
    /// Annotations per method, in `ANNOTATION_KINDS` order
    pub group_member: f64,
    pub group_decl: f64,
    pub non_comm: f64,
    pub inline: f64,
    pub module_member: f64,
    pub total_annotations: i64,
    pub comm_groups: i64,
}

/// Annotation density; Java Grande rows come before DaCapo rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationsReport {
    pub rows: Vec<AnnotationsRow>,
    pub overall_per_method: f64,
}

pub fn annotations_report(statses: &[StaticStats]) -> Result<AnnotationsReport, ReportError> {
    let mut all_size = 0i64;
    let mut all_methods = 0i64;
    let mut rows = Vec::with_capacity(statses.len());

    for stats in statses {
        let [group_member, group_decl, non_comm, inline, module_member] = annotation_totals(stats)?;
        let total = group_member + group_decl + non_comm + inline + module_member;

        rows.push(AnnotationsRow {
            benchmark: stats.name().to_string(),
            group_member: per_method(group_member, stats)?,
            group_decl: per_method(group_decl, stats)?,
            non_comm: per_method(non_comm, stats)?,
            inline: per_method(inline, stats)?,
            module_member: per_method(module_member, stats)?,
            total_annotations: total,
            comm_groups: dist_total([comm_groups(stats)?]),
        });
        all_size += total;
        all_methods += total_methods(stats)?;
    }

    let (dacapo, mut rows) = bisect(
        |row: &AnnotationsRow| DACAPO_BENCHMARKS.contains(&row.benchmark.as_str()),
        rows,
    );
    rows.extend(dacapo);

    let overall = ratio(all_size as f64, all_methods as f64, || "methods".to_string())?;
    Ok(AnnotationsReport {
        rows,
        overall_per_method: overall,
    })
}

impl fmt::Display for AnnotationsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new(
            "Annotations per method",
            &[
                "Benchmark",
                "Group member",
                "Group decl",
                "Non-comm",
                "Inline",
                "Module member",
                "Total",
                "Comm groups",
            ],
        );
        for row in &self.rows {
            table.push_row(vec![
                row.benchmark.clone(),
                fmt_ratio(row.group_member),
                fmt_ratio(row.group_decl),
                fmt_ratio(row.non_comm),
                fmt_ratio(row.inline),
                fmt_ratio(row.module_member),
                row.total_annotations.to_string(),
                row.comm_groups.to_string(),
            ]);
        }
        writeln!(f, "{}", table)?;
        write!(f, "  Overall: {}", fmt_ratio(self.overall_per_method))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InliningRow {
    pub benchmark: String,
    pub inlined: i64,
    pub not_inlined: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InliningReport {
    pub rows: Vec<InliningRow>,
    /// Inlined share of all methods, as a fraction
    pub overall_inlined: f64,
}

pub fn inlining_report(statses: &[StaticStats]) -> Result<InliningReport, ReportError> {
    let mut rows = Vec::with_capacity(statses.len());
    let mut all_inlined = 0i64;
    let mut all_total = 0i64;

    for stats in statses {
        let inlined = dist_total([inlined(stats)?]);
        let total = total_methods(stats)?;
        rows.push(InliningRow {
            benchmark: stats.name().to_string(),
            inlined,
            not_inlined: total - inlined,
        });
        all_inlined += inlined;
        all_total += total;
    }

    let overall = ratio(all_inlined as f64, all_total as f64, || "methods".to_string())?;
    Ok(InliningReport {
        rows,
        overall_inlined: overall,
    })
}

impl fmt::Display for InliningReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new("Inlining", &["Benchmark", "Inlined", "Not inlined"]);
        for row in &self.rows {
            table.push_row(vec![
                row.benchmark.clone(),
                row.inlined.to_string(),
                row.not_inlined.to_string(),
            ]);
        }
        writeln!(f, "{}", table)?;
        write!(f, "  Overall: {}", fmt_percent(self.overall_inlined))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcisenessRow {
    pub benchmark: String,
    pub annotations_per_method: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcisenessReport {
    pub rows: Vec<ConcisenessRow>,
    pub overall_per_method: f64,
}

pub fn conciseness_report(statses: &[StaticStats]) -> Result<ConcisenessReport, ReportError> {
    let mut rows = Vec::with_capacity(statses.len());
    let mut all_size = 0i64;
    let mut all_methods = 0i64;

    for stats in statses {
        let annotations = annotation_total(stats)?;
        rows.push(ConcisenessRow {
            benchmark: stats.name().to_string(),
            annotations_per_method: per_method(annotations, stats)?,
        });
        all_size += annotations;
        all_methods += total_methods(stats)?;
    }

    let overall = ratio(all_size as f64, all_methods as f64, || "methods".to_string())?;
    Ok(ConcisenessReport {
        rows,
        overall_per_method: overall,
    })
}

impl fmt::Display for ConcisenessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new("Conciseness", &["Benchmark", "Annotations per method"]);
        for row in &self.rows {
            table.push_row(vec![row.benchmark.clone(), fmt_ratio(row.annotations_per_method)]);
        }
        writeln!(f, "{}", table)?;
        write!(f, "  Overall: {}", fmt_ratio(self.overall_per_method))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_record;

    fn stats(name: &str, methods: &str, inlined: &str, group_member: i64) -> StaticStats {
        let text = format!(
            "{{'Total methods' : {}, 'Inlined methods' : {}, \
             'Communication groups' : {{1 : 2}}, 'Interface groups' : {{}}, \
             'Group membership annotations' : {{1 : {}}}, \
             'Group declaration annotations' : {{1 : 1}}, \
             'Non-communicator annotations' : {{}}, \
             'Inline annotations' : {{}}, \
             'Module membership annotations' : {{1 : 1}}}}",
            methods, inlined, group_member
        );
        StaticStats::new(name, parse_record(&text).unwrap())
    }

    fn fixtures() -> Vec<StaticStats> {
        vec![
            stats("xalan", "{4 : 2}", "{1 : 2}", 6),
            stats("crypt", "{2 : 3, 5 : 1}", "{1 : 1}", 0),
        ]
    }

    #[test]
    fn test_modules() {
        let report = modules_report(&fixtures()).unwrap();
        assert_eq!(report.rows[0].modules, 2);
        assert_eq!(report.rows[0].avg_methods_per_module, 4.0);
        assert_eq!(report.rows[1].avg_methods_per_module, 2.75);
        assert_eq!(report.overall_methods_per_module, 19.0 / 6.0);
    }

    #[test]
    fn test_annotations_put_dacapo_last() {
        let report = annotations_report(&fixtures()).unwrap();
        let names: Vec<&str> = report.rows.iter().map(|r| r.benchmark.as_str()).collect();
        assert_eq!(names, vec!["crypt", "xalan"]);

        let xalan = &report.rows[1];
        assert_eq!(xalan.group_member, 0.75);
        assert_eq!(xalan.total_annotations, 8);
        assert_eq!(xalan.comm_groups, 2);
        assert_eq!(report.overall_per_method, 10.0 / 19.0);
    }

    #[test]
    fn test_inlining_and_conciseness() {
        let inlining = inlining_report(&fixtures()).unwrap();
        assert_eq!(inlining.rows[0].inlined, 2);
        assert_eq!(inlining.rows[0].not_inlined, 6);
        assert_eq!(inlining.overall_inlined, 3.0 / 19.0);

        let conciseness = conciseness_report(&fixtures()).unwrap();
        assert_eq!(conciseness.rows[1].annotations_per_method, 2.0 / 11.0);
    }

    #[test]
    fn test_no_methods_is_zero_denominator() {
        let empty = vec![stats("crypt", "{}", "{}", 1)];
        assert!(matches!(
            conciseness_report(&empty),
            Err(ReportError::ZeroDenominator(_))
        ));
    }
}
