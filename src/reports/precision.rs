//! Precision of communication specifications: how much of each used
//! specification the run actually exercised.

use crate::output::table::Table;
use crate::profile::accessors::{run_edges, run_nodes, spec_edges, spec_nodes};
use crate::profile::naming::{capitalize, harness_name, jgf_name};
use crate::profile::Profile;
use crate::utils::config::HARNESS_MAIN_CLASS;
use crate::utils::error::ReportError;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrecisionRow {
    pub benchmark: String,
    pub run_nodes: i64,
    pub spec_nodes: i64,
    pub run_edges: i64,
    pub spec_edges: i64,
    /// Percent of specified nodes seen in the run
    pub node_precision: f64,
    /// Percent of specified edges seen in the run
    pub edge_precision: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrecisionReport {
    pub jgf: Vec<PrecisionRow>,
    pub dacapo: Vec<PrecisionRow>,
}

/// `run / spec * 100`, or `0` for an empty specification
fn percent(run: i64, spec: i64) -> f64 {
    if spec == 0 {
        return 0.0;
    }
    run as f64 / spec as f64 * 100.0
}

fn precision_row(benchmark: String, profile: &Profile) -> Result<PrecisionRow, ReportError> {
    let (rn, sn) = (run_nodes(profile)?, spec_nodes(profile)?);
    let (re, se) = (run_edges(profile)?, spec_edges(profile)?);

    Ok(PrecisionRow {
        benchmark,
        run_nodes: rn,
        spec_nodes: sn,
        run_edges: re,
        spec_edges: se,
        node_precision: percent(rn, sn),
        edge_precision: percent(re, se),
    })
}

fn sort_rows(rows: &mut [PrecisionRow]) {
    rows.sort_by(|a, b| {
        a.benchmark
            .cmp(&b.benchmark)
            .then(a.node_precision.total_cmp(&b.node_precision))
            .then(a.edge_precision.total_cmp(&b.edge_precision))
    });
}

/// Node and edge precision per run
///
/// Every non-DaCapo run gets a row. DaCapo runs share one main class, so
/// only the first run of each DaCapo benchmark is kept. Both lists come
/// back sorted by name, then precision.
pub fn precision_report(profiles: &[Profile]) -> Result<PrecisionReport, ReportError> {
    let mut jgf = Vec::new();
    let mut dacapo = Vec::new();
    let mut dacapo_seen = BTreeSet::new();

    for profile in profiles {
        if profile.main_class() == HARNESS_MAIN_CLASS {
            let name = capitalize(&harness_name(profile)?);
            if !dacapo_seen.insert(name.clone()) {
                continue;
            }
            dacapo.push(precision_row(name, profile)?);
        } else {
            let name = capitalize(&jgf_name(profile.main_class()));
            jgf.push(precision_row(name, profile)?);
        }
    }

    sort_rows(&mut jgf);
    sort_rows(&mut dacapo);
    Ok(PrecisionReport { jgf, dacapo })
}

impl fmt::Display for PrecisionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new(
            "Specification precision",
            &["Benchmark", "Nodes (run/spec)", "Edges (run/spec)", "Node %", "Edge %"],
        );
        for row in self.jgf.iter().chain(&self.dacapo) {
            table.push_row(vec![
                row.benchmark.clone(),
                format!("{}/{}", row.run_nodes, row.spec_nodes),
                format!("{}/{}", row.run_edges, row.spec_edges),
                format!("{:.1}", row.node_precision),
                format!("{:.1}", row.edge_precision),
            ]);
        }
        write!(f, "{}", table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_record;
    use std::path::PathBuf;

    fn run(main_class: &str, ext: &str, nodes: (i64, i64), edges: (i64, i64)) -> Profile {
        let text = format!(
            "{{'options' : {{'mainClass' : '{}', 'profileExt' : '{}'}}, \
             'Total comm nodes in run' : {}, 'Total comm nodes in used specs' : {}, \
             'Total comm edges in run' : {}, 'Total comm edges in used specs' : {}}}",
            main_class, ext, nodes.0, nodes.1, edges.0, edges.1
        );
        Profile::from_record(parse_record(&text).unwrap(), PathBuf::from("run.py"), "run.py").unwrap()
    }

    #[test]
    fn test_precision_rows() {
        let profiles = vec![
            run("JGFSORBenchSizeA", "-4-threads-prof-0.py", (3, 4), (1, 0)),
            run("Harness", "-xalan-prof-0.py", (1, 2), (1, 4)),
            run("Harness", "-xalan-prof-1.py", (2, 2), (4, 4)),
            run("JGFCryptBenchSizeA", "-4-threads-prof-0.py", (5, 5), (2, 4)),
            run("JGFCryptBenchSizeA", "-8-threads-prof-0.py", (4, 5), (1, 4)),
        ];

        let report = precision_report(&profiles).unwrap();
        let jgf: Vec<(&str, f64, f64)> = report
            .jgf
            .iter()
            .map(|r| (r.benchmark.as_str(), r.node_precision, r.edge_precision))
            .collect();
        assert_eq!(
            jgf,
            vec![("Crypt", 80.0, 25.0), ("Crypt", 100.0, 50.0), ("Sor", 75.0, 0.0)]
        );

        assert_eq!(report.dacapo.len(), 1);
        assert_eq!(report.dacapo[0].benchmark, "Xalan");
        assert_eq!(report.dacapo[0].node_precision, 50.0);
    }
}
