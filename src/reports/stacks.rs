//! Shape of communicating call stacks per benchmark.

use crate::aggregator::{dist_average, partition};
use crate::output::table::Table;
use crate::profile::accessors::{stack_depth_dist, stack_segment_count_dist, stack_segment_length_dist};
use crate::profile::naming::jgf_name;
use crate::profile::Profile;
use crate::utils::error::ReportError;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackShapeRow {
    pub benchmark: String,
    /// Methods per stack segment
    pub mean_segment_length: f64,
    /// Depth in methods
    pub mean_depth_methods: f64,
    /// Depth in segments
    pub mean_depth_segments: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StacksReport {
    pub rows: Vec<StackShapeRow>,
}

pub fn stacks_report(profiles: &[Profile]) -> Result<StacksReport, ReportError> {
    let rows = partition(|p: &&Profile| jgf_name(p.main_class()), profiles)
        .into_iter()
        .map(|(benchmark, group)| -> Result<StackShapeRow, ReportError> {
            let lengths = group
                .iter()
                .map(|p| stack_segment_length_dist(p))
                .collect::<Result<Vec<_>, _>>()?;
            let depths = group
                .iter()
                .map(|p| stack_depth_dist(p))
                .collect::<Result<Vec<_>, _>>()?;
            let segments = group
                .iter()
                .map(|p| stack_segment_count_dist(p))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(StackShapeRow {
                benchmark,
                mean_segment_length: dist_average(lengths, false),
                mean_depth_methods: dist_average(depths, false),
                mean_depth_segments: dist_average(segments, false),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StacksReport { rows })
}

impl fmt::Display for StacksReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new(
            "Communicating stacks",
            &["Benchmark", "Segment size", "Depth (methods)", "Depth (segments)"],
        );
        for row in &self.rows {
            table.push_row(vec![
                row.benchmark.clone(),
                format!("{:.6}", row.mean_segment_length),
                format!("{:.6}", row.mean_depth_methods),
                format!("{:.6}", row.mean_depth_segments),
            ]);
        }
        write!(f, "{}", table)
    }
}
