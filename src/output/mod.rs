//! Output writers for reports.
//!
//! This module handles:
//! - Text tables for stdout
//! - JSON report files

pub mod json;
pub mod table;

// Re-export main functions
pub use json::{report_to_string, write_report, ReportDocument};
pub use table::{fmt_percent, fmt_ratio, Table};
