//! JSON report output writer.
//!
//! Wraps a report in a small envelope (schema version, report name,
//! timestamp, input count) and writes it pretty-printed.

use crate::reports::ReportKind;
use crate::utils::config::REPORT_SCHEMA_VERSION;
use crate::utils::error::OutputError;
use chrono::Utc;
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Envelope written around every report
#[derive(Debug, Serialize)]
pub struct ReportDocument<'a, T: Serialize> {
    pub version: &'static str,
    pub report: ReportKind,
    pub generated_at: String,
    /// Number of dump files the report was computed from
    pub inputs: usize,
    pub data: &'a T,
}

impl<'a, T: Serialize> ReportDocument<'a, T> {
    pub fn new(report: ReportKind, inputs: usize, data: &'a T) -> Self {
        Self {
            version: REPORT_SCHEMA_VERSION,
            report,
            generated_at: Utc::now().to_rfc3339(),
            inputs,
            data,
        }
    }
}

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `document` - Report wrapped in its envelope
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report<T: Serialize>(
    document: &ReportDocument<'_, T>,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!(
        "Writing {} report to: {}",
        document.report.name(),
        output_path.display()
    );

    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, document).map_err(OutputError::SerializationFailed)?;

    info!(
        "Report written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Render a report envelope as a JSON string
pub fn report_to_string<T: Serialize>(document: &ReportDocument<'_, T>) -> Result<String, OutputError> {
    serde_json::to_string_pretty(document).map_err(OutputError::SerializationFailed)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
