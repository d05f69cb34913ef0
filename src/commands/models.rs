use crate::reports::ReportKind;
use std::path::PathBuf;

/// Arguments shared by every report command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// Which report to compute
    pub kind: ReportKind,

    /// Dump files to load
    pub files: Vec<PathBuf>,

    /// TOML file with preset overrides
    pub config: Option<PathBuf>,

    /// Extra `KEY=VALUE` option filters, applied over the preset
    pub options: Vec<String>,

    /// Output path for the JSON report (optional)
    pub output: Option<PathBuf>,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            kind: ReportKind::Threads,
            files: Vec::new(),
            config: None,
            options: Vec::new(),
            output: None,
        }
    }
}
