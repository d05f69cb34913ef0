//! Static-stats dump loading.
//!
//! Unlike profiles there are no filters: every path given is loaded.

use super::StaticStats;
use crate::parser::parse_record;
use crate::utils::error::LoadError;
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Load one static-stats dump, named by its file stem
///
/// # Errors
/// * `LoadError::Io` - file cannot be read
/// * `LoadError::Parse` - content is not a valid mapping literal
pub fn load(path: impl AsRef<Path>) -> Result<StaticStats, LoadError> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    debug!("Loading static stats '{}' from {}", name, path.display());

    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let record = parse_record(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(StaticStats::new(name, record))
}

/// Load every path, in order
pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<StaticStats>, LoadError> {
    let statses = paths.iter().map(|p| load(p)).collect::<Result<Vec<_>, _>>()?;
    info!("Loaded {} static summaries", statses.len());
    Ok(statses)
}
