//! Profile dump loading.
//!
//! Two independent filters run during a batch load: a base-name filter
//! decides which files are opened at all, and a record filter decides which
//! parsed profiles are kept. Any unreadable or malformed file fails the
//! whole batch.

use super::Profile;
use crate::parser::parse_record;
use crate::utils::error::LoadError;
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Load one profile dump
///
/// **Public** - used by `load_all` and the validate command
///
/// # Errors
/// * `LoadError::Io` - file cannot be read
/// * `LoadError::Parse` - content is not a valid literal
/// * `LoadError::Shape` - content is not a profile record
pub fn load(path: impl AsRef<Path>) -> Result<Profile, LoadError> {
    let path = path.as_ref();
    debug!("Loading profile: {}", path.display());

    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let record = parse_record(&text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let profile = Profile::from_record(record, path, &base_name(path))
        .map_err(|message| LoadError::Shape {
            path: path.to_path_buf(),
            message,
        })?;

    debug!(
        "Profile loaded: mainClass {}, {} fields",
        profile.main_class(),
        profile.record().len()
    );

    Ok(profile)
}

/// Load a batch of profile dumps with both filters
///
/// **Public** - main entry point for reports
///
/// # Arguments
/// * `paths` - Dump files, in the order results should come back
/// * `filename_filter` - Called with each base name; rejected files are never opened
/// * `prof_filter` - Called with each loaded profile; rejected profiles are dropped
///
/// # Returns
/// Accepted profiles in input order
pub fn load_all<P, F, G>(
    paths: &[P],
    mut filename_filter: F,
    mut prof_filter: G,
) -> Result<Vec<Profile>, LoadError>
where
    P: AsRef<Path>,
    F: FnMut(&str) -> bool,
    G: FnMut(&Profile) -> bool,
{
    let mut profiles = Vec::with_capacity(paths.len());
    let mut skipped = 0;
    let mut filtered = 0;

    for path in paths {
        let path = path.as_ref();
        if !filename_filter(&base_name(path)) {
            debug!("Skipping by name: {}", path.display());
            skipped += 1;
            continue;
        }

        let profile = load(path)?;
        if prof_filter(&profile) {
            profiles.push(profile);
        } else {
            debug!("Filtered out by options: {}", path.display());
            filtered += 1;
        }
    }

    info!(
        "Loaded {} profile(s), skipped {} by name, filtered {} by options",
        profiles.len(),
        skipped,
        filtered
    );

    Ok(profiles)
}

/// Load every path and keep every profile
pub fn load_all_unfiltered<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Profile>, LoadError> {
    load_all(paths, |_| true, |_| true)
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
