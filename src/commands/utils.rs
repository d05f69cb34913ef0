use crate::profile;
use crate::reports::{InputKind, ReportKind};
use crate::stats;
use crate::utils::config::{load_presets, PresetConfig, REPORT_SCHEMA_VERSION};
use crate::utils::error::LoadError;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Parse dump files and print a one-line summary of each
///
/// Files whose top level has no `options` mapping are read as static
/// stats. Stops at the first file that does not parse.
pub fn validate_dump_files(files: &[PathBuf]) -> Result<()> {
    for path in files {
        println!("{}", describe_dump(path)?);
    }
    println!("✓ {} file(s) valid", files.len());
    Ok(())
}

fn describe_dump(path: &Path) -> Result<String> {
    match profile::load(path) {
        Ok(p) => Ok(format!(
            "{}: profile of {} ({} fields, {} options)",
            path.display(),
            p.main_class(),
            p.record().len(),
            p.options().len()
        )),
        Err(LoadError::Shape { .. }) => {
            let s = stats::load(path)
                .with_context(|| format!("Failed to validate {}", path.display()))?;
            Ok(format!(
                "{}: static stats of {} ({} fields)",
                path.display(),
                s.name(),
                s.record().len()
            ))
        }
        Err(e) => Err(e).with_context(|| format!("Failed to validate {}", path.display())),
    }
}

/// Print the effective option filter of every profile report
pub fn display_presets(config: Option<&Path>) -> Result<()> {
    let presets = match config {
        Some(path) => load_presets(path)
            .with_context(|| format!("Failed to load presets from {}", path.display()))?,
        None => PresetConfig::default(),
    };

    for kind in ReportKind::ALL {
        if kind.input() != InputKind::Profiles {
            continue;
        }
        let filter = presets.resolve(kind.name(), kind.builtin_preset());
        if filter.is_empty() {
            println!("{:<12} (every profile)", kind.name());
        } else {
            println!("{:<12} {}", kind.name(), filter);
        }
    }

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("oshaprof v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", REPORT_SCHEMA_VERSION);
    println!();
    println!("Summaries of communication-checker profile and static-analysis dumps.");
}
