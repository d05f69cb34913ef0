//! Report command implementation.
//!
//! A report run:
//! 1. Resolves the option filter (preset, config file, `-O` flags)
//! 2. Loads the matching dump files
//! 3. Computes the report
//! 4. Prints the text table and optionally writes JSON

use super::models::ReportArgs;
use crate::output::{write_report, ReportDocument};
use crate::profile::{self, match_options, OptionFilter};
use crate::reports::{self, InputKind, ReportKind};
use crate::stats;
use crate::utils::config::{load_presets, parse_option_assignment, PresetConfig};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::Serialize;
use std::fmt::Display;
use std::time::Instant;

/// Execute a report command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Preset config read or parse failures
/// * Any dump file that cannot be read or parsed
/// * Missing or mistyped fields, zero denominators, empty groups
/// * JSON write errors
pub fn execute_report(args: ReportArgs) -> Result<()> {
    let start_time = Instant::now();
    let kind = args.kind;

    info!(
        "Running {} report over {} file(s)",
        kind.name(),
        args.files.len()
    );

    match kind.input() {
        InputKind::Profiles => {
            let filter = effective_filter(&args)?;
            debug!("Option filter: {{{}}}", filter);

            let profiles = profile::load_all(
                &args.files,
                |name| kind.accepts_file(name),
                |p| match_options(&filter, p),
            )
            .context("Failed to load profiles")?;

            if profiles.is_empty() {
                warn!("No profile matched the {} filters", kind.name());
            }

            let inputs = profiles.len();
            let context = || format!("Failed to compute {} report", kind.name());
            match kind {
                ReportKind::Threads => {
                    emit(&reports::threads_report(&profiles).with_context(context)?, &args, inputs)?
                }
                ReportKind::Caches => {
                    emit(&reports::caches_report(&profiles).with_context(context)?, &args, inputs)?
                }
                ReportKind::Walks => {
                    emit(&reports::walks_report(&profiles).with_context(context)?, &args, inputs)?
                }
                ReportKind::FreqStacks => emit(
                    &reports::freq_stacks_report(&profiles).with_context(context)?,
                    &args,
                    inputs,
                )?,
                ReportKind::Checks => {
                    emit(&reports::checks_report(&profiles).with_context(context)?, &args, inputs)?
                }
                ReportKind::Slowdown => emit(
                    &reports::slowdown_report(&profiles).with_context(context)?,
                    &args,
                    inputs,
                )?,
                ReportKind::Memory => {
                    emit(&reports::memory_report(&profiles).with_context(context)?, &args, inputs)?
                }
                ReportKind::SlowdownElementStates => emit(
                    &reports::slowdown_element_states_report(&profiles).with_context(context)?,
                    &args,
                    inputs,
                )?,
                ReportKind::MemoryElementStates => emit(
                    &reports::memory_element_states_report(&profiles).with_context(context)?,
                    &args,
                    inputs,
                )?,
                ReportKind::Stacks => {
                    emit(&reports::stacks_report(&profiles).with_context(context)?, &args, inputs)?
                }
                ReportKind::Precision => emit(
                    &reports::precision_report(&profiles).with_context(context)?,
                    &args,
                    inputs,
                )?,
                _ => unreachable_input(kind)?,
            }
        }
        InputKind::StaticStats => {
            if let Some(path) = &args.config {
                debug!(
                    "Ignoring preset config {} for static report '{}'",
                    path.display(),
                    kind.name()
                );
            }
            let statses = stats::load_all(&args.files).context("Failed to load static stats")?;

            let inputs = statses.len();
            let context = || format!("Failed to compute {} report", kind.name());
            match kind {
                ReportKind::Modules => {
                    emit(&reports::modules_report(&statses).with_context(context)?, &args, inputs)?
                }
                ReportKind::Annotations => emit(
                    &reports::annotations_report(&statses).with_context(context)?,
                    &args,
                    inputs,
                )?,
                ReportKind::Inlining => {
                    emit(&reports::inlining_report(&statses).with_context(context)?, &args, inputs)?
                }
                ReportKind::Conciseness => emit(
                    &reports::conciseness_report(&statses).with_context(context)?,
                    &args,
                    inputs,
                )?,
                _ => unreachable_input(kind)?,
            }
        }
    }

    info!(
        "✓ {} report finished in {:.2}s",
        kind.name(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}

fn unreachable_input(kind: ReportKind) -> Result<()> {
    anyhow::bail!("Report '{}' does not read this kind of input", kind.name())
}

/// Print a report and write its JSON form when requested
fn emit<T: Serialize + Display>(report: &T, args: &ReportArgs, inputs: usize) -> Result<()> {
    println!("{}", report);

    if let Some(path) = &args.output {
        let document = ReportDocument::new(args.kind, inputs, report);
        write_report(&document, path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", path.display());
    }

    Ok(())
}

/// Built-in preset, then config-file overrides, then `-O` flags
///
/// **Public** - also used by the `presets` command
pub fn effective_filter(args: &ReportArgs) -> Result<OptionFilter> {
    let config = match &args.config {
        Some(path) => load_presets(path)
            .with_context(|| format!("Failed to load presets from {}", path.display()))?,
        None => PresetConfig::default(),
    };

    let mut filter = config.resolve(args.kind.name(), args.kind.builtin_preset());
    for raw in &args.options {
        let (key, value) = parse_option_assignment(raw)?;
        filter.insert(key, value);
    }

    Ok(filter)
}

/// Validate report arguments before running
///
/// **Public** - called before execute_report
pub fn validate_args(args: &ReportArgs) -> Result<()> {
    if args.files.is_empty() {
        anyhow::bail!("At least one dump file is required");
    }

    for raw in &args.options {
        parse_option_assignment(raw)?;
    }

    // The config may come from OSHAPROF_CONFIG; only explicit -O flags are rejected
    if args.kind.input() == InputKind::StaticStats && !args.options.is_empty() {
        anyhow::bail!(
            "Report '{}' reads static stats; option filters do not apply",
            args.kind.name()
        );
    }

    if let Some(output) = &args.output {
        if output.as_os_str().is_empty() {
            anyhow::bail!("Output path cannot be empty");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn args(kind: ReportKind) -> ReportArgs {
        ReportArgs {
            kind,
            files: vec![PathBuf::from("run.py")],
            ..ReportArgs::default()
        }
    }

    #[test]
    fn test_validate_requires_files() {
        let args = ReportArgs::default();
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_option() {
        let mut args = args(ReportKind::Caches);
        args.options.push("profile".to_string());
        assert!(validate_args(&args).is_err());

        args.options = vec!["profile=false".to_string()];
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_rejects_filters_on_static_reports() {
        let mut args = args(ReportKind::Modules);
        assert!(validate_args(&args).is_ok());
        args.config = Some(PathBuf::from("presets.toml"));
        assert!(validate_args(&args).is_ok());
        args.options.push("profile=true".to_string());
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_effective_filter_layers() {
        let mut config = NamedTempFile::new().unwrap();
        writeln!(config, "[presets.caches]\nrecord = \"false\"\narrayCacheSize = \"32\"").unwrap();

        let mut args = args(ReportKind::Caches);
        args.config = Some(config.path().to_path_buf());
        args.options = vec!["arrayCacheSize=64".to_string()];

        let filter = effective_filter(&args).unwrap();
        assert_eq!(filter.get("profile"), Some("true"));
        assert_eq!(filter.get("record"), Some("false"));
        assert_eq!(filter.get("arrayCacheSize"), Some("64"));
    }
}
