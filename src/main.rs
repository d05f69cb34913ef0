//! oshaprof CLI
//!
//! Summary reports over communication-checker profile and static-analysis
//! dumps.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use oshaprof::commands::{
    display_presets, display_version, execute_report, validate_args, validate_dump_files,
    ReportArgs,
};
use oshaprof::reports::ReportKind;

/// oshaprof - summaries of communication-checker dumps
#[derive(Parser, Debug)]
#[command(name = "oshaprof")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Arguments shared by every report
#[derive(Args, Debug)]
struct ReportCli {
    /// Dump files to read
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Require an option value, overriding the preset (repeatable)
    #[arg(short = 'O', long = "option", value_name = "KEY=VALUE")]
    options: Vec<String>,

    /// TOML file with [presets.<report>] overrides
    #[arg(short, long, env = "OSHAPROF_CONFIG")]
    config: Option<PathBuf>,

    /// Also write the report as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Thread counts per DaCapo benchmark
    Threads(ReportCli),

    /// Array cache hit rates for array and element states
    Caches(ReportCli),

    /// Stack-walk and communication extremes
    Walks(ReportCli),

    /// Frequently communicating call stacks
    FreqStacks(ReportCli),

    /// How checks were resolved, per suite
    Checks(ReportCli),

    /// Runtime slowdown per thread count
    Slowdown(ReportCli),

    /// Peak memory overhead
    Memory(ReportCli),

    /// Runtime slowdown of element-state runs at 8 threads
    SlowdownElementStates(ReportCli),

    /// Peak memory overhead of element-state runs at 8 threads
    MemoryElementStates(ReportCli),

    /// Communicating stack shapes
    Stacks(ReportCli),

    /// Specification node and edge precision
    Precision(ReportCli),

    /// Modules and methods per module (static stats)
    Modules(ReportCli),

    /// Annotations per method (static stats)
    Annotations(ReportCli),

    /// Inlined methods (static stats)
    Inlining(ReportCli),

    /// Annotations per method overall (static stats)
    Conciseness(ReportCli),

    /// Parse dump files and print a summary of each
    Validate {
        /// Dump files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Display the option filter each report applies
    Presets {
        /// TOML file with [presets.<report>] overrides
        #[arg(short, long, env = "OSHAPROF_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

impl Commands {
    /// Report kind and arguments, for the report subcommands
    fn into_report(self) -> std::result::Result<(ReportKind, ReportCli), Commands> {
        let report = match self {
            Commands::Threads(cli) => (ReportKind::Threads, cli),
            Commands::Caches(cli) => (ReportKind::Caches, cli),
            Commands::Walks(cli) => (ReportKind::Walks, cli),
            Commands::FreqStacks(cli) => (ReportKind::FreqStacks, cli),
            Commands::Checks(cli) => (ReportKind::Checks, cli),
            Commands::Slowdown(cli) => (ReportKind::Slowdown, cli),
            Commands::Memory(cli) => (ReportKind::Memory, cli),
            Commands::SlowdownElementStates(cli) => (ReportKind::SlowdownElementStates, cli),
            Commands::MemoryElementStates(cli) => (ReportKind::MemoryElementStates, cli),
            Commands::Stacks(cli) => (ReportKind::Stacks, cli),
            Commands::Precision(cli) => (ReportKind::Precision, cli),
            Commands::Modules(cli) => (ReportKind::Modules, cli),
            Commands::Annotations(cli) => (ReportKind::Annotations, cli),
            Commands::Inlining(cli) => (ReportKind::Inlining, cli),
            Commands::Conciseness(cli) => (ReportKind::Conciseness, cli),
            other => return Err(other),
        };
        Ok(report)
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command.into_report() {
        Ok((kind, report)) => {
            let args = ReportArgs {
                kind,
                files: report.files,
                config: report.config,
                options: report.options,
                output: report.output,
            };

            // Validate args first
            validate_args(&args)?;

            execute_report(args)?;
        }

        Err(Commands::Validate { files }) => {
            validate_dump_files(&files)?;
        }

        Err(Commands::Presets { config }) => {
            display_presets(config.as_deref())?;
        }

        Err(_) => {
            display_version();
        }
    }

    Ok(())
}
