//! CLI command implementations.
//!
//! Commands orchestrate the library components: loading, filtering,
//! reporting and writing output.

pub mod models;
pub mod report;
pub mod utils;

// Re-export main command functions
pub use models::ReportArgs;
pub use report::{effective_filter, execute_report, validate_args};
pub use utils::{display_presets, display_version, validate_dump_files};
