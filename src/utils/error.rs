//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// A malformed dump literal, located by line and column (both 1-based)
#[derive(Error, Debug, Clone, PartialEq)]
#[error("line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// Errors that can occur while loading a dump file
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed literal in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Unexpected record shape in {}: {message}", .path.display())]
    Shape { path: PathBuf, message: String },
}

/// Errors that can occur when reading a field out of a record
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccessError {
    #[error("Missing field: {0}")]
    MissingKey(String),

    #[error("Field '{key}' is {found}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Field '{key}' is malformed: {message}")]
    Malformed { key: String, message: String },
}

/// Errors that can occur while computing a report
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Division by zero computing {0}")]
    ZeroDenominator(String),

    #[error("No profiles to aggregate for {0}")]
    EmptyGroup(String),
}

/// Errors that can occur while resolving presets
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config TOML parse error: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Invalid option '{0}', expected KEY=VALUE")]
    InvalidOption(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
