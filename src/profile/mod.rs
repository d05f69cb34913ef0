//! Per-run dynamic profile records.
//!
//! One dump file holds one benchmark execution: its counters, its
//! histograms, and the option mapping the checker was run with.

pub mod accessors;
pub mod loader;
pub mod naming;
pub mod options;

pub use loader::{load, load_all, load_all_unfiltered};
pub use options::{match_options, OptionFilter};

use crate::parser::{Record, Value};
use crate::utils::error::AccessError;
use std::path::{Path, PathBuf};

/// A loaded profile record
///
/// **Public** - produced by the loader, read by accessors and reports.
/// Guarantees an `options` record and a `mainClass` string, both in the
/// options and at the top level.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    record: Record,
    options: Record,
    main_class: String,
    source: PathBuf,
}

impl Profile {
    /// Validate a parsed record and fill in `mainClass`
    ///
    /// When the options carry no `mainClass`, it is taken from `base_name`
    /// up to the first hyphen (`JGFSeriesBenchSizeC-8-threads-prof-0.py`
    /// yields `JGFSeriesBenchSizeC`).
    ///
    /// # Errors
    /// A message describing the shape problem: missing or non-record
    /// `options`, or a `mainClass` that is not a string.
    pub fn from_record(
        mut record: Record,
        source: impl Into<PathBuf>,
        base_name: &str,
    ) -> Result<Self, String> {
        let mut options = match record.remove("options") {
            Some(Value::Record(options)) => options,
            Some(other) => return Err(format!("'options' is {}, expected record", other.kind())),
            None => return Err("missing 'options' mapping".to_string()),
        };

        let main_class = match options.get("mainClass") {
            Some(Value::Str(name)) => name.clone(),
            Some(other) => {
                return Err(format!(
                    "'options.mainClass' is {}, expected string",
                    other.kind()
                ))
            }
            None => {
                let synthesized = base_name.split('-').next().unwrap_or(base_name).to_string();
                options.insert("mainClass", Value::Str(synthesized.clone()));
                synthesized
            }
        };

        record.insert("options", Value::Record(options.clone()));
        record.insert("mainClass", Value::Str(main_class.clone()));

        Ok(Self {
            record,
            options,
            main_class,
            source: source.into(),
        })
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn options(&self) -> &Record {
        &self.options
    }

    pub fn main_class(&self) -> &str {
        &self.main_class
    }

    /// File this profile was loaded from
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Option value as a string, if present and a string
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options().get(key).and_then(Value::as_str)
    }

    /// Whole option mapping, used as a configuration key
    pub fn option_mapping(&self) -> OptionFilter {
        self.options()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    pub fn get(&self, key: &str) -> Result<&Value, AccessError> {
        self.record.require(key)
    }

    pub fn get_int(&self, key: &str) -> Result<i64, AccessError> {
        self.record.get_int(key)
    }

    pub fn get_number(&self, key: &str) -> Result<f64, AccessError> {
        self.record.get_number(key)
    }
}
