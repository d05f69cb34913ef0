//! Per-benchmark static-analysis summaries.

pub mod accessors;
pub mod loader;

pub use loader::{load, load_all};

use crate::parser::{Distribution, Record};
use crate::utils::error::AccessError;

/// Static summary of one benchmark, named by its dump file stem
#[derive(Debug, Clone, PartialEq)]
pub struct StaticStats {
    name: String,
    record: Record,
}

impl StaticStats {
    pub fn new(name: impl Into<String>, record: Record) -> Self {
        Self {
            name: name.into(),
            record,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn get_dist(&self, key: &str) -> Result<&Distribution, AccessError> {
        self.record.get_dist(key)
    }
}
