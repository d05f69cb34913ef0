//! Dump parsing and the value model.
//!
//! This module handles:
//! - Parsing the literal text of one dump file
//! - Classifying mappings into records and distributions
//! - Typed field access with clear mismatch errors

pub mod literal;
pub mod value;

// Re-export main types
pub use literal::{parse_literal, parse_record};
pub use value::{Distribution, Record, Value};
