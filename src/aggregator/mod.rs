//! Aggregation of loaded records into groups and summary numbers.
//!
//! This module provides:
//! - Key-sorted partitioning and predicate bisection
//! - Field projections over profile lists
//! - Weighted totals and means over frequency distributions

pub mod distribution;
pub mod grouping;

// Re-export main functions
pub use distribution::{dist_average, dist_count, dist_total};
pub use grouping::{
    bisect, map_to_field, map_to_tuples, partition, split_by_config, to_tuple, try_partition,
};
