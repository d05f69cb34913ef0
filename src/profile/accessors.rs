//! Named projections over profile records.
//!
//! Every accessor reads the exact dump keys below. A missing key or a value
//! of the wrong shape is an error: a profile from an incompatible checker
//! build should stop the run, not produce a zero.

use super::Profile;
use crate::parser::Distribution;
use crate::utils::error::{AccessError, ReportError};

pub const RUNTIME: &str = "Premain to fini time";
pub const INSTRUMENTATION_TIME: &str = "Instrumentation time";
pub const PEAK_MEMORY: &str = "Memory peak";

pub const ALL_FIELD_READS: &str = "All field reads";
pub const ALL_ARRAY_READS: &str = "All array reads";
pub const ALL_ACQUIRES: &str = "All acquires";
pub const COMM_FIELD_READS: &str = "Communicating field reads";
pub const COMM_ARRAY_READS: &str = "Communicating array reads";
pub const COMM_ACQUIRES: &str = "Communicating acquires";
pub const COMM_FIELD_READ_SLOW: &str = "Communicating field read slow path";
pub const COMM_ARRAY_READ_SLOW: &str = "Communicating array read slow path";
pub const COMM_ACQUIRE_SLOW: &str = "Communicating acquire slow path";
pub const FULL_STACK_WALKS: &str = "Full stack walks";

pub const STACK_DEPTHS: &str = "Communicating stack depths";
pub const SEGMENT_LENGTHS: &str = "Length in methods of stack segments";
pub const SEGMENT_COUNTS: &str = "Segments on a communicating stack";

pub const MODULES_USED: &str = "Modules used";
pub const SPEC_NODES: &str = "Total comm nodes in used specs";
pub const SPEC_EDGES: &str = "Total comm edges in used specs";
pub const RUN_NODES: &str = "Total comm nodes in run";
pub const RUN_EDGES: &str = "Total comm edges in run";

pub const THREADS: &str = "threads";
pub const FREQUENT_STACKS: &str = "frequently communicating stacks";
pub const ARRAY_HITS: &str = "Array hits";
pub const ARRAY_MISSES: &str = "Array misses";

fn sum_fields(profile: &Profile, fields: &[&str]) -> Result<i64, AccessError> {
    fields
        .iter()
        .try_fold(0i64, |acc, f| profile.get_int(f).map(|n| acc + n))
}

// Timing and memory

pub fn runtime(profile: &Profile) -> Result<f64, AccessError> {
    profile.get_number(RUNTIME)
}

pub fn instrumentation_time(profile: &Profile) -> Result<f64, AccessError> {
    profile.get_number(INSTRUMENTATION_TIME)
}

pub fn peak_memory(profile: &Profile) -> Result<f64, AccessError> {
    profile.get_number(PEAK_MEMORY)
}

// Check counters

/// Field and array reads
pub fn reads(profile: &Profile) -> Result<i64, AccessError> {
    sum_fields(profile, &[ALL_FIELD_READS, ALL_ARRAY_READS])
}

pub fn comm_reads(profile: &Profile) -> Result<i64, AccessError> {
    sum_fields(profile, &[COMM_FIELD_READS, COMM_ARRAY_READS])
}

/// Every checked operation: field reads, array reads and acquires
pub fn checks(profile: &Profile) -> Result<i64, AccessError> {
    sum_fields(profile, &[ALL_FIELD_READS, ALL_ARRAY_READS, ALL_ACQUIRES])
}

pub fn stack_walks(profile: &Profile) -> Result<i64, AccessError> {
    profile.get_int(FULL_STACK_WALKS)
}

/// Communicating checks that missed the fast memo
pub fn slow_comms(profile: &Profile) -> Result<i64, AccessError> {
    sum_fields(
        profile,
        &[COMM_FIELD_READ_SLOW, COMM_ARRAY_READ_SLOW, COMM_ACQUIRE_SLOW],
    )
}

pub fn slow_memo_hits(profile: &Profile) -> Result<i64, AccessError> {
    Ok(slow_comms(profile)? - stack_walks(profile)?)
}

/// Checks that found a communicating access
pub fn comms(profile: &Profile) -> Result<i64, AccessError> {
    sum_fields(profile, &[COMM_FIELD_READS, COMM_ARRAY_READS, COMM_ACQUIRES])
}

pub fn fast_memo_hits(profile: &Profile) -> Result<i64, AccessError> {
    Ok(comms(profile)? - slow_comms(profile)?)
}

pub fn thread_local_hits(profile: &Profile) -> Result<i64, AccessError> {
    Ok(checks(profile)? - comms(profile)?)
}

// Rates over all checks. The denominator is not guarded: a run with no
// checks at all is reported as an error.

fn rate_of_checks(
    profile: &Profile,
    numerator: fn(&Profile) -> Result<i64, AccessError>,
    what: &str,
) -> Result<f64, ReportError> {
    let total = checks(profile)?;
    if total == 0 {
        return Err(ReportError::ZeroDenominator(format!(
            "{} of {}",
            what,
            profile.source().display()
        )));
    }
    Ok(numerator(profile)? as f64 / total as f64)
}

pub fn thread_local_rate(profile: &Profile) -> Result<f64, ReportError> {
    rate_of_checks(profile, thread_local_hits, "thread-local rate")
}

pub fn comm_rate(profile: &Profile) -> Result<f64, ReportError> {
    rate_of_checks(profile, comms, "communication rate")
}

pub fn fast_memo_hit_rate(profile: &Profile) -> Result<f64, ReportError> {
    rate_of_checks(profile, fast_memo_hits, "fast memo hit rate")
}

pub fn slow_memo_hit_rate(profile: &Profile) -> Result<f64, ReportError> {
    rate_of_checks(profile, slow_memo_hits, "slow memo hit rate")
}

pub fn stack_walk_rate(profile: &Profile) -> Result<f64, ReportError> {
    rate_of_checks(profile, stack_walks, "stack walk rate")
}

// Stack shape distributions

pub fn stack_depth_dist(profile: &Profile) -> Result<&Distribution, AccessError> {
    profile.record().get_dist(STACK_DEPTHS)
}

pub fn stack_segment_length_dist(profile: &Profile) -> Result<&Distribution, AccessError> {
    profile.record().get_dist(SEGMENT_LENGTHS)
}

/// Segments per communicating stack (half-counted by the profiler)
pub fn stack_segment_count_dist(profile: &Profile) -> Result<&Distribution, AccessError> {
    profile.record().get_dist(SEGMENT_COUNTS)
}

// Specification graph sizes

pub fn communicating_modules(profile: &Profile) -> Result<i64, AccessError> {
    profile.get_int(MODULES_USED)
}

pub fn spec_nodes(profile: &Profile) -> Result<i64, AccessError> {
    profile.get_int(SPEC_NODES)
}

pub fn spec_edges(profile: &Profile) -> Result<i64, AccessError> {
    profile.get_int(SPEC_EDGES)
}

pub fn run_nodes(profile: &Profile) -> Result<i64, AccessError> {
    profile.get_int(RUN_NODES)
}

pub fn run_edges(profile: &Profile) -> Result<i64, AccessError> {
    profile.get_int(RUN_EDGES)
}

// Run metadata and caches

pub fn threads(profile: &Profile) -> Result<i64, AccessError> {
    profile.get_int(THREADS)
}

pub fn frequent_stacks(profile: &Profile) -> Result<i64, AccessError> {
    profile.get_int(FREQUENT_STACKS)
}

pub fn array_hits(profile: &Profile) -> Result<i64, AccessError> {
    profile.get_int(ARRAY_HITS)
}

pub fn array_misses(profile: &Profile) -> Result<i64, AccessError> {
    profile.get_int(ARRAY_MISSES)
}
