//! Named projections over static-stats records.
//!
//! Each field is a distribution over modules (e.g. methods per module);
//! totals come from `dist_total`.

use super::StaticStats;
use crate::aggregator::dist_total;
use crate::parser::Distribution;
use crate::utils::error::AccessError;

pub const TOTAL_METHODS: &str = "Total methods";
pub const INLINED_METHODS: &str = "Inlined methods";
pub const COMM_GROUPS: &str = "Communication groups";
pub const INTERFACE_GROUPS: &str = "Interface groups";
pub const GROUP_MEMBER_ANNS: &str = "Group membership annotations";
pub const GROUP_DECL_ANNS: &str = "Group declaration annotations";
pub const NON_COMM_ANNS: &str = "Non-communicator annotations";
pub const INLINE_ANNS: &str = "Inline annotations";
pub const MODULE_MEMBER_ANNS: &str = "Module membership annotations";

/// The five annotation kinds, in report column order
pub const ANNOTATION_KINDS: [&str; 5] = [
    GROUP_MEMBER_ANNS,
    GROUP_DECL_ANNS,
    NON_COMM_ANNS,
    INLINE_ANNS,
    MODULE_MEMBER_ANNS,
];

pub fn methods(stats: &StaticStats) -> Result<&Distribution, AccessError> {
    stats.get_dist(TOTAL_METHODS)
}

pub fn inlined(stats: &StaticStats) -> Result<&Distribution, AccessError> {
    stats.get_dist(INLINED_METHODS)
}

pub fn comm_groups(stats: &StaticStats) -> Result<&Distribution, AccessError> {
    stats.get_dist(COMM_GROUPS)
}

pub fn interface_groups(stats: &StaticStats) -> Result<&Distribution, AccessError> {
    stats.get_dist(INTERFACE_GROUPS)
}

pub fn group_member_anns(stats: &StaticStats) -> Result<&Distribution, AccessError> {
    stats.get_dist(GROUP_MEMBER_ANNS)
}

pub fn group_decl_anns(stats: &StaticStats) -> Result<&Distribution, AccessError> {
    stats.get_dist(GROUP_DECL_ANNS)
}

pub fn non_comm_anns(stats: &StaticStats) -> Result<&Distribution, AccessError> {
    stats.get_dist(NON_COMM_ANNS)
}

pub fn inline_anns(stats: &StaticStats) -> Result<&Distribution, AccessError> {
    stats.get_dist(INLINE_ANNS)
}

pub fn module_member_anns(stats: &StaticStats) -> Result<&Distribution, AccessError> {
    stats.get_dist(MODULE_MEMBER_ANNS)
}

/// Totals for each annotation kind, in `ANNOTATION_KINDS` order
pub fn annotation_totals(stats: &StaticStats) -> Result<[i64; 5], AccessError> {
    let mut totals = [0i64; 5];
    for (slot, kind) in totals.iter_mut().zip(ANNOTATION_KINDS) {
        *slot = dist_total([stats.get_dist(kind)?]);
    }
    Ok(totals)
}

/// Every annotation written for the benchmark
pub fn annotation_total(stats: &StaticStats) -> Result<i64, AccessError> {
    Ok(annotation_totals(stats)?.iter().sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_record;

    fn stats() -> StaticStats {
        let record = parse_record(
            r#"{"Total methods" : {3 : 2, 10 : 1}, "Inlined methods" : {1 : 4},
                "Group membership annotations" : {1 : 3},
                "Group declaration annotations" : {2 : 1},
                "Non-communicator annotations" : {},
                "Inline annotations" : {1 : 1},
                "Module membership annotations" : {0 : 9, 4 : 1}}"#,
        )
        .unwrap();
        StaticStats::new("crypt", record)
    }

    #[test]
    fn test_annotation_totals() {
        let s = stats();
        assert_eq!(annotation_totals(&s).unwrap(), [3, 2, 0, 1, 4]);
        assert_eq!(annotation_total(&s).unwrap(), 10);
    }

    #[test]
    fn test_method_distributions() {
        let s = stats();
        assert_eq!(dist_total([methods(&s).unwrap()]), 16);
        assert_eq!(dist_total([inlined(&s).unwrap()]), 4);
        assert!(comm_groups(&s).is_err());
    }
}
