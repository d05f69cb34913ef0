//! Summaries over integer-keyed frequency distributions.
//!
//! A distribution maps a value (stack depth, methods per module) to how
//! often it was observed. Several distributions can be summarized together,
//! e.g. the stack-depth histograms of every run of one benchmark.

use crate::parser::Distribution;

/// `(Σ key × count, Σ count)` in 128-bit accumulators
fn sums<'a>(dists: impl IntoIterator<Item = &'a Distribution>, drop_zero: bool) -> (i128, u128) {
    dists
        .into_iter()
        .flat_map(Distribution::iter)
        .filter(|(value, _)| !(drop_zero && *value == 0))
        .fold((0i128, 0u128), |(total, count), (value, occurrences)| {
            (
                total.saturating_add(i128::from(value).saturating_mul(i128::from(occurrences))),
                count.saturating_add(u128::from(occurrences)),
            )
        })
}

/// Weighted total: sum of `key * count` over every distribution
///
/// **Public** - e.g. total stack depth across all observed stacks
///
/// Saturates at the `i64` bounds.
pub fn dist_total<'a>(dists: impl IntoIterator<Item = &'a Distribution>) -> i64 {
    let (total, _) = sums(dists, false);
    i64::try_from(total).unwrap_or(if total < 0 { i64::MIN } else { i64::MAX })
}

/// Total occurrence count over every distribution, saturating at `u64::MAX`
pub fn dist_count<'a>(dists: impl IntoIterator<Item = &'a Distribution>) -> u64 {
    let (_, count) = sums(dists, false);
    u64::try_from(count).unwrap_or(u64::MAX)
}

/// Weighted mean over every distribution
///
/// **Public** - the one ratio helper that guards its denominator
///
/// # Arguments
/// * `dists` - Distributions to combine
/// * `drop_zero` - Exclude entries keyed `0` from both sums
///
/// # Returns
/// `dist_total / dist_count`, or `0.0` when nothing was counted
pub fn dist_average<'a>(dists: impl IntoIterator<Item = &'a Distribution>, drop_zero: bool) -> f64 {
    let (total, count) = sums(dists, drop_zero);
    if count == 0 {
        return 0.0;
    }
    total as f64 / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(entries: &[(i64, u64)]) -> Distribution {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_dist_total() {
        assert_eq!(dist_total([&dist(&[(2, 3), (5, 1)])]), 11);
        assert_eq!(dist_total([&dist(&[(2, 3)]), &dist(&[(5, 1)])]), 11);
        assert_eq!(dist_total(std::iter::empty()), 0);
    }

    #[test]
    fn test_dist_average() {
        assert_eq!(dist_average([&dist(&[(2, 3), (5, 1)])], false), 2.75);
        assert_eq!(dist_average([&dist(&[(0, 5), (2, 3)])], true), 2.0);
        assert_eq!(dist_average([&dist(&[(0, 5), (2, 3)])], false), 0.75);
    }

    #[test]
    fn test_dist_average_of_nothing_is_zero() {
        assert_eq!(dist_average(std::iter::empty(), false), 0.0);
        assert_eq!(dist_average([&Distribution::new()], false), 0.0);
        assert_eq!(dist_average([&dist(&[(0, 4)])], true), 0.0);
    }

    #[test]
    fn test_extreme_counts_do_not_overflow() {
        let d = dist(&[(i64::MAX, u64::MAX), (1, 1)]);
        assert_eq!(dist_total([&d]), i64::MAX);
        assert_eq!(dist_count([&d, &d]), u64::MAX);
        assert_eq!(dist_total([&dist(&[(i64::MIN, 2)])]), i64::MIN);

        let big = dist(&[(i64::MAX, 2)]);
        assert_eq!(dist_average([&big], false), i64::MAX as f64);
    }

    #[test]
    fn test_negative_keys() {
        let d = dist(&[(-1, 2), (0, 454), (1, 57)]);
        assert_eq!(dist_total([&d]), 55);
        assert_eq!(dist_count([&d]), 513);
    }
}
