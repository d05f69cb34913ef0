//! Generic grouping over record lists.
//!
//! Reports are reproducible only if grouping is deterministic, so every
//! grouping here returns groups sorted by key and keeps input order inside
//! each group.

use crate::parser::Value;
use crate::profile::{OptionFilter, Profile};
use crate::utils::error::AccessError;
use std::collections::BTreeMap;

/// Group items by key, groups sorted ascending by key
///
/// **Public** - main grouping primitive for reports
///
/// Within a group items keep their input order, so concatenating the groups
/// gives a stable sort of the input by key.
pub fn partition<T, K, F>(mut key_fn: F, items: impl IntoIterator<Item = T>) -> Vec<(K, Vec<T>)>
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    let mut parts: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for item in items {
        parts.entry(key_fn(&item)).or_default().push(item);
    }
    parts.into_iter().collect()
}

/// `partition` with a fallible key; the first failing key aborts
pub fn try_partition<T, K, E, F>(
    mut key_fn: F,
    items: impl IntoIterator<Item = T>,
) -> Result<Vec<(K, Vec<T>)>, E>
where
    K: Ord,
    F: FnMut(&T) -> Result<K, E>,
{
    let mut parts: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for item in items {
        parts.entry(key_fn(&item)?).or_default().push(item);
    }
    Ok(parts.into_iter().collect())
}

/// Split into (matching, non-matching), both in input order
pub fn bisect<T, F>(mut pred: F, items: impl IntoIterator<Item = T>) -> (Vec<T>, Vec<T>)
where
    F: FnMut(&T) -> bool,
{
    items.into_iter().partition(|item| pred(item))
}

/// Group profiles that ran with exactly the same option mapping
pub fn split_by_config<'a>(
    profiles: impl IntoIterator<Item = &'a Profile>,
) -> Vec<(OptionFilter, Vec<&'a Profile>)> {
    partition(|p: &&Profile| p.option_mapping(), profiles)
}

/// The same field from every profile
pub fn map_to_field<'a>(
    field: &str,
    profiles: impl IntoIterator<Item = &'a Profile>,
) -> Result<Vec<&'a Value>, AccessError> {
    profiles.into_iter().map(|p| p.get(field)).collect()
}

/// Several fields from one profile, in the order given
pub fn to_tuple<'a>(fields: &[&str], profile: &'a Profile) -> Result<Vec<&'a Value>, AccessError> {
    fields.iter().map(|f| profile.get(f)).collect()
}

pub fn map_to_tuples<'a>(
    fields: &[&str],
    profiles: impl IntoIterator<Item = &'a Profile>,
) -> Result<Vec<Vec<&'a Value>>, AccessError> {
    profiles.into_iter().map(|p| to_tuple(fields, p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partition_sorts_groups_and_keeps_order() {
        let words = vec!["pear", "fig", "apple", "kiwi", "plum", "date"];
        let groups = partition(|w: &&str| w.len(), words);

        assert_eq!(
            groups,
            vec![
                (3, vec!["fig"]),
                (4, vec!["pear", "kiwi", "plum", "date"]),
                (5, vec!["apple"]),
            ]
        );
    }

    #[test]
    fn test_partition_empty() {
        let groups = partition(|n: &i32| *n, Vec::<i32>::new());
        assert!(groups.is_empty());
    }

    #[test]
    fn test_try_partition_propagates() {
        let result = try_partition(
            |n: &i32| if *n < 0 { Err("negative") } else { Ok(n % 2) },
            vec![1, 2, -3],
        );
        assert_eq!(result, Err("negative"));

        let ok = try_partition(|n: &i32| Ok::<_, ()>(n % 2), vec![1, 2, 3]);
        assert_eq!(ok, Ok(vec![(0, vec![2]), (1, vec![1, 3])]));
    }

    #[test]
    fn test_bisect() {
        let (even, odd) = bisect(|n: &i32| n % 2 == 0, vec![5, 2, 8, 1, 4]);
        assert_eq!(even, vec![2, 8, 4]);
        assert_eq!(odd, vec![5, 1]);
    }
}
