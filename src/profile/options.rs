//! Option-mapping filters.
//!
//! A filter names the configuration flags a report cares about. A profile
//! matches when each named flag is present in its options with the same
//! value; flags the filter does not name are never looked at.

use super::Profile;
use crate::parser::{Record, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Wanted option values, flag name -> string value
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionFilter(BTreeMap<String, String>);

impl OptionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Subset-of-keys equality against an options record
    pub fn matches(&self, options: &Record) -> bool {
        self.0.iter().all(|(key, wanted)| match options.get(key) {
            Some(Value::Str(actual)) => actual == wanted,
            _ => false,
        })
    }
}

impl Extend<(String, String)> for OptionFilter {
    fn extend<I: IntoIterator<Item = (String, String)>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<(String, String)> for OptionFilter {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for OptionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        write!(f, "{}", pairs.join(", "))
    }
}

/// Does `profile` carry every option in `wanted`?
///
/// A flag missing from the profile's options is a non-match, not an error.
pub fn match_options(wanted: &OptionFilter, profile: &Profile) -> bool {
    wanted.matches(profile.options())
}
