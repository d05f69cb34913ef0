//! Typed values read from profile and static-stats dumps.
//!
//! Dumps are heterogeneous: counters are integers, timings may be floats,
//! option flags are the strings "true"/"false", and histograms are mappings
//! from a small integer to an occurrence count. `Value` is a closed union of
//! those shapes so accessors can say which one they expect.

use crate::utils::error::AccessError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

static EMPTY_DISTRIBUTION: Distribution = Distribution(BTreeMap::new());

/// A single value from a dump literal
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Dist(Distribution),
    Record(Record),
}

impl Value {
    /// Variant name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Dist(_) => "distribution",
            Value::Record(_) => "record",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Integers widen to floats; nothing else converts
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The empty mapping `{}` parses as a record, so it doubles as the
    /// empty distribution here.
    pub fn as_dist(&self) -> Option<&Distribution> {
        match self {
            Value::Dist(d) => Some(d),
            Value::Record(r) if r.is_empty() => Some(&EMPTY_DISTRIBUTION),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Dist(d) => write!(f, "{}", d),
            Value::Record(r) => write!(f, "{}", r),
        }
    }
}

/// Integer-keyed frequency distribution: value -> occurrence count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Distribution(BTreeMap<i64, u64>);

impl Distribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: i64) -> u64 {
        self.0.get(&key).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, u64)> + '_ {
        self.0.iter().map(|(k, c)| (*k, *c))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(i64, u64)> for Distribution {
    fn from_iter<I: IntoIterator<Item = (i64, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, c)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", k, c)?;
        }
        write!(f, "}}")
    }
}

/// String-keyed mapping, the top-level shape of every dump
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // Records are only built by the parser and the loaders.
    pub(crate) fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Look up a field that must be present
    pub fn require(&self, key: &str) -> Result<&Value, AccessError> {
        self.get(key)
            .ok_or_else(|| AccessError::MissingKey(key.to_string()))
    }

    pub fn get_int(&self, key: &str) -> Result<i64, AccessError> {
        let value = self.require(key)?;
        value.as_int().ok_or_else(|| mismatch(key, "int", value))
    }

    pub fn get_number(&self, key: &str) -> Result<f64, AccessError> {
        let value = self.require(key)?;
        value.as_number().ok_or_else(|| mismatch(key, "number", value))
    }

    pub fn get_str(&self, key: &str) -> Result<&str, AccessError> {
        let value = self.require(key)?;
        value.as_str().ok_or_else(|| mismatch(key, "string", value))
    }

    pub fn get_dist(&self, key: &str) -> Result<&Distribution, AccessError> {
        let value = self.require(key)?;
        value
            .as_dist()
            .ok_or_else(|| mismatch(key, "distribution", value))
    }

    pub fn get_record(&self, key: &str) -> Result<&Record, AccessError> {
        let value = self.require(key)?;
        value.as_record().ok_or_else(|| mismatch(key, "record", value))
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", k, v)?;
        }
        write!(f, "}}")
    }
}

fn mismatch(key: &str, expected: &'static str, found: &Value) -> AccessError {
    AccessError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: found.kind(),
    }
}
