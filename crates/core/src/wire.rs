//! Wire form of translated options
//!
//! A `WireOptions` is one page request: the option mapping handed to a fetch
//! capability. Entries are kept in name order so request construction is
//! deterministic.

use crate::options::QueryOption;
use std::collections::BTreeMap;
use std::fmt;

/// A single translated option value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireValue {
    /// Literal text placed on the wire as-is (`true`, `"2013"`, `["a",1]`)
    Token(String),
    /// Integer, left for the transport to render
    Int(i64),
    /// Explicit null; transports omit it from the request
    Null,
}

impl WireValue {
    /// Text for a query-string parameter, `None` for null
    pub fn as_query_value(&self) -> Option<String> {
        match self {
            WireValue::Token(s) => Some(s.clone()),
            WireValue::Int(i) => Some(i.to_string()),
            WireValue::Null => None,
        }
    }

    /// Returns the integer if this is an `Int`
    pub fn as_int(&self) -> Option<i64> {
        match self {
            WireValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the literal text if this is a `Token`
    pub fn as_token(&self) -> Option<&str> {
        match self {
            WireValue::Token(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireValue::Token(s) => write!(f, "{}", s),
            WireValue::Int(i) => write!(f, "{}", i),
            WireValue::Null => write!(f, "null"),
        }
    }
}

/// Translated option mapping for one fetch call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireOptions {
    entries: BTreeMap<&'static str, WireValue>,
}

impl WireOptions {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wire value of an option
    pub fn insert(&mut self, option: QueryOption, value: WireValue) {
        self.entries.insert(option.as_str(), value);
    }

    /// Look up an option by name
    pub fn get(&self, name: &str) -> Option<&WireValue> {
        self.entries.get(name)
    }

    /// Whether an option is present (null values count as present)
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &WireValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Query-string pairs, omitting null entries
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_query_value().map(|s| (*k, s)))
            .collect()
    }
}
