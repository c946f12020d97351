//! View key types
//!
//! View rows are ordered by key. A key is either a scalar or a composite
//! (an ordered sequence of JSON values, e.g. `["2013", "10"]`).
//!
//! - `Key` is what `key=` accepts: integer, string or sequence.
//! - `RangeKey` is what `startkey=` / `endkey=` accept: string or sequence.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Exact-match key for the `key` option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// Integer key, sent unquoted
    Int(i64),
    /// String key, sent JSON-quoted
    Str(String),
    /// Composite key, sent as a JSON array
    Seq(Vec<Value>),
}

/// Range bound key for the `startkey` / `endkey` options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeKey {
    /// String key, sent JSON-quoted
    Str(String),
    /// Composite key, sent as a JSON array
    Seq(Vec<Value>),
}

impl From<RangeKey> for Key {
    fn from(key: RangeKey) -> Self {
        match key {
            RangeKey::Str(s) => Key::Str(s),
            RangeKey::Seq(items) => Key::Seq(items),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => write!(f, "{}", Value::String(s.clone())),
            Key::Seq(items) => write!(f, "{}", Value::Array(items.clone())),
        }
    }
}

impl fmt::Display for RangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeKey::Str(s) => write!(f, "{}", Value::String(s.clone())),
            RangeKey::Seq(items) => write!(f, "{}", Value::Array(items.clone())),
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<&str> for RangeKey {
    fn from(s: &str) -> Self {
        RangeKey::Str(s.to_string())
    }
}

impl From<String> for RangeKey {
    fn from(s: String) -> Self {
        RangeKey::Str(s)
    }
}

impl From<Vec<Value>> for RangeKey {
    fn from(items: Vec<Value>) -> Self {
        RangeKey::Seq(items)
    }
}

impl From<Vec<&str>> for RangeKey {
    fn from(items: Vec<&str>) -> Self {
        RangeKey::Seq(items.into_iter().map(Value::from).collect())
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Int(i as i64)
    }
}

impl From<Vec<Value>> for Key {
    fn from(items: Vec<Value>) -> Self {
        Key::Seq(items)
    }
}

impl From<Vec<&str>> for Key {
    fn from(items: Vec<&str>) -> Self {
        Key::Seq(items.into_iter().map(Value::from).collect())
    }
}
