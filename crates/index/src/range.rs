//! Range lookup classification
//!
//! A range lookup takes two optional bounds and means one of two things:
//!
//! | Bounds | Query | Options |
//! |--------|-------|---------|
//! | strings / sequences | key range | `startkey`, `endkey` |
//! | integers | positional window | `skip`, `limit` |
//!
//! Absent bounds fit either kind. Mixed kinds are rejected.

use couchquery_core::{Error, QueryOptions, RangeKey, Result};
use serde_json::Value;
use std::fmt;

/// One bound of a range lookup
#[derive(Debug, Clone, PartialEq)]
pub enum RangeBound {
    /// String key
    Str(String),
    /// Composite key
    Seq(Vec<Value>),
    /// Row position
    Int(i64),
}

impl RangeBound {
    fn as_key(&self) -> Option<RangeKey> {
        match self {
            RangeBound::Str(s) => Some(RangeKey::Str(s.clone())),
            RangeBound::Seq(items) => Some(RangeKey::Seq(items.clone())),
            RangeBound::Int(_) => None,
        }
    }

    fn as_position(&self) -> Option<i64> {
        match self {
            RangeBound::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for RangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeBound::Str(s) => write!(f, "{}", Value::String(s.clone())),
            RangeBound::Seq(items) => write!(f, "{}", Value::Array(items.clone())),
            RangeBound::Int(i) => write!(f, "{}", i),
        }
    }
}

impl From<&str> for RangeBound {
    fn from(s: &str) -> Self {
        RangeBound::Str(s.to_string())
    }
}

impl From<String> for RangeBound {
    fn from(s: String) -> Self {
        RangeBound::Str(s)
    }
}

impl From<Vec<Value>> for RangeBound {
    fn from(items: Vec<Value>) -> Self {
        RangeBound::Seq(items)
    }
}

impl From<Vec<&str>> for RangeBound {
    fn from(items: Vec<&str>) -> Self {
        RangeBound::Seq(items.into_iter().map(Value::from).collect())
    }
}

impl From<RangeKey> for RangeBound {
    fn from(key: RangeKey) -> Self {
        match key {
            RangeKey::Str(s) => RangeBound::Str(s),
            RangeKey::Seq(items) => RangeBound::Seq(items),
        }
    }
}

impl From<i64> for RangeBound {
    fn from(i: i64) -> Self {
        RangeBound::Int(i)
    }
}

impl From<i32> for RangeBound {
    fn from(i: i32) -> Self {
        RangeBound::Int(i as i64)
    }
}

/// A classified range lookup
#[derive(Debug, Clone, PartialEq)]
pub enum RangeQuery {
    /// Bounded by `startkey` / `endkey`
    Keys {
        /// Lower key, if any
        start: Option<RangeKey>,
        /// Upper key, if any
        stop: Option<RangeKey>,
    },
    /// Bounded by `skip` / `limit`
    Window {
        /// First row position, if any
        start: Option<i64>,
        /// End row position, if any
        stop: Option<i64>,
    },
}

impl RangeQuery {
    /// Classify a pair of bounds.
    ///
    /// Key range is tried first, so two absent bounds classify as an
    /// unbounded key range.
    pub fn classify(start: Option<&RangeBound>, stop: Option<&RangeBound>) -> Result<RangeQuery> {
        let key_like = |b: Option<&RangeBound>| b.map_or(true, |b| b.as_key().is_some());
        let positional = |b: Option<&RangeBound>| b.map_or(true, |b| b.as_position().is_some());

        if key_like(start) && key_like(stop) {
            return Ok(RangeQuery::Keys {
                start: start.and_then(RangeBound::as_key),
                stop: stop.and_then(RangeBound::as_key),
            });
        }
        if positional(start) && positional(stop) {
            return Ok(RangeQuery::Window {
                start: start.and_then(RangeBound::as_position),
                stop: stop.and_then(RangeBound::as_position),
            });
        }
        Err(Error::UnsupportedRange {
            start: render(start),
            stop: render(stop),
        })
    }

    /// Per-request options for this lookup.
    ///
    /// A stop-only window sends `limit = stop` and no `skip` at all, which
    /// is "the first `stop` rows".
    pub fn to_options(&self) -> QueryOptions {
        let mut options = QueryOptions::new();
        match self {
            RangeQuery::Keys { start, stop } => {
                options.startkey = start.clone();
                options.endkey = stop.clone();
            }
            RangeQuery::Window { start, stop } => match (*start, *stop) {
                (Some(start), Some(stop)) => {
                    // stop < start yields a negative limit; the backend decides
                    options = options.skip(start).limit(stop.saturating_sub(start));
                }
                (Some(start), None) => options = options.skip(start),
                (None, Some(stop)) => options = options.limit(stop),
                (None, None) => {}
            },
        }
        options
    }
}

fn render(bound: Option<&RangeBound>) -> String {
    bound
        .map(|b| b.to_string())
        .unwrap_or_else(|| "unbounded".to_string())
}
