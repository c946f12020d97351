//! Query option catalog and translation
//!
//! The remote view API accepts a fixed set of query parameters. This module
//! models that catalog statically:
//!
//! - [`QueryOption`] names every parameter and declares the value kinds it
//!   accepts.
//! - [`QueryOptions`] holds one strongly-typed optional field per parameter.
//! - [`QueryOptions::translate`] encodes every set field into a
//!   [`WireOptions`] entry.
//! - [`translate`] is the untyped entry point: it validates a JSON object
//!   against the catalog first.
//!
//! # Example
//!
//! ```
//! use couchquery_core::{QueryOptions, Stale, WireValue};
//!
//! let wire = QueryOptions::new()
//!     .include_docs(true)
//!     .startkey("2013")
//!     .stale(Stale::Ok)
//!     .translate()
//!     .unwrap();
//!
//! assert_eq!(wire.get("include_docs"), Some(&WireValue::Token("true".into())));
//! assert_eq!(wire.get("startkey"), Some(&WireValue::Token("\"2013\"".into())));
//! ```

use crate::error::{Error, Result};
use crate::key::{Key, RangeKey};
use crate::value::{OptionValue, ValueKind};
use crate::wire::WireOptions;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Catalog
// ============================================================================

/// A named query parameter from the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QueryOption {
    /// `descending`
    Descending,
    /// `endkey`
    EndKey,
    /// `endkey_docid`
    EndKeyDocId,
    /// `group`
    Group,
    /// `group_level`
    GroupLevel,
    /// `include_docs`
    IncludeDocs,
    /// `inclusive_end`
    InclusiveEnd,
    /// `key`
    Key,
    /// `limit`, reserved by iteration
    Limit,
    /// `reduce`
    Reduce,
    /// `skip`, reserved by iteration
    Skip,
    /// `stale`
    Stale,
    /// `startkey`
    StartKey,
    /// `startkey_docid`
    StartKeyDocId,
}

const BOOLEAN: &[ValueKind] = &[ValueKind::Boolean];
const STRING: &[ValueKind] = &[ValueKind::String];
const KEY_RANGE: &[ValueKind] = &[ValueKind::String, ValueKind::Sequence];
const KEY_EXACT: &[ValueKind] = &[ValueKind::Integer, ValueKind::String, ValueKind::Sequence];
const COUNT: &[ValueKind] = &[ValueKind::Integer, ValueKind::Null];

impl QueryOption {
    /// Every catalog entry, in name order
    pub const ALL: [QueryOption; 14] = [
        QueryOption::Descending,
        QueryOption::EndKey,
        QueryOption::EndKeyDocId,
        QueryOption::Group,
        QueryOption::GroupLevel,
        QueryOption::IncludeDocs,
        QueryOption::InclusiveEnd,
        QueryOption::Key,
        QueryOption::Limit,
        QueryOption::Reduce,
        QueryOption::Skip,
        QueryOption::Stale,
        QueryOption::StartKey,
        QueryOption::StartKeyDocId,
    ];

    /// Wire name of the option
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryOption::Descending => "descending",
            QueryOption::EndKey => "endkey",
            QueryOption::EndKeyDocId => "endkey_docid",
            QueryOption::Group => "group",
            QueryOption::GroupLevel => "group_level",
            QueryOption::IncludeDocs => "include_docs",
            QueryOption::InclusiveEnd => "inclusive_end",
            QueryOption::Key => "key",
            QueryOption::Limit => "limit",
            QueryOption::Reduce => "reduce",
            QueryOption::Skip => "skip",
            QueryOption::Stale => "stale",
            QueryOption::StartKey => "startkey",
            QueryOption::StartKeyDocId => "startkey_docid",
        }
    }

    /// Look up a catalog entry by wire name
    pub fn from_name(name: &str) -> Option<QueryOption> {
        QueryOption::ALL.iter().copied().find(|o| o.as_str() == name)
    }

    /// Value kinds this option accepts
    pub fn accepted_kinds(&self) -> &'static [ValueKind] {
        match self {
            QueryOption::Descending
            | QueryOption::Group
            | QueryOption::IncludeDocs
            | QueryOption::InclusiveEnd
            | QueryOption::Reduce => BOOLEAN,
            QueryOption::EndKeyDocId
            | QueryOption::GroupLevel
            | QueryOption::Stale
            | QueryOption::StartKeyDocId => STRING,
            QueryOption::EndKey | QueryOption::StartKey => KEY_RANGE,
            QueryOption::Key => KEY_EXACT,
            QueryOption::Limit | QueryOption::Skip => COUNT,
        }
    }

    /// Whether this option accepts values of `kind`
    pub fn accepts(&self, kind: ValueKind) -> bool {
        self.accepted_kinds().contains(&kind)
    }

    /// Accepted kinds rendered for error messages, e.g. `string | sequence`
    pub fn expected(&self) -> String {
        self.accepted_kinds()
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl fmt::Display for QueryOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Allowed values of the `stale` option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stale {
    /// Serve the current index without updating it
    Ok,
    /// Serve the current index, update it afterwards
    UpdateAfter,
}

impl Stale {
    /// Wire text of the value
    pub fn as_str(&self) -> &'static str {
        match self {
            Stale::Ok => "ok",
            Stale::UpdateAfter => "update_after",
        }
    }
}

impl FromStr for Stale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ok" => Ok(Stale::Ok),
            "update_after" => Ok(Stale::UpdateAfter),
            other => Err(Error::InvalidOptionValue {
                option: QueryOption::Stale.as_str().to_string(),
                value: format!("{} (must be ok or update_after)", other),
            }),
        }
    }
}

// ============================================================================
// Typed options
// ============================================================================

/// Typed query options
///
/// Each field corresponds to one catalog entry. `None` means "not set";
/// `limit` and `skip` may additionally be set to an explicit null
/// (`Some(None)`), which still counts as present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    /// Return rows in descending key order
    pub descending: Option<bool>,
    /// Stop returning rows at this key
    pub endkey: Option<RangeKey>,
    /// Stop returning rows at this document id
    pub endkey_docid: Option<String>,
    /// Group reduce results
    pub group: Option<bool>,
    /// Group level for composite keys
    pub group_level: Option<String>,
    /// Include full documents in rows
    pub include_docs: Option<bool>,
    /// Include rows whose key equals `endkey`
    pub inclusive_end: Option<bool>,
    /// Only return rows matching this key
    pub key: Option<Key>,
    /// Maximum number of rows
    pub limit: Option<Option<i64>>,
    /// Run the reduce function
    pub reduce: Option<bool>,
    /// Number of rows to skip
    pub skip: Option<Option<i64>>,
    /// Index staleness policy
    pub stale: Option<Stale>,
    /// Start returning rows at this key
    pub startkey: Option<RangeKey>,
    /// Start returning rows at this document id
    pub startkey_docid: Option<String>,
}

impl QueryOptions {
    /// Create an empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `descending`
    pub fn descending(mut self, value: bool) -> Self {
        self.descending = Some(value);
        self
    }

    /// Set `endkey`
    pub fn endkey(mut self, value: impl Into<RangeKey>) -> Self {
        self.endkey = Some(value.into());
        self
    }

    /// Set `endkey_docid`
    pub fn endkey_docid(mut self, value: impl Into<String>) -> Self {
        self.endkey_docid = Some(value.into());
        self
    }

    /// Set `group`
    pub fn group(mut self, value: bool) -> Self {
        self.group = Some(value);
        self
    }

    /// Set `group_level`
    pub fn group_level(mut self, value: impl Into<String>) -> Self {
        self.group_level = Some(value.into());
        self
    }

    /// Set `include_docs`
    pub fn include_docs(mut self, value: bool) -> Self {
        self.include_docs = Some(value);
        self
    }

    /// Set `inclusive_end`
    pub fn inclusive_end(mut self, value: bool) -> Self {
        self.inclusive_end = Some(value);
        self
    }

    /// Set `key`
    pub fn key(mut self, value: impl Into<Key>) -> Self {
        self.key = Some(value.into());
        self
    }

    /// Set `limit`; pass `None` for an explicit null
    pub fn limit(mut self, value: impl Into<Option<i64>>) -> Self {
        self.limit = Some(value.into());
        self
    }

    /// Set `reduce`
    pub fn reduce(mut self, value: bool) -> Self {
        self.reduce = Some(value);
        self
    }

    /// Set `skip`; pass `None` for an explicit null
    pub fn skip(mut self, value: impl Into<Option<i64>>) -> Self {
        self.skip = Some(value.into());
        self
    }

    /// Set `stale`
    pub fn stale(mut self, value: Stale) -> Self {
        self.stale = Some(value);
        self
    }

    /// Set `startkey`
    pub fn startkey(mut self, value: impl Into<RangeKey>) -> Self {
        self.startkey = Some(value.into());
        self
    }

    /// Set `startkey_docid`
    pub fn startkey_docid(mut self, value: impl Into<String>) -> Self {
        self.startkey_docid = Some(value.into());
        self
    }

    /// Whether an option is set (an explicit null counts as set)
    pub fn contains(&self, option: QueryOption) -> bool {
        match option {
            QueryOption::Descending => self.descending.is_some(),
            QueryOption::EndKey => self.endkey.is_some(),
            QueryOption::EndKeyDocId => self.endkey_docid.is_some(),
            QueryOption::Group => self.group.is_some(),
            QueryOption::GroupLevel => self.group_level.is_some(),
            QueryOption::IncludeDocs => self.include_docs.is_some(),
            QueryOption::InclusiveEnd => self.inclusive_end.is_some(),
            QueryOption::Key => self.key.is_some(),
            QueryOption::Limit => self.limit.is_some(),
            QueryOption::Reduce => self.reduce.is_some(),
            QueryOption::Skip => self.skip.is_some(),
            QueryOption::Stale => self.stale.is_some(),
            QueryOption::StartKey => self.startkey.is_some(),
            QueryOption::StartKeyDocId => self.startkey_docid.is_some(),
        }
    }

    /// Number of set options
    pub fn len(&self) -> usize {
        QueryOption::ALL
            .iter()
            .filter(|o| self.contains(**o))
            .count()
    }

    /// Whether no option is set
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Set options with their declared-kind values, in catalog order
    pub fn entries(&self) -> Vec<(QueryOption, OptionValue)> {
        QueryOption::ALL
            .iter()
            .filter_map(|o| self.value_of(*o).map(|v| (*o, v)))
            .collect()
    }

    fn value_of(&self, option: QueryOption) -> Option<OptionValue> {
        match option {
            QueryOption::Descending => self.descending.map(OptionValue::Bool),
            QueryOption::EndKey => self.endkey.clone().map(range_key_value),
            QueryOption::EndKeyDocId => self.endkey_docid.clone().map(OptionValue::Str),
            QueryOption::Group => self.group.map(OptionValue::Bool),
            QueryOption::GroupLevel => self.group_level.clone().map(OptionValue::Str),
            QueryOption::IncludeDocs => self.include_docs.map(OptionValue::Bool),
            QueryOption::InclusiveEnd => self.inclusive_end.map(OptionValue::Bool),
            QueryOption::Key => self.key.clone().map(|k| match k {
                Key::Int(i) => OptionValue::Int(i),
                Key::Str(s) => OptionValue::Str(s),
                Key::Seq(items) => OptionValue::Seq(items),
            }),
            QueryOption::Limit => self.limit.map(count_value),
            QueryOption::Reduce => self.reduce.map(OptionValue::Bool),
            QueryOption::Skip => self.skip.map(count_value),
            QueryOption::Stale => self.stale.map(|s| OptionValue::Str(s.as_str().to_string())),
            QueryOption::StartKey => self.startkey.clone().map(range_key_value),
            QueryOption::StartKeyDocId => self.startkey_docid.clone().map(OptionValue::Str),
        }
    }

    /// Set an option from a declared-kind value
    ///
    /// Fails with `InvalidOptionType` when the option does not accept the
    /// value's kind, and `InvalidOptionValue` for an unknown `stale` value.
    pub fn set(&mut self, option: QueryOption, value: OptionValue) -> Result<()> {
        let mismatch = || Error::InvalidOptionType {
            option: option.as_str().to_string(),
            expected: option.expected(),
        };
        match (option, value) {
            (QueryOption::Descending, OptionValue::Bool(b)) => self.descending = Some(b),
            (QueryOption::Group, OptionValue::Bool(b)) => self.group = Some(b),
            (QueryOption::IncludeDocs, OptionValue::Bool(b)) => self.include_docs = Some(b),
            (QueryOption::InclusiveEnd, OptionValue::Bool(b)) => self.inclusive_end = Some(b),
            (QueryOption::Reduce, OptionValue::Bool(b)) => self.reduce = Some(b),
            (QueryOption::EndKeyDocId, OptionValue::Str(s)) => self.endkey_docid = Some(s),
            (QueryOption::StartKeyDocId, OptionValue::Str(s)) => self.startkey_docid = Some(s),
            (QueryOption::GroupLevel, OptionValue::Str(s)) => self.group_level = Some(s),
            (QueryOption::Stale, OptionValue::Str(s)) => self.stale = Some(s.parse()?),
            (QueryOption::EndKey, OptionValue::Str(s)) => self.endkey = Some(RangeKey::Str(s)),
            (QueryOption::EndKey, OptionValue::Seq(v)) => self.endkey = Some(RangeKey::Seq(v)),
            (QueryOption::StartKey, OptionValue::Str(s)) => self.startkey = Some(RangeKey::Str(s)),
            (QueryOption::StartKey, OptionValue::Seq(v)) => {
                self.startkey = Some(RangeKey::Seq(v))
            }
            (QueryOption::Key, OptionValue::Int(i)) => self.key = Some(Key::Int(i)),
            (QueryOption::Key, OptionValue::Str(s)) => self.key = Some(Key::Str(s)),
            (QueryOption::Key, OptionValue::Seq(v)) => self.key = Some(Key::Seq(v)),
            (QueryOption::Limit, OptionValue::Int(i)) => self.limit = Some(Some(i)),
            (QueryOption::Limit, OptionValue::Null) => self.limit = Some(None),
            (QueryOption::Skip, OptionValue::Int(i)) => self.skip = Some(Some(i)),
            (QueryOption::Skip, OptionValue::Null) => self.skip = Some(None),
            _ => return Err(mismatch()),
        }
        Ok(())
    }

    /// Validate an untyped option mapping against the catalog
    ///
    /// Checks, per entry and in this order: the name is in the catalog,
    /// the value kind is accepted, option-specific value constraints hold.
    pub fn from_json(options: &Map<String, Value>) -> Result<Self> {
        let mut result = QueryOptions::new();
        for (name, value) in options {
            let option = QueryOption::from_name(name).ok_or_else(|| Error::InvalidOption {
                option: name.clone(),
            })?;
            let typed = ValueKind::of(value)
                .filter(|kind| option.accepts(*kind))
                .and_then(|kind| OptionValue::from_json(kind, value))
                .ok_or_else(|| Error::InvalidOptionType {
                    option: name.clone(),
                    expected: option.expected(),
                })?;
            result.set(option, typed)?;
        }
        Ok(result)
    }

    /// Combine with per-request options
    ///
    /// Fails with `ConflictingOption` if any option in `request` is already
    /// set here.
    pub fn merged(&self, request: &QueryOptions) -> Result<QueryOptions> {
        let mut merged = self.clone();
        for (option, value) in request.entries() {
            if self.contains(option) {
                return Err(Error::ConflictingOption {
                    option: option.as_str().to_string(),
                });
            }
            merged.set(option, value)?;
        }
        Ok(merged)
    }

    /// Encode every set option for the wire
    ///
    /// The result has exactly one entry per set option.
    pub fn translate(&self) -> Result<WireOptions> {
        let mut wire = WireOptions::new();
        for (option, value) in self.entries() {
            let encoded = value.to_wire().map_err(|source| Error::Conversion {
                option: option.as_str().to_string(),
                source,
            })?;
            wire.insert(option, encoded);
        }
        Ok(wire)
    }
}

fn range_key_value(key: RangeKey) -> OptionValue {
    match key {
        RangeKey::Str(s) => OptionValue::Str(s),
        RangeKey::Seq(items) => OptionValue::Seq(items),
    }
}

fn count_value(count: Option<i64>) -> OptionValue {
    count.map(OptionValue::Int).unwrap_or(OptionValue::Null)
}

/// Validate and translate an untyped option mapping
pub fn translate(options: &Map<String, Value>) -> Result<WireOptions> {
    QueryOptions::from_json(options)?.translate()
}
