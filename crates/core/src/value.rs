//! Option values and their kinds
//!
//! This module defines:
//! - `ValueKind`: the semantic kinds an option may accept
//! - `OptionValue`: a value tagged with the kind it was declared as
//!
//! ## Conversion Rules
//!
//! The wire form is chosen by the declared kind, never by inspecting the
//! value at runtime:
//!
//! | Kind | Wire form |
//! |------|-----------|
//! | Boolean | literal token `true` / `false` |
//! | String | JSON-quoted string |
//! | Sequence | JSON array, order preserved |
//! | Integer | passed through |
//! | Null | passed through |

use crate::wire::WireValue;
use serde_json::Value;
use std::fmt;

/// Semantic kind of an option value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `true` / `false`
    Boolean,
    /// UTF-8 string
    String,
    /// Ordered sequence of JSON values
    Sequence,
    /// Signed 64-bit integer
    Integer,
    /// Explicit absence
    Null,
}

impl ValueKind {
    /// Returns the kind name used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Boolean => "boolean",
            ValueKind::String => "string",
            ValueKind::Sequence => "sequence",
            ValueKind::Integer => "integer",
            ValueKind::Null => "null",
        }
    }

    /// Classify a JSON value
    ///
    /// Returns `None` for values no option accepts (floats, objects,
    /// integers outside the `i64` range).
    pub fn of(value: &Value) -> Option<ValueKind> {
        match value {
            Value::Null => Some(ValueKind::Null),
            Value::Bool(_) => Some(ValueKind::Boolean),
            Value::Number(n) if n.is_i64() => Some(ValueKind::Integer),
            Value::Number(_) => None,
            Value::String(_) => Some(ValueKind::String),
            Value::Array(_) => Some(ValueKind::Sequence),
            Value::Object(_) => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A value tagged with its declared kind
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// Boolean value
    Bool(bool),
    /// String value
    Str(String),
    /// Sequence value
    Seq(Vec<Value>),
    /// Integer value
    Int(i64),
    /// Explicit null
    Null,
}

impl OptionValue {
    /// Kind this value was declared as
    pub fn kind(&self) -> ValueKind {
        match self {
            OptionValue::Bool(_) => ValueKind::Boolean,
            OptionValue::Str(_) => ValueKind::String,
            OptionValue::Seq(_) => ValueKind::Sequence,
            OptionValue::Int(_) => ValueKind::Integer,
            OptionValue::Null => ValueKind::Null,
        }
    }

    /// Lift a JSON value whose kind has already been classified
    ///
    /// Returns `None` when the value does not have the given kind.
    pub fn from_json(kind: ValueKind, value: &Value) -> Option<OptionValue> {
        match (kind, value) {
            (ValueKind::Boolean, Value::Bool(b)) => Some(OptionValue::Bool(*b)),
            (ValueKind::String, Value::String(s)) => Some(OptionValue::Str(s.clone())),
            (ValueKind::Sequence, Value::Array(items)) => Some(OptionValue::Seq(items.clone())),
            (ValueKind::Integer, Value::Number(n)) => n.as_i64().map(OptionValue::Int),
            (ValueKind::Null, Value::Null) => Some(OptionValue::Null),
            _ => None,
        }
    }

    /// Encode for the wire
    pub fn to_wire(&self) -> Result<WireValue, serde_json::Error> {
        Ok(match self {
            OptionValue::Bool(true) => WireValue::Token("true".to_string()),
            OptionValue::Bool(false) => WireValue::Token("false".to_string()),
            OptionValue::Str(s) => WireValue::Token(serde_json::to_string(s)?),
            OptionValue::Seq(items) => WireValue::Token(serde_json::to_string(items)?),
            OptionValue::Int(i) => WireValue::Int(*i),
            OptionValue::Null => WireValue::Null,
        })
    }
}
