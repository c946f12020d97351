//! Result pages

use serde::{Deserialize, Serialize};

/// A result row. Rows are opaque: the index never inspects them.
pub type Row = serde_json::Value;

/// One fetch response
///
/// A response without a `rows` field decodes as an empty page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Rows in backend order
    #[serde(default)]
    pub rows: Vec<Row>,
    /// Total rows in the underlying view, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_rows: Option<u64>,
    /// Offset of the first row, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

impl Page {
    /// Page holding just these rows
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            total_rows: None,
            offset: None,
        }
    }

    /// Number of rows in this page
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether this page has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
