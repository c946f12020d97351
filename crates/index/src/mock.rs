//! Mock fetch capabilities for deterministic testing

use std::cell::RefCell;

use couchquery_core::{Error, WireOptions};
use serde_json::json;

use crate::fetch::Fetch;
use crate::page::{Page, Row};

/// Serves `skip`/`limit` windows over an in-memory row set and records
/// every request it receives.
#[derive(Debug)]
pub struct MockView {
    rows: Vec<Row>,
    requests: RefCell<Vec<WireOptions>>,
}

impl MockView {
    /// A view of `n` rows `{"id": "doc<i>", "key": i}`
    pub fn with_rows(n: usize) -> Self {
        Self {
            rows: (0..n).map(|i| json!({"id": format!("doc{}", i), "key": i})).collect(),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<WireOptions> {
        self.requests.borrow().clone()
    }

    /// Number of requests received so far
    pub fn fetch_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Fetch for MockView {
    type Error = Error;

    fn fetch(&self, request: &WireOptions) -> Result<Page, Error> {
        self.requests.borrow_mut().push(request.clone());

        let skip = request
            .get("skip")
            .and_then(|v| v.as_int())
            .unwrap_or(0)
            .max(0) as usize;
        let limit = request
            .get("limit")
            .and_then(|v| v.as_int())
            .map(|l| l.max(0) as usize)
            .unwrap_or(usize::MAX);

        let rows = self.rows.iter().skip(skip).take(limit).cloned().collect();
        Ok(Page {
            rows,
            total_rows: Some(self.rows.len() as u64),
            offset: Some(skip as u64),
        })
    }
}
