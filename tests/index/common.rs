//! Shared fetch capabilities for the index suite.

#![allow(dead_code)]

use std::sync::{Mutex, Once};

use couchquery::{Error, Fetch, Page, Row, WireOptions};
use serde_json::json;

static INIT_TRACING: Once = Once::new();

/// Route `tracing` output through the test harness.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

/// `n` rows `{"id": "doc<i>", "key": i}`
pub fn rows(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| json!({"id": format!("doc{}", i), "key": i}))
        .collect()
}

/// Position keys of a row set
pub fn keys(rows: &[Row]) -> Vec<i64> {
    rows.iter().map(|r| r["key"].as_i64().unwrap()).collect()
}

// ============================================================================
// WindowView - serves skip/limit windows
// ============================================================================

/// Serves `skip`/`limit` windows over a fixed row set, like a real view.
pub struct WindowView {
    rows: Vec<Row>,
    requests: Mutex<Vec<WireOptions>>,
}

impl WindowView {
    pub fn new(n: usize) -> Self {
        Self {
            rows: rows(n),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<WireOptions> {
        self.requests.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Fetch for WindowView {
    type Error = Error;

    fn fetch(&self, request: &WireOptions) -> Result<Page, Error> {
        self.requests.lock().unwrap().push(request.clone());

        let int = |name: &str| request.get(name).and_then(|v| v.as_int());
        let skip = int("skip").unwrap_or(0).max(0) as usize;
        let limit = int("limit").map_or(usize::MAX, |l| l.max(0) as usize);

        Ok(Page::new(
            self.rows.iter().skip(skip).take(limit).cloned().collect(),
        ))
    }
}

// ============================================================================
// ScriptedView - serves pre-sized pages in call order
// ============================================================================

/// Answers the n-th request with a page of `script[n]` rows, then empty
/// pages. Row keys keep counting across pages.
pub struct ScriptedView {
    script: Vec<usize>,
    requests: Mutex<Vec<WireOptions>>,
}

impl ScriptedView {
    pub fn new(script: &[usize]) -> Self {
        Self {
            script: script.to_vec(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<WireOptions> {
        self.requests.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Fetch for ScriptedView {
    type Error = Error;

    fn fetch(&self, request: &WireOptions) -> Result<Page, Error> {
        let mut requests = self.requests.lock().unwrap();
        let call = requests.len();
        requests.push(request.clone());

        let first: usize = self.script.iter().take(call).sum();
        let size = self.script.get(call).copied().unwrap_or(0);
        let rows = (first..first + size)
            .map(|i| json!({"id": format!("doc{}", i), "key": i}))
            .collect();
        Ok(Page::new(rows))
    }
}
