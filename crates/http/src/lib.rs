//! Blocking HTTP fetch capabilities for couchquery
//!
//! Connects indexes to a CouchDB-style server:
//! - Server: one `ureq` agent plus base URL and page size
//! - Database: `_all_docs` queries, design document listing, bulk fetch
//! - AllDocs / View: `Fetch` implementations for `Index`
//! - ClientConfig: `couchquery.toml` loading and validation
//!
//! Authentication and retries are not handled here; a failed request is
//! reported once as `HttpError::Transport`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod database;
pub mod error;

#[cfg(test)]
pub(crate) mod stub;

pub use client::{encode_segment, Server};
pub use config::{ClientConfig, CONFIG_FILE_NAME};
pub use database::{AllDocs, Database, View};
pub use error::{HttpError, HttpResult};
