//! couchquery - paginated, key-ordered query access to CouchDB-style views
//!
//! A view is a server-side index whose rows are sorted by key. couchquery
//! wraps one view (or `_all_docs`) in an [`Index`] offering key lookups,
//! key or positional ranges, and lazy page-by-page iteration.
//!
//! # Quick Start
//!
//! ```ignore
//! use couchquery::{ClientConfig, Database, QueryOptions};
//!
//! let config = ClientConfig::from_file("couchquery.toml".as_ref())?;
//! let db = Database::from_config(&config)?;
//!
//! // One round trip per lookup
//! let rows = db.index()?.get("2013-10-01")?;
//!
//! // Every row, 100 at a time
//! for row in db.index()?.iter()? {
//!     println!("{}", row?["id"]);
//! }
//! ```
//!
//! # Architecture
//!
//! - `couchquery-core`: option catalog, typed options and wire translation
//! - `couchquery-index`: the `Fetch` seam, range classification, `Index`
//! - `couchquery-http`: blocking `ureq` client, databases, config file
//!
//! Any type implementing [`Fetch`] can back an index; the HTTP crate is one
//! such backend.

pub use couchquery_core::{
    translate, Error, Key, OptionValue, QueryOption, QueryOptions, RangeKey, Result, Stale,
    ValueKind, WireOptions, WireValue,
};
pub use couchquery_http::{
    encode_segment, AllDocs, ClientConfig, Database, HttpError, HttpResult, Server, View,
    CONFIG_FILE_NAME,
};
pub use couchquery_index::{
    fetch_fn, Fetch, FetchFn, Index, Page, RangeBound, RangeQuery, Row, Rows, DEFAULT_PAGE_SIZE,
};
