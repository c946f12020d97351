//! Index access over view-like result sets
//!
//! This crate layers two access patterns over a fetch capability:
//! - Lookups: `get(key)` and `get_range(start, stop)`, one round trip each
//! - Iteration: `iter()`, a lazy page-by-page scan of the whole result set
//!
//! The fetch capability is injected by the caller (see [`Fetch`]). Every
//! request is validated and translated with `couchquery-core` before it is
//! handed over.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod fetch;
pub mod index;
pub mod page;
pub mod range;

#[cfg(test)]
pub(crate) mod mock;

pub use fetch::{fetch_fn, Fetch, FetchFn};
pub use index::{Index, Rows, DEFAULT_PAGE_SIZE};
pub use page::{Page, Row};
pub use range::{RangeBound, RangeQuery};
