//! The Index - key, range and paginated access over one view.
//!
//! An [`Index`] binds a fetch capability to a fixed set of query options.
//! It offers two access patterns:
//!
//! - **Lookups** ([`Index::get`], [`Index::get_range`]): one round trip,
//!   rows returned by value. Best for small slices.
//! - **Iteration** ([`Index::iter`]): pages through the whole result set with
//!   `skip`/`limit`, holding at most one page in memory.
//!
//! # Example
//!
//! ```ignore
//! use couchquery_index::Index;
//!
//! let index = Index::with_options(fetch, QueryOptions::new().include_docs(true))?
//!     .with_page_size(1000)?;
//!
//! let year = index.get_range(Some("2013".into()), Some("2014".into()))?;
//! let first = index.get_range(None, Some(200.into()))?;
//!
//! for row in index.iter()? {
//!     let row = row?;
//!     // ...
//! }
//! ```

use couchquery_core::{Error, Key, QueryOption, QueryOptions, WireOptions};

use crate::fetch::Fetch;
use crate::page::Row;
use crate::range::{RangeBound, RangeQuery};

/// Rows fetched per page during iteration unless overridden
pub const DEFAULT_PAGE_SIZE: u32 = 100;

const TARGET: &str = "couchquery::index";

/// Key, range and paginated access over a view-like result set.
///
/// The index is **read-only** after construction: lookups and iterations
/// never mutate it, so any number of them may run over the same index.
/// Each iteration keeps its own position.
#[derive(Debug, Clone)]
pub struct Index<F> {
    fetch: F,
    options: QueryOptions,
    page_size: u32,
}

impl<F: Fetch> Index<F> {
    /// Create an index with no fixed options.
    pub fn new(fetch: F) -> Self {
        Self {
            fetch,
            options: QueryOptions::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Create an index whose every request carries `options`.
    ///
    /// The options are translated once here so that an unencodable value
    /// fails before any request is made.
    pub fn with_options(fetch: F, options: QueryOptions) -> Result<Self, Error> {
        options.translate()?;
        Ok(Self {
            fetch,
            options,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Override the iteration page size.
    ///
    /// # Errors
    ///
    /// `InvalidOptionValue` if `page_size` is zero.
    pub fn with_page_size(mut self, page_size: u32) -> Result<Self, Error> {
        if page_size == 0 {
            return Err(Error::InvalidOptionValue {
                option: "page_size".to_string(),
                value: "0 (must be positive)".to_string(),
            });
        }
        self.page_size = page_size;
        Ok(self)
    }

    /// Fixed options sent with every request
    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Rows fetched per page during iteration
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// The underlying fetch capability
    pub fn fetcher(&self) -> &F {
        &self.fetch
    }

    /// All rows matching `key`, as returned by the backend.
    pub fn get(&self, key: impl Into<Key>) -> Result<Vec<Row>, F::Error> {
        let key = key.into();
        tracing::debug!(target: TARGET, key = %key, "key lookup");
        self.fetch_rows(&QueryOptions::new().key(key))
    }

    /// Rows between two bounds, in one round trip.
    ///
    /// String or composite bounds select a key range (`startkey`/`endkey`).
    /// Integer bounds select a positional window: `skip = start`,
    /// `limit = stop - start`; a stop-only window sends `limit = stop`.
    ///
    /// # Errors
    ///
    /// `UnsupportedRange` (converted into `F::Error`) when one bound is a
    /// key and the other a position. Nothing is fetched in that case.
    pub fn get_range(
        &self,
        start: Option<RangeBound>,
        stop: Option<RangeBound>,
    ) -> Result<Vec<Row>, F::Error> {
        let query = RangeQuery::classify(start.as_ref(), stop.as_ref())?;
        tracing::debug!(target: TARGET, query = ?query, "range lookup");
        self.fetch_rows(&query.to_options())
    }

    /// Lazily iterate over every row, one page at a time.
    ///
    /// Pages are requested with `limit = page_size` and an increasing
    /// `skip`, only when the previous page has been consumed. Iteration
    /// ends on the first page with no rows; a short page does not end it.
    /// Dropping the iterator stops further requests.
    ///
    /// # Errors
    ///
    /// `ConflictingOption` if `skip` or `limit` is among the fixed options.
    /// Raised here, before any request.
    pub fn iter(&self) -> Result<Rows<'_, F>, F::Error> {
        for reserved in [QueryOption::Skip, QueryOption::Limit] {
            if self.options.contains(reserved) {
                return Err(Error::ConflictingOption {
                    option: reserved.as_str().to_string(),
                }
                .into());
            }
        }
        Ok(Rows {
            index: self,
            buffer: Vec::new().into_iter(),
            skip: 0,
            done: false,
        })
    }

    fn request(&self, per_call: &QueryOptions) -> Result<WireOptions, Error> {
        self.options.merged(per_call)?.translate()
    }

    fn fetch_rows(&self, per_call: &QueryOptions) -> Result<Vec<Row>, F::Error> {
        let request = self.request(per_call)?;
        Ok(self.fetch.fetch(&request)?.rows)
    }
}

/// Iterator over every row of an [`Index`]. Created by [`Index::iter`].
///
/// Holds at most one page. After an error the iterator is exhausted.
pub struct Rows<'a, F> {
    index: &'a Index<F>,
    buffer: std::vec::IntoIter<Row>,
    skip: i64,
    done: bool,
}

impl<F: Fetch> Rows<'_, F> {
    fn next_page(&mut self) -> Result<Vec<Row>, F::Error> {
        let page_size = i64::from(self.index.page_size);
        tracing::debug!(target: TARGET, skip = self.skip, limit = page_size, "fetching page");

        let request = self
            .index
            .request(&QueryOptions::new().limit(page_size).skip(self.skip))?;
        let rows = self.index.fetch.fetch(&request)?.rows;
        self.skip += page_size;

        tracing::debug!(target: TARGET, rows = rows.len(), "page fetched");
        Ok(rows)
    }
}

impl<F: Fetch> Iterator for Rows<'_, F> {
    type Item = Result<Row, F::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(row) = self.buffer.next() {
                return Some(Ok(row));
            }
            if self.done {
                return None;
            }
            match self.next_page() {
                Ok(rows) if rows.is_empty() => {
                    self.done = true;
                    return None;
                }
                Ok(rows) => self.buffer = rows.into_iter(),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<F: Fetch> std::iter::FusedIterator for Rows<'_, F> {}
