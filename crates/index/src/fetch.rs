//! The fetch capability
//!
//! An [`Index`](crate::Index) never talks to the network itself. It hands a
//! translated [`WireOptions`] to a `Fetch` implementation and gets one
//! [`Page`] back.
//!
//! # Errors
//!
//! Validation failures raised while building a request are converted into
//! the capability's error type through `From<couchquery_core::Error>`.
//! Errors returned by `fetch` itself reach the caller unchanged.

use couchquery_core::{Error, WireOptions};

use crate::page::Page;

/// One remote request returning one page of rows.
///
/// Implementations own timeouts and transport concerns. The trait is
/// object-safe for a fixed error type.
pub trait Fetch {
    /// Error type surfaced by every index operation
    type Error: From<Error>;

    /// Execute one request with the given translated options.
    fn fetch(&self, request: &WireOptions) -> Result<Page, Self::Error>;
}

impl<T: Fetch + ?Sized> Fetch for &T {
    type Error = T::Error;

    fn fetch(&self, request: &WireOptions) -> Result<Page, Self::Error> {
        (**self).fetch(request)
    }
}

impl<T: Fetch + ?Sized> Fetch for Box<T> {
    type Error = T::Error;

    fn fetch(&self, request: &WireOptions) -> Result<Page, Self::Error> {
        (**self).fetch(request)
    }
}

/// A `Fetch` backed by a closure. Built with [`fetch_fn`].
#[derive(Clone)]
pub struct FetchFn<F> {
    f: F,
}

/// Wrap a closure as a fetch capability.
///
/// ```
/// use couchquery_core::Error;
/// use couchquery_index::{fetch_fn, Index, Page};
///
/// let index = Index::new(fetch_fn(|_request| Ok::<_, Error>(Page::default())));
/// assert!(index.get("2013").unwrap().is_empty());
/// ```
pub fn fetch_fn<F, E>(f: F) -> FetchFn<F>
where
    F: Fn(&WireOptions) -> Result<Page, E>,
    E: From<Error>,
{
    FetchFn { f }
}

impl<F, E> Fetch for FetchFn<F>
where
    F: Fn(&WireOptions) -> Result<Page, E>,
    E: From<Error>,
{
    type Error = E;

    fn fetch(&self, request: &WireOptions) -> Result<Page, E> {
        (self.f)(request)
    }
}

impl<F> std::fmt::Debug for FetchFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchFn").finish_non_exhaustive()
    }
}
