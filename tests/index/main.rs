//! Index Layer Tests
//!
//! Tests for the couchquery facade over in-process fetch capabilities:
//! - Option translation through the public API
//! - Key and range lookups (request shape, fetch counts)
//! - Lazy paginated iteration
//! - Error propagation from the backend

mod common;

mod translation;
