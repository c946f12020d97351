//! Core types for couchquery
//!
//! This crate defines the option translator used by every access path:
//! - QueryOption: the fixed catalog of view query parameters
//! - QueryOptions: typed option set, one field per catalog entry
//! - Key / RangeKey: exact-match and range keys
//! - WireOptions / WireValue: translated request form
//! - Error: validation error hierarchy
//!
//! Translation is pure: nothing in this crate performs I/O.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod key;
pub mod options;
pub mod value;
pub mod wire;

pub use error::{Error, Result};
pub use key::{Key, RangeKey};
pub use options::{translate, QueryOption, QueryOptions, Stale};
pub use value::{OptionValue, ValueKind};
pub use wire::{WireOptions, WireValue};
