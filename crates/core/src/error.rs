//! Error types for query construction
//!
//! Every variant here is a local, synchronous failure raised before any
//! request leaves the process. We use `thiserror` for automatic `Display`
//! and `Error` trait implementations.
//!
//! Errors produced by a fetch capability (network, backend) are not part of
//! this enum: they keep the capability's own error type.

use thiserror::Error;

/// Result type alias for query construction
pub type Result<T> = std::result::Result<T, Error>;

/// Query construction errors
///
/// | Variant | Raised when |
/// |---------|-------------|
/// | `InvalidOption` | option name is not in the catalog |
/// | `InvalidOptionType` | value kind is not accepted by the option |
/// | `InvalidOptionValue` | value fails an option-specific constraint |
/// | `Conversion` | a valid value could not be encoded for the wire |
/// | `ConflictingOption` | a fixed option collides with one owned by the access path |
/// | `UnsupportedRange` | range bounds cannot be classified |
#[derive(Debug, Error)]
pub enum Error {
    /// Option name not in the catalog
    #[error("invalid option: {option}")]
    InvalidOption {
        /// Offending option name
        option: String,
    },

    /// Value kind not accepted for a known option
    #[error("option {option} not instance of expected type: {expected}")]
    InvalidOptionType {
        /// Offending option name
        option: String,
        /// Accepted kinds, e.g. `string | sequence`
        expected: String,
    },

    /// Value fails an option-specific constraint
    #[error("invalid value for option {option}: {value}")]
    InvalidOptionValue {
        /// Offending option name
        option: String,
        /// Rejected value as given
        value: String,
    },

    /// Wire encoding failed for an otherwise valid value
    #[error("error converting option {option}: {source}")]
    Conversion {
        /// Offending option name
        option: String,
        /// Underlying encoder failure
        #[source]
        source: serde_json::Error,
    },

    /// Option supplied both as a fixed option and by the access path
    #[error("conflicting option: {option} is owned by the request and cannot be fixed")]
    ConflictingOption {
        /// Option present in both places
        option: String,
    },

    /// Range bounds are of mismatched or unclassifiable kinds
    #[error("failed to interpret range {start}..{stop} as a key range or a positional window")]
    UnsupportedRange {
        /// Start bound, rendered
        start: String,
        /// Stop bound, rendered
        stop: String,
    },
}

impl Error {
    /// Name of the option this error refers to, if any
    pub fn option(&self) -> Option<&str> {
        match self {
            Error::InvalidOption { option }
            | Error::InvalidOptionType { option, .. }
            | Error::InvalidOptionValue { option, .. }
            | Error::Conversion { option, .. }
            | Error::ConflictingOption { option } => Some(option),
            Error::UnsupportedRange { .. } => None,
        }
    }
}
