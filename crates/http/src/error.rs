//! Error types for the HTTP layer
//!
//! Validation errors from `couchquery-core` are carried as-is in
//! [`HttpError::Query`]; transport failures are never retried here.

use thiserror::Error;

/// Result type alias for HTTP operations
pub type HttpResult<T> = std::result::Result<T, HttpError>;

/// HTTP layer errors
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request rejected before it was sent
    #[error(transparent)]
    Query(#[from] couchquery_core::Error),

    /// Network failure or non-success status
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    /// Response body was not the expected JSON
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Request body could not be serialized
    #[error("invalid request body: {source}")]
    Encode {
        /// Underlying serializer failure
        #[source]
        source: serde_json::Error,
    },

    /// Invalid client configuration
    #[error("configuration error: {reason}")]
    Config {
        /// What was wrong
        reason: String,
    },
}

impl HttpError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        HttpError::Config {
            reason: reason.into(),
        }
    }

    /// HTTP status code, if the server answered with a non-success status
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Transport(ureq::Error::StatusCode(code)) => Some(*code),
            _ => None,
        }
    }
}
