//! Shared HTTP client
//!
//! A [`Server`] owns one `ureq` agent (connection pool, global timeout) and
//! the server base URL. Databases, `_all_docs` and view fetchers all clone
//! the same server.

use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::database::Database;
use crate::error::{HttpError, HttpResult};

pub(crate) const TARGET: &str = "couchquery::http";

/// Connection to one document-store server.
#[derive(Clone)]
pub struct Server {
    base: String,
    agent: ureq::Agent,
    page_size: u32,
}

impl Server {
    /// Create a server handle with a global request timeout.
    ///
    /// `url` is the server base URL (e.g. "http://127.0.0.1:5984").
    pub fn new(url: &str, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self::with_agent(url, ureq::Agent::new_with_config(config))
    }

    /// Create a server handle around a preconfigured agent.
    pub fn with_agent(url: &str, agent: ureq::Agent) -> Self {
        Self {
            base: url.trim_end_matches('/').to_string(),
            agent,
            page_size: couchquery_index::DEFAULT_PAGE_SIZE,
        }
    }

    /// Create a server handle from a validated config.
    pub fn from_config(config: &ClientConfig) -> HttpResult<Self> {
        config.validate()?;
        Ok(Self::new(&config.url, config.timeout()).with_page_size(config.page_size))
    }

    /// Page size given to indexes created through this server.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Server base URL, without a trailing slash
    pub fn url(&self) -> &str {
        &self.base
    }

    /// Page size given to indexes created through this server
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Handle to a database on this server. No request is made.
    pub fn database(&self, name: &str) -> Database {
        Database::new(self.clone(), name)
    }

    /// GET `url` with query parameters and decode the JSON body.
    pub(crate) fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> HttpResult<T> {
        tracing::debug!(target: TARGET, url, params = ?params, "GET");

        let mut request = self.agent.get(url);
        for (key, value) in params {
            request = request.query(*key, value.as_str());
        }
        let response = request.call().map_err(|e| log_failure(url, e))?;
        read_json(url, response)
    }

    /// POST a JSON body to `url` and decode the JSON response.
    pub(crate) fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> HttpResult<T> {
        tracing::debug!(target: TARGET, url, "POST");

        let body_bytes =
            serde_json::to_vec(body).map_err(|source| HttpError::Encode { source })?;
        let response = self
            .agent
            .post(url)
            .header("Content-Type", "application/json")
            .send(&body_bytes[..])
            .map_err(|e| log_failure(url, e))?;
        read_json(url, response)
    }

    /// HEAD-style probe: whether `url` answers with 200.
    pub(crate) fn probe(&self, url: &str) -> HttpResult<bool> {
        match self.agent.get(url).call() {
            Ok(response) => Ok(response.status().as_u16() == 200),
            Err(ureq::Error::StatusCode(_)) => Ok(false),
            Err(e) => Err(log_failure(url, e)),
        }
    }
}

impl fmt::Debug for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Server")
            .field("base", &self.base)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

fn log_failure(url: &str, e: ureq::Error) -> HttpError {
    tracing::warn!(target: TARGET, url, error = %e, "request failed");
    HttpError::Transport(e)
}

fn read_json<T: DeserializeOwned>(
    url: &str,
    mut response: ureq::http::Response<ureq::Body>,
) -> HttpResult<T> {
    let text = response
        .body_mut()
        .read_to_string()
        .map_err(|e| log_failure(url, e))?;
    Ok(serde_json::from_str(&text)?)
}

/// Percent-encode one URL path segment.
///
/// Everything outside the unreserved set is escaped, so database names
/// containing `/` or `+` stay a single segment.
pub fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for b in segment.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}
