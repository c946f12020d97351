//! Client configuration via `couchquery.toml`
//!
//! The file names the server, an optional default database, the request
//! timeout, the iteration page size, and fixed query options applied to the
//! database's `_all_docs` index.

use couchquery_core::QueryOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{HttpError, HttpResult};

/// Config file name
pub const CONFIG_FILE_NAME: &str = "couchquery.toml";

fn default_url() -> String {
    "http://127.0.0.1:5984".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_page_size() -> u32 {
    couchquery_index::DEFAULT_PAGE_SIZE
}

/// Client configuration loaded from `couchquery.toml`.
///
/// # Example
///
/// ```toml
/// url = "http://127.0.0.1:5984"
/// database = "orders"
/// timeout_ms = 30000
/// page_size = 100
///
/// [options]
/// include_docs = true
/// startkey = ["2013", "10"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// Server base URL
    #[serde(default = "default_url")]
    pub url: String,
    /// Default database name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Request timeout in milliseconds (default: 30000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Rows per page when iterating (default: 100)
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Fixed query options, validated against the option catalog
    #[serde(default, skip_serializing_if = "toml::Table::is_empty")]
    pub options: toml::Table,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            database: None,
            timeout_ms: default_timeout_ms(),
            page_size: default_page_size(),
            options: toml::Table::new(),
        }
    }
}

impl ClientConfig {
    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Parse the `[options]` table through the option catalog.
    ///
    /// # Errors
    ///
    /// `HttpError::Query` with the catalog error for an unknown option,
    /// a value of the wrong kind, or an invalid `stale` value.
    pub fn query_options(&self) -> HttpResult<QueryOptions> {
        match serde_json::to_value(&self.options)? {
            serde_json::Value::Object(map) => Ok(QueryOptions::from_json(&map)?),
            other => Err(HttpError::config(format!(
                "[options] must be a table, got {}",
                other
            ))),
        }
    }

    /// Check every field, including the `[options]` table.
    pub fn validate(&self) -> HttpResult<()> {
        if self.url.trim().is_empty() {
            return Err(HttpError::config("url must not be empty"));
        }
        if self.page_size == 0 {
            return Err(HttpError::config("page_size must be positive"));
        }
        self.query_options()?;
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# couchquery client configuration
#
# Server base URL
url = "http://127.0.0.1:5984"

# Default database (optional)
# database = "mydb"

# Request timeout in milliseconds (default: 30000)
timeout_ms = 30000

# Rows fetched per page when iterating an index (default: 100)
page_size = 100

# Fixed query options for the database index.
# Names and value kinds follow the view query catalog; skip and limit
# cannot be used here if the index is iterated.
# [options]
# include_docs = true
# stale = "update_after"
"#
    }

    /// Read, parse and validate config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> HttpResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HttpError::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: ClientConfig = toml::from_str(&content).map_err(|e| {
            HttpError::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> HttpResult<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                HttpError::config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> HttpResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HttpError::config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            HttpError::config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
