//! Database handles and their fetch capabilities
//!
//! [`AllDocs`] and [`View`] implement [`Fetch`]: each call is one GET with the
//! translated options as query parameters. Wrap them in an [`Index`] for key,
//! range and paginated access:
//!
//! ```ignore
//! let db = server.database("orders");
//!
//! for row in db.index()?.iter()? {
//!     println!("{}", row?["id"]);
//! }
//!
//! let by_day = db.view("reports", "by_day").index()?;
//! let october = by_day.get_range(Some(vec!["2013", "10"].into()), Some(vec!["2013", "11"].into()))?;
//! ```

use couchquery_core::{QueryOptions, WireOptions};
use couchquery_index::{Fetch, Index, Page, Row};
use serde_json::Value;

use crate::client::{encode_segment, Server};
use crate::config::ClientConfig;
use crate::error::{HttpError, HttpResult};

/// Design documents sort between these two ids
const DESIGN_START: &str = "_design";
const DESIGN_END: &str = "_design0";

/// Handle to one database. Creating it makes no request.
#[derive(Debug, Clone)]
pub struct Database {
    server: Server,
    name: String,
    url: String,
    options: QueryOptions,
}

impl Database {
    pub(crate) fn new(server: Server, name: &str) -> Self {
        let url = format!("{}/{}", server.url(), encode_segment(name));
        Self {
            server,
            name: name.to_string(),
            url,
            options: QueryOptions::new(),
        }
    }

    /// Open the configured database: server, page size and fixed options
    /// all come from `config`.
    pub fn from_config(config: &ClientConfig) -> HttpResult<Self> {
        let name = config
            .database
            .as_deref()
            .ok_or_else(|| HttpError::config("no database configured"))?;
        let server = Server::from_config(config)?;
        Ok(server.database(name).with_options(config.query_options()?))
    }

    /// Fixed options for [`Database::index`].
    pub fn with_options(mut self, options: QueryOptions) -> Self {
        self.options = options;
        self
    }

    /// Database name as given
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Database URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether the database exists
    pub fn exists(&self) -> HttpResult<bool> {
        self.server.probe(&self.url)
    }

    /// Database info document
    pub fn metadata(&self) -> HttpResult<Value> {
        self.server.get_json(&self.url, &[])
    }

    /// Number of documents, as reported by the info document
    pub fn doc_count(&self) -> HttpResult<Option<u64>> {
        Ok(self.metadata()?.get("doc_count").and_then(Value::as_u64))
    }

    /// Fetch capability for this database's `_all_docs`
    pub fn all_docs_fetcher(&self) -> AllDocs {
        AllDocs {
            server: self.server.clone(),
            url: format!("{}/_all_docs", self.url),
        }
    }

    /// Query `_all_docs` directly and return the raw page.
    pub fn all_docs(&self, options: &QueryOptions) -> HttpResult<Page> {
        self.all_docs_fetcher().fetch(&options.translate()?)
    }

    /// Index over `_all_docs` with this database's fixed options.
    pub fn index(&self) -> HttpResult<Index<AllDocs>> {
        self.custom_index(self.options.clone())
    }

    /// Index over `_all_docs` with caller-chosen fixed options.
    pub fn custom_index(&self, options: QueryOptions) -> HttpResult<Index<AllDocs>> {
        let index = Index::with_options(self.all_docs_fetcher(), options)?
            .with_page_size(self.server.page_size())?;
        Ok(index)
    }

    /// Ids of every document, in one request.
    pub fn keys(&self) -> HttpResult<Vec<String>> {
        let page = self.all_docs(&QueryOptions::new())?;
        Ok(row_strings(&page.rows, "id"))
    }

    /// Design document rows, documents included.
    pub fn design_documents(&self) -> HttpResult<Vec<Row>> {
        let options = QueryOptions::new()
            .startkey(DESIGN_START)
            .endkey(DESIGN_END)
            .include_docs(true);
        Ok(self.all_docs(&options)?.rows)
    }

    /// Names (ids) of the design documents.
    pub fn list_design_documents(&self) -> HttpResult<Vec<String>> {
        let options = QueryOptions::new().startkey(DESIGN_START).endkey(DESIGN_END);
        Ok(row_strings(&self.all_docs(&options)?.rows, "key"))
    }

    /// Fetch specific documents by id through `_all_docs`.
    pub fn bulk_docs(&self, keys: &[&str]) -> HttpResult<Page> {
        let url = format!("{}/_all_docs", self.url);
        self.server
            .post_json(&url, &serde_json::json!({ "keys": keys }))
    }

    /// Fetch capability for a view of a design document.
    ///
    /// `design` may be given with or without the `_design/` prefix.
    pub fn view(&self, design: &str, name: &str) -> View {
        let design = design.strip_prefix("_design/").unwrap_or(design);
        View {
            server: self.server.clone(),
            url: format!(
                "{}/_design/{}/_view/{}",
                self.url,
                encode_segment(design),
                encode_segment(name)
            ),
        }
    }
}

fn row_strings(rows: &[Row], field: &str) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.get(field).and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

/// `GET /{db}/_all_docs` as a fetch capability
#[derive(Debug, Clone)]
pub struct AllDocs {
    server: Server,
    url: String,
}

impl AllDocs {
    /// Endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Fetch for AllDocs {
    type Error = HttpError;

    fn fetch(&self, request: &WireOptions) -> HttpResult<Page> {
        self.server.get_json(&self.url, &request.query_pairs())
    }
}

/// `GET /{db}/_design/{design}/_view/{name}` as a fetch capability
#[derive(Debug, Clone)]
pub struct View {
    server: Server,
    url: String,
}

impl View {
    /// Endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Query the view directly and return the raw page.
    pub fn query(&self, options: &QueryOptions) -> HttpResult<Page> {
        self.fetch(&options.translate()?)
    }

    /// Index over this view with no fixed options.
    pub fn index(self) -> HttpResult<Index<View>> {
        self.custom_index(QueryOptions::new())
    }

    /// Index over this view with fixed options.
    pub fn custom_index(self, options: QueryOptions) -> HttpResult<Index<View>> {
        let page_size = self.server.page_size();
        Ok(Index::with_options(self, options)?.with_page_size(page_size)?)
    }
}

impl Fetch for View {
    type Error = HttpError;

    fn fetch(&self, request: &WireOptions) -> HttpResult<Page> {
        self.server.get_json(&self.url, &request.query_pairs())
    }
}
