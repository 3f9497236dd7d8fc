//! Search page retrieval

use crate::{Query, Result, SearchError, SearchResponse};
use reqwest::Url;
use std::num::NonZeroU64;
use std::time::Duration;

/// Index queried when no other base URL is configured
pub const DEFAULT_INDEX_URL: &str = "https://pypi.org";

/// Upper bound on the whole request, connect through body, in seconds
pub const DEFAULT_TIMEOUT_SECS: NonZeroU64 = match NonZeroU64::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS.get());

const USER_AGENT: &str = concat!("pypi-search/", env!("CARGO_PKG_VERSION"));

/// Fetches the raw search-results page from the index
#[derive(Debug, Clone)]
pub struct Fetcher {
    index_url: String,
    timeout: Duration,
}

impl Fetcher {
    pub fn new() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the fetcher at another index (a mirror or a local server)
    pub fn index_url(mut self, url: &str) -> Self {
        self.index_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the search URL, with the query percent-encoded into `q`
    pub fn search_url(&self, query: &Query) -> Result<Url> {
        let text = query.to_str()?;
        Url::parse_with_params(&format!("{}/search/", self.index_url), &[("q", text)])
            .map_err(|e| SearchError::Encoding(format!("cannot build search URL: {}", e)))
    }

    /// Issue one GET for the query and return the decoded body
    ///
    /// The client lives only for this call and keeps no idle connections, so
    /// the connection is released on return whether or not the request
    /// succeeded.
    pub async fn fetch(&self, query: &Query) -> Result<SearchResponse> {
        let url = self.search_url(query)?;
        tracing::debug!(%url, "fetching search results");

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .pool_max_idle_per_host(0)
            .build()?;

        let response = client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        tracing::debug!(bytes = bytes.len(), "received search page");

        // The page is read as UTF-8 whatever charset the server declares
        let body = String::from_utf8_lossy(&bytes).into_owned();
        Ok(SearchResponse { body })
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}
