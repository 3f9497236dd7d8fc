//! # pypi-search - Package Index Search Library
//!
//! Search pypi.org's website and flag packages already installed locally.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pypi_search::PypiSearch;
//! use std::num::NonZeroUsize;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let records = PypiSearch::query("requests")?
//!         .max_results(NonZeroUsize::new(3).unwrap())
//!         .search()
//!         .await?;
//!
//!     for record in &records {
//!         println!("{} {}", record.name, record.version);
//!     }
//!
//!     Ok(())
//! }
//! ```

use std::ffi::OsString;

pub mod error;
pub mod pypi;

pub use error::{Result, SearchError};

/// Main entry point for package searches
pub struct PypiSearch;

impl PypiSearch {
    /// Search the package index for the given query
    pub fn query(query: impl Into<OsString>) -> Result<pypi::IndexSearch> {
        Ok(pypi::IndexSearch::new(Query::new(query)?))
    }
}

/// Free-text search query, guaranteed non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(OsString);

impl Query {
    /// Wrap caller input, rejecting an empty query
    pub fn new(query: impl Into<OsString>) -> Result<Self> {
        let query = query.into();
        if query.is_empty() {
            return Err(SearchError::Usage("the search query must not be empty".to_string()));
        }
        Ok(Self(query))
    }

    /// The query as text, if it is valid Unicode
    pub fn to_str(&self) -> Result<&str> {
        self.0.to_str().ok_or_else(|| {
            SearchError::Encoding(format!(
                "query {} is not valid Unicode",
                self.0.to_string_lossy()
            ))
        })
    }
}

/// Decoded body of one search-results page
#[derive(Debug, Clone)]
pub struct SearchResponse {
    pub body: String,
}

/// Fields scraped from a search-results page, in document order
///
/// `versions` only ever matches real search hits, while `names` also picks up
/// unrelated markup. The number of versions is therefore the number of
/// genuine results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    pub names: Vec<String>,
    pub versions: Vec<String>,
    pub descriptions: Vec<String>,
}

impl ResultSet {
    /// Number of genuine results
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

/// One package line of the final listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    pub name: String,
    pub version: String,
    /// Whether the package is present in the local environment
    pub installed: bool,
    pub description: String,
}
