//! pypi.org search pipeline: fetch, extract, present

use crate::{DisplayRecord, Query, Result};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

mod extraction;
mod fetch;
mod installed;
mod present;

pub use extraction::ResultExtractor;
pub use fetch::{DEFAULT_INDEX_URL, DEFAULT_TIMEOUT, DEFAULT_TIMEOUT_SECS, Fetcher};
pub use installed::{
    DEFAULT_PYTHON, InstalledSet, PackageInventory, PythonEnvironment, distributions_in,
};
pub use present::{INSTALLED_MARKER, Presenter, describe, render};

/// Number of results shown when no limit is given
pub const DEFAULT_MAX_RESULTS: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(n) => n,
    None => unreachable!(),
};

/// Builder for one search against the package index
pub struct IndexSearch {
    query: Query,
    max_results: NonZeroUsize,
    fetcher: Fetcher,
    inventory: Box<dyn PackageInventory + Send + Sync>,
}

impl IndexSearch {
    /// Create a new search for the given query
    pub fn new(query: Query) -> Self {
        Self {
            query,
            max_results: DEFAULT_MAX_RESULTS,
            fetcher: Fetcher::new(),
            inventory: Box::new(PythonEnvironment::new()),
        }
    }

    /// Limit the number of records returned
    pub fn max_results(mut self, max_results: NonZeroUsize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Search another index, e.g. a mirror
    pub fn index_url(mut self, url: &str) -> Self {
        self.fetcher = self.fetcher.index_url(url);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.fetcher = self.fetcher.timeout(timeout);
        self
    }

    /// Check installed packages against this Python interpreter
    pub fn python(mut self, python: impl Into<PathBuf>) -> Self {
        self.inventory = Box::new(PythonEnvironment::with_python(python));
        self
    }

    /// Use a custom source of installed package names
    pub fn inventory(mut self, inventory: impl PackageInventory + Send + Sync + 'static) -> Self {
        self.inventory = Box::new(inventory);
        self
    }

    /// Execute the search
    pub async fn search(self) -> Result<Vec<DisplayRecord>> {
        // 1. Fetch the results page
        let response = self.fetcher.fetch(&self.query).await?;

        // 2. Scrape fields; the page itself is no longer needed
        let results = ResultExtractor::new().extract(&response);
        drop(response);

        // 3. Bound and annotate
        Presenter::new(self.inventory.as_ref()).present(&results, self.max_results)
    }
}
