//! Search page scraping

use crate::{ResultSet, SearchResponse};
use regex::Regex;
use std::sync::LazyLock;

static NAME: LazyLock<Regex> = LazyLock::new(|| compile(r#"__name">*(.*)</span>"#));
static VERSION: LazyLock<Regex> = LazyLock::new(|| compile(r#"__version">*(.*)</span>"#));
static DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| compile(r#"__description">*(.*)</p>"#));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("extraction patterns are valid")
}

/// Pulls package fields out of a search-results page
///
/// Each field is scanned independently over the raw markup. Captures stop at
/// the end of a line, and the three lists are not reconciled here.
pub struct ResultExtractor;

impl ResultExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract names, versions and descriptions in document order
    pub fn extract(&self, response: &SearchResponse) -> ResultSet {
        let body = response.body.as_str();
        let results = ResultSet {
            names: self.captures(&NAME, body),
            versions: self.captures(&VERSION, body),
            descriptions: self.captures(&DESCRIPTION, body),
        };

        tracing::debug!(
            names = results.names.len(),
            versions = results.versions.len(),
            descriptions = results.descriptions.len(),
            "extracted search results"
        );
        results
    }

    fn captures(&self, regex: &Regex, body: &str) -> Vec<String> {
        regex
            .captures_iter(body)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

impl Default for ResultExtractor {
    fn default() -> Self {
        Self::new()
    }
}
