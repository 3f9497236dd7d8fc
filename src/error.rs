//! Error types for the pypi-search library

use thiserror::Error;

/// Result type alias for pypi-search operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while searching the package index
#[derive(Debug, Error)]
pub enum SearchError {
    /// The query was missing or empty
    #[error("Usage error: {0}")]
    Usage(String),
    /// The query could not be put into a request
    #[error("Encoding error: {0}")]
    Encoding(String),
    /// Connecting to the index or reading its response failed
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The index answered but listed no packages
    #[error("Result not found")]
    EmptyResult,
    /// A companion field had fewer matches than the version field
    #[error("Integrity error: expected {expected} {field}, found {found}")]
    Integrity {
        field: &'static str,
        expected: usize,
        found: usize,
    },
}

impl SearchError {
    /// Process exit code the command line tool reports for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SearchError::Usage(_) | SearchError::Encoding(_) | SearchError::EmptyResult => 1,
            SearchError::Transport(_) | SearchError::Integrity { .. } => 2,
        }
    }
}
