/// Structured error types for showcase-core.
///
/// Uses `thiserror` so the library exposes composable errors; the `showcase`
/// binary wraps them with `anyhow` context at command boundaries.

use std::io;
use thiserror::Error;

/// Message shown in place of the search view when a fetch fails.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch products";

/// Main error type for showcase-core operations
#[derive(Error, Debug)]
pub enum ShowcaseError {
    /// The product source rejected a query
    #[error("Failed to fetch products for query '{query}': {reason}")]
    FetchFailed { query: String, reason: String },

    /// Configuration is missing a value or holds an invalid one
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Config file is not valid TOML for the expected schema
    #[error("Failed to parse config file: {source}")]
    TomlParse {
        #[from]
        source: toml::de::Error,
    },

    /// Config could not be rendered back to TOML
    #[error("Failed to serialize config: {source}")]
    TomlSerialize {
        #[from]
        source: toml::ser::Error,
    },
}

/// Result type alias for showcase-core operations
pub type Result<T> = std::result::Result<T, ShowcaseError>;

impl ShowcaseError {
    /// Create a fetch failure for a query
    pub fn fetch_failed(query: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FetchFailed {
            query: query.into(),
            reason: reason.into(),
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Whether this error came from the product source
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Self::FetchFailed { .. })
    }
}
