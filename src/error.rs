// src/error.rs

//! Unified error handling for the sitemap extractor.

use thiserror::Error;

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Failure while retrieving a sitemap document.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection, request or body-read failure
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("received non-success status code: {0}")]
    BadStatus(u16),

    /// Payload was flagged as gzip but could not be inflated
    #[error("error decompressing gzip payload: {0}")]
    DecompressFailed(#[source] std::io::Error),
}

/// Failure while interpreting a fetched document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Neither a sitemap index nor a URL set
    #[error("malformed sitemap XML: {0}")]
    Malformed(String),
}

impl ParseError {
    /// Create a malformed-document error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Sitemap fetch failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Sitemap document could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client could not be built
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
