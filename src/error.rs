// src/error.rs

//! Unified error handling for the bulletin crawler.

use std::fmt;

use thiserror::Error;

/// Result type alias for crawler operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Transport failure, non-success status, timeout, or a certificate
    /// failure that the insecure retry could not recover from.
    #[error("Connection failure for {url}: {message}")]
    ConnectionFailure { url: String, message: String },

    /// An element the source's selectors rely on is missing from the page.
    #[error("Page structure changed for {source_name}: {message}")]
    PageStructureChanged {
        source_name: String,
        message: String,
    },

    /// None of the configured date formats matched the extracted text.
    #[error("Could not parse date for {source_name} from {text:?}")]
    DateParseFailure { source_name: String, text: String },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a connection failure for the given URL.
    pub fn connection(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::ConnectionFailure {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a page structure error for a source.
    pub fn structure(source_name: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::PageStructureChanged {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    /// Create a date parse error for a source.
    pub fn date_parse(source_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::DateParseFailure {
            source_name: source_name.into(),
            text: text.into(),
        }
    }

    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether the error came from the network rather than from parsing.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Self::ConnectionFailure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_display() {
        let err = AppError::connection("http://example.com/a.pdf", "404 Not Found");
        assert_eq!(
            err.to_string(),
            "Connection failure for http://example.com/a.pdf: 404 Not Found"
        );
        assert!(err.is_connection_failure());
    }

    #[test]
    fn test_structure_is_not_connection() {
        let err = AppError::structure("Delhi", "td.standard not found");
        assert!(!err.is_connection_failure());
        assert!(err.to_string().contains("Delhi"));
    }
}
