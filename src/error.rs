// src/error.rs

//! Unified error handling for the crawler.

use std::fmt;

use thiserror::Error;

/// Result type alias for crawler operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

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

    /// Invalid crawl configuration, raised before any work is submitted
    #[error("Configuration error: {0}")]
    Config(String),

    /// The crawl engine was driven from the wrong execution context
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// The page parser failed for a single URL
    #[error("Parse error for {url}: {message}")]
    Parse { url: String, message: String },
}

impl AppError {
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

    /// Create a runtime error.
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime(message.into())
    }

    /// Create a parse error for the given URL.
    pub fn parse(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Parse {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error was raised while validating configuration.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let err = AppError::parse("http://a", "connection reset");
        assert_eq!(err.to_string(), "Parse error for http://a: connection reset");
        assert!(!err.is_config());
    }

    #[test]
    fn test_runtime_error_is_not_config() {
        let err = AppError::runtime("nested runtime");
        assert_eq!(err.to_string(), "Runtime error: nested runtime");
        assert!(!err.is_config());
    }

    #[test]
    fn test_config_error_message() {
        let err = AppError::config("max_depth must be >= 0");
        assert!(err.is_config());
        assert_eq!(
            err.to_string(),
            "Configuration error: max_depth must be >= 0"
        );
    }
}
