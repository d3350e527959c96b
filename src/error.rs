//! Error types for the Ranobe client.
//!
//! Uses `thiserror` for structured error definitions that provide
//! clear context about what went wrong.

use thiserror::Error;

/// Main error type for API operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure, including the request timeout
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Response body wasn't the JSON we expected
    #[error("Failed to decode API response: {0}")]
    Decode(#[source] serde_json::Error),

    /// Configured base URL couldn't be parsed
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Error type for session storage operations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Failed to read or write a token file
    #[error("Failed to access session storage: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse config file
    #[error("Failed to parse config: {0}")]
    ParseError(String),

    /// Invalid configuration value
    #[error("Invalid config value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Config directory not found
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Result type alias using anyhow for application-level error handling.
pub type Result<T> = anyhow::Result<T>;
