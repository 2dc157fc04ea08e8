//! Error types for the apidex plugin.
//!
//! This module defines the centralized error type [`ApidexError`] and a type alias
//! [`Result`] used throughout the plugin. Errors on the main search path become a
//! visible error state; errors on the suggestion and category paths are logged and
//! replaced with empty sequences by their callers.

use thiserror::Error;

/// The main error type for apidex operations.
///
/// # Examples
///
/// ```
/// use apidex::ApidexError;
///
/// let err = ApidexError::Http { status: 503 };
/// assert_eq!(err.to_string(), "Backend returned HTTP 503");
/// ```
#[derive(Debug, Error)]
pub enum ApidexError {
    /// The backend answered with a non-success status code.
    #[error("Backend returned HTTP {status}")]
    Http {
        /// HTTP status code reported by the host.
        status: u16,
    },

    /// The response body was not valid JSON for the expected shape.
    #[error("Failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response decoded but violates the payload contract
    /// (e.g. a positive `count` without an `entries` array).
    #[error("Malformed backend payload: {0}")]
    Payload(String),

    /// A request URL could not be built from the configured backend.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// No response arrived before the request deadline.
    #[error("Request timed out after {seconds}s")]
    Timeout {
        /// Configured timeout that elapsed.
        seconds: u64,
    },

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for apidex operations.
pub type Result<T> = std::result::Result<T, ApidexError>;
