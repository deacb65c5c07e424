//! Error types for mailbatch
//!
//! This module provides error handling for the library, including:
//! - Domain-specific error variants (auth, remote service, configuration)
//! - Conversions from transport-level errors (HTTP, serialization)
//! - A crate-wide `Result` alias

use thiserror::Error;

/// Result type alias for mailbatch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for mailbatch
///
/// This is the primary error type used throughout the library. Each variant includes
/// contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Authentication or token failure — fatal, aborts the run before any batch work
    #[error("authentication error: {0}")]
    Auth(String),

    /// A listMessages or getAttachments call failed on the remote service
    #[error("remote service error: {0}")]
    RemoteService(String),

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "max_parallelism")
        key: Option<String>,
    },

    /// HTTP transport error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid URL for the mail service endpoint
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Create a configuration error with an associated key.
    pub fn config(message: impl Into<String>, key: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// Whether this error is fatal before any batch work starts (auth/token failure).
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}
