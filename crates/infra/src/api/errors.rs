//! API-specific error types
//!
//! Classifies failed REST exchanges before they are handed to the core as
//! `ForceError`.

use std::time::Duration;

use forcelink_domain::ForceError;
use thiserror::Error;

/// Categories of API errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Authentication errors (401, 403)
    Authentication,
    /// Rate limiting errors (429)
    RateLimit,
    /// Server errors (5xx)
    Server,
    /// Client errors (4xx except auth)
    Client,
    /// Network/connection errors and timeouts
    Network,
    /// Response body did not parse
    Decode,
    /// Configuration errors
    Config,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

impl ApiError {
    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Auth(_) => ApiErrorCategory::Authentication,
            Self::RateLimit(_) => ApiErrorCategory::RateLimit,
            Self::Server(_) => ApiErrorCategory::Server,
            Self::Client(_) => ApiErrorCategory::Client,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Decode(_) => ApiErrorCategory::Decode,
            Self::Config(_) => ApiErrorCategory::Config,
        }
    }

    /// Whether the same request could succeed later without changes.
    ///
    /// The client never retries on its own; this is a hint for callers.
    pub fn is_transient(&self) -> bool {
        matches!(
            self.category(),
            ApiErrorCategory::RateLimit | ApiErrorCategory::Server | ApiErrorCategory::Network
        )
    }
}

impl From<ForceError> for ApiError {
    fn from(err: ForceError) -> Self {
        match err {
            ForceError::Auth(message) => Self::Auth(message),
            ForceError::RateLimit(message) => Self::RateLimit(message),
            ForceError::Server(message) => Self::Server(message),
            ForceError::Network(message) => Self::Network(message),
            ForceError::Decode(message) => Self::Decode(message),
            ForceError::Config(message) => Self::Config(message),
            other => Self::Client(other.to_string()),
        }
    }
}

impl From<ApiError> for ForceError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Auth(message) => Self::Auth(message),
            ApiError::RateLimit(message) => Self::RateLimit(message),
            ApiError::Server(message) => Self::Server(message),
            ApiError::Client(message) => Self::Client(message),
            ApiError::Network(message) => Self::Network(message),
            ApiError::Decode(message) => Self::Decode(message),
            ApiError::Config(message) => Self::Config(message),
            ApiError::Timeout(timeout) => Self::Network(format!("request timed out after {timeout:?}")),
        }
    }
}
