//! Error types used throughout the client

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for ForceLink
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ForceError {
    /// Input rejected before any request was issued.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The requested SObject type is not present in the schema registry.
    #[error("SObject type not found: {0}")]
    TypeNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// Non-2xx response in the 5xx range.
    #[error("Server error: {0}")]
    Server(String),

    /// Non-2xx response in the 4xx range (other than auth and rate limit).
    #[error("Client error: {0}")]
    Client(String),

    /// Response body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A batch request failed as an HTTP exchange.
    #[error("{call} failed on batch {batch}: {source}")]
    BatchTransport { call: String, batch: usize, source: Box<ForceError> },

    /// The server reported per-record failures.
    #[error("{0}")]
    Batch(BatchFailure),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ForceError {
    /// Stable label suitable for structured log fields.
    pub fn category_label(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::TypeNotFound(_) => "type_not_found",
            Self::Config(_) => "config",
            Self::Network(_) => "network",
            Self::Auth(_) => "auth",
            Self::RateLimit(_) => "rate_limit",
            Self::Server(_) => "server",
            Self::Client(_) => "client",
            Self::Decode(_) => "decode",
            Self::BatchTransport { .. } => "batch_transport",
            Self::Batch(_) => "batch",
            Self::Internal(_) => "internal",
        }
    }

    /// True for errors raised before any request left the client.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::TypeNotFound(_))
    }

    /// Per-record failure detail, if this is a partial-result error.
    pub fn batch_failure(&self) -> Option<&BatchFailure> {
        match self {
            Self::Batch(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Result type alias for ForceLink operations
pub type Result<T> = std::result::Result<T, ForceError>;

/// Bulk operation kind, used to label aggregated failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchOperation {
    Insert,
    Update,
    Delete,
}

impl BatchOperation {
    /// Progressive verb used in error summaries ("creating", "updating", ...).
    pub fn verb(self) -> &'static str {
        match self {
            Self::Insert => "creating",
            Self::Update => "updating",
            Self::Delete => "deleting",
        }
    }
}

impl fmt::Display for BatchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert => f.write_str("insert"),
            Self::Update => f.write_str("update"),
            Self::Delete => f.write_str("delete"),
        }
    }
}

/// One error entry reported by the server for a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorEntry {
    pub status_code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

/// A single record that the server refused.
///
/// `key` is the record id for update/delete and the reference id for insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFailure {
    pub key: String,
    pub batch: usize,
    pub errors: Vec<ApiErrorEntry>,
}

impl RecordFailure {
    /// Status codes reported for this record, in server order.
    pub fn status_codes(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.status_code.as_str())
    }
}

/// Aggregated per-record failures of one bulk call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub operation: BatchOperation,
    /// Number of batches sent before the call returned.
    pub batches_attempted: usize,
    pub failures: Vec<RecordFailure>,
}

impl BatchFailure {
    pub fn new(operation: BatchOperation, batches_attempted: usize, failures: Vec<RecordFailure>) -> Self {
        Self { operation, batches_attempted, failures }
    }

    /// Ids (or reference ids) of every failed record, in report order.
    pub fn keys(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Flattened `(key, status code, message)` tuples.
    pub fn entries(&self) -> Vec<(&str, &str, &str)> {
        self.failures
            .iter()
            .flat_map(|f| {
                f.errors.iter().map(move |e| (f.key.as_str(), e.status_code.as_str(), e.message.as_str()))
            })
            .collect()
    }
}

impl fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.operation {
            BatchOperation::Insert => {
                write!(f, "error creating objects, refIDs: {}", self.keys().join(", "))
            }
            BatchOperation::Update | BatchOperation::Delete => {
                write!(f, "error {} objects: ", self.operation.verb())?;
                for (i, failure) in self.failures.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    let codes: Vec<&str> = failure.status_codes().collect();
                    write!(f, "{}: {}", failure.key, codes.join(", "))?;
                }
                Ok(())
            }
        }
    }
}
