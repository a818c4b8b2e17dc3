//! Port interfaces for the remote REST API

use async_trait::async_trait;
use forcelink_domain::{ForceError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Query string parameters, in the order they should be sent.
pub type QueryParams = [(String, String)];

/// Authenticated JSON transport.
///
/// Paths are relative to the instance URL (e.g. `/services/data/v45.0/sobjects`).
/// Implementations surface network failures and non-2xx statuses as errors
/// and return `Value::Null` for empty bodies. No retries are expected here.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET and decode the JSON body.
    async fn get(&self, path: &str, params: &QueryParams) -> Result<Value>;

    /// Issue a POST with a JSON body.
    async fn post(&self, path: &str, params: &QueryParams, body: Value) -> Result<Value>;

    /// Issue a PATCH with a JSON body.
    async fn patch(&self, path: &str, params: &QueryParams, body: Value) -> Result<Value>;

    /// Issue a DELETE, discarding any body.
    async fn delete(&self, path: &str, params: &QueryParams) -> Result<()>;

    /// Issue a DELETE and decode the JSON body.
    async fn delete_with_response(&self, path: &str, params: &QueryParams) -> Result<Value>;
}

/// Serialize a request body for the transport.
pub(crate) fn encode<T: Serialize + ?Sized>(body: &T) -> Result<Value> {
    serde_json::to_value(body)
        .map_err(|e| ForceError::Internal(format!("Failed to serialize request body: {e}")))
}

/// Deserialize a transport response into `T`.
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| ForceError::Decode(format!("Failed to parse response: {e}")))
}
