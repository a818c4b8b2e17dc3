//! Shared test helpers for `forcelink-core` integration tests.
//!
//! `MockTransport` records every call and answers from a scripted queue,
//! falling back to an optional handler, so tests can assert on exactly
//! which requests a driver issued.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use forcelink_core::{QueryParams, SObjectService, SchemaRegistry, Transport};
use forcelink_domain::{
    BatchLimits, ForceError, Result as DomainResult, SObject, SObjectAttributes, SObjectMetaData,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const API_VERSION: &str = "v45.0";

/// One request seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RecordedCall {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    /// `records` array of the request body.
    pub fn records(&self) -> Vec<Value> {
        self.body
            .as_ref()
            .and_then(|b| b.get("records"))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }
}

type Handler = Box<dyn Fn(&RecordedCall) -> DomainResult<Value> + Send + Sync>;

/// In-memory `Transport` that records calls.
#[derive(Default)]
pub struct MockTransport {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<VecDeque<DomainResult<Value>>>,
    handler: Option<Handler>,
    delay: Option<Duration>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer calls in order with `responses`.
    pub fn with_responses(responses: impl IntoIterator<Item = DomainResult<Value>>) -> Self {
        Self { responses: Mutex::new(responses.into_iter().collect()), ..Self::default() }
    }

    /// Answer calls not covered by the queue with `handler`.
    pub fn with_handler(
        handler: impl Fn(&RecordedCall) -> DomainResult<Value> + Send + Sync + 'static,
    ) -> Self {
        Self { handler: Some(Box::new(handler)), ..Self::default() }
    }

    /// Sleep before answering, to make concurrent callers overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_with_method(&self, method: &str) -> Vec<RecordedCall> {
        self.calls().into_iter().filter(|c| c.method == method).collect()
    }

    async fn respond(
        &self,
        method: &'static str,
        path: &str,
        params: &QueryParams,
        body: Option<Value>,
    ) -> DomainResult<Value> {
        let call = RecordedCall { method, path: path.to_string(), params: params.to_vec(), body };
        self.calls.lock().unwrap().push(call.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(response) = self.responses.lock().unwrap().pop_front() {
            return response;
        }
        match &self.handler {
            Some(handler) => handler(&call),
            None => Ok(Value::Null),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str, params: &QueryParams) -> DomainResult<Value> {
        self.respond("GET", path, params, None).await
    }

    async fn post(&self, path: &str, params: &QueryParams, body: Value) -> DomainResult<Value> {
        self.respond("POST", path, params, Some(body)).await
    }

    async fn patch(&self, path: &str, params: &QueryParams, body: Value) -> DomainResult<Value> {
        self.respond("PATCH", path, params, Some(body)).await
    }

    async fn delete(&self, path: &str, params: &QueryParams) -> DomainResult<()> {
        self.respond("DELETE", path, params, None).await.map(|_| ())
    }

    async fn delete_with_response(&self, path: &str, params: &QueryParams) -> DomainResult<Value> {
        self.respond("DELETE", path, params, None).await
    }
}

/// Custom object used throughout the tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(default)]
    pub attributes: SObjectAttributes,
}

impl Widget {
    pub fn with_reference(reference_id: &str) -> Self {
        Self {
            id: None,
            name: format!("widget {reference_id}"),
            attributes: SObjectAttributes::with_reference_id("Widget__c", reference_id),
        }
    }
}

impl SObject for Widget {
    fn api_name(&self) -> &str {
        "Widget__c"
    }

    fn external_id_api_name(&self) -> &str {
        "Code__c"
    }
}

/// `count` widgets with reference ids `r0..r{count-1}`.
pub fn widgets(count: usize) -> Vec<Widget> {
    (0..count).map(|i| Widget::with_reference(&format!("r{i}"))).collect()
}

/// Registry preloaded with standard URLs for `types`.
pub fn preloaded_registry(transport: Arc<MockTransport>, types: &[&str]) -> Arc<SchemaRegistry> {
    let metadata = types.iter().map(|name| SObjectMetaData::with_standard_urls(*name, API_VERSION));
    Arc::new(SchemaRegistry::with_metadata(transport, API_VERSION, metadata))
}

/// Service over `transport` with a preloaded registry and uniform `batch_size`.
pub fn service(transport: &Arc<MockTransport>, types: &[&str], batch_size: usize) -> SObjectService {
    let registry = preloaded_registry(Arc::clone(transport), types);
    SObjectService::with_registry(Arc::clone(transport) as Arc<dyn Transport>, registry)
        .with_batch_limits(BatchLimits::uniform(batch_size))
        .expect("batch size within server ceiling")
}

/// Successful composite tree response echoing each submitted reference id.
pub fn echo_created(call: &RecordedCall) -> Value {
    let results: Vec<Value> = call
        .records()
        .iter()
        .map(|record| {
            let reference = record["attributes"]["referenceId"].as_str().unwrap_or_default();
            json!({"id": format!("id-{reference}"), "referenceId": reference})
        })
        .collect();
    json!({"hasErrors": false, "results": results})
}

/// Collection response where every record in `call` succeeded except `failed_ids`.
pub fn collection_response(ids: &[&str], failed_ids: &[&str]) -> Value {
    Value::Array(
        ids.iter()
            .map(|id| {
                if failed_ids.contains(id) {
                    json!({
                        "id": id,
                        "success": false,
                        "errors": [{"statusCode": "ENTITY_IS_DELETED", "message": "entity is deleted", "fields": []}]
                    })
                } else {
                    json!({"id": id, "success": true, "errors": []})
                }
            })
            .collect(),
    )
}

pub fn server_error(message: &str) -> ForceError {
    ForceError::Server(message.to_string())
}
