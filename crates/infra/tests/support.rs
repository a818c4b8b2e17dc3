//! Shared helpers for infra integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use forcelink_core::SObjectService;
use forcelink_domain::{BatchLimits, ForceConfig};
use forcelink_infra::{connect, StaticTokenProvider};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "integration-token";

/// Global listing advertising `Account` and `Contact`.
pub fn sobjects_listing() -> Value {
    let entry = |name: &str| {
        let base = format!("/services/data/v45.0/sobjects/{name}");
        json!({
            "name": name,
            "label": name,
            "createable": true,
            "updateable": true,
            "deletable": true,
            "urls": {
                "sobject": base,
                "describe": format!("{base}/describe"),
                "rowTemplate": format!("{base}/{{ID}}")
            }
        })
    };
    json!({"encoding": "UTF-8", "maxBatchSize": 200, "sobjects": [entry("Account"), entry("Contact")]})
}

/// Mount the discovery endpoint on `server`; it must be hit exactly once.
pub async fn mount_discovery(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/services/data/v45.0/sobjects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sobjects_listing()))
        .expect(1)
        .mount(server)
        .await;
}

/// Service connected to `server` with a uniform batch size.
pub fn connect_to(server: &MockServer, batch_size: usize) -> SObjectService {
    let mut config = ForceConfig::new(server.uri());
    config.batch_limits = BatchLimits::uniform(batch_size);
    config.timeout_secs = 5;
    config.no_proxy = true;
    connect(&config, Arc::new(StaticTokenProvider::new(TOKEN))).expect("service should connect")
}
