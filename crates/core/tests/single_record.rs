//! Single-record operations resolve their URIs through the registry.

mod support;

use std::sync::Arc;

use forcelink_domain::{DynamicSObject, ForceError};
use serde_json::json;
use support::{server_error, service, MockTransport, Widget};

const WIDGET_URI: &str = "/services/data/v45.0/sobjects/Widget__c";

#[tokio::test]
async fn get_uses_row_template_and_field_list() {
    let transport = Arc::new(MockTransport::with_responses([Ok(json!({
        "attributes": {"type": "Widget__c"},
        "Id": "a01A",
        "Name": "Sprocket"
    }))]));
    let svc = service(&transport, &["Widget__c"], 200);

    let mut widget = Widget::default();
    svc.get_sobject("a01A", &["Id", "Name"], &mut widget).await.unwrap();

    assert_eq!(widget.id.as_deref(), Some("a01A"));
    assert_eq!(widget.name, "Sprocket");

    let call = &transport.calls()[0];
    assert_eq!(call.method, "GET");
    assert_eq!(call.path, format!("{WIDGET_URI}/a01A"));
    assert_eq!(call.param("fields"), Some("Id,Name"));
}

#[tokio::test]
async fn insert_posts_to_sobject_url() {
    let transport =
        Arc::new(MockTransport::with_responses([Ok(json!({"id": "a01B", "success": true, "errors": []}))]));
    let svc = service(&transport, &["Widget__c"], 200);

    let response = svc.insert_sobject(&Widget::with_reference("r0")).await.unwrap();

    assert!(response.success);
    assert_eq!(response.id, "a01B");
    let call = &transport.calls()[0];
    assert_eq!(call.method, "POST");
    assert_eq!(call.path, WIDGET_URI);
    assert_eq!(call.body.as_ref().unwrap()["Name"], "widget r0");
}

#[tokio::test]
async fn update_and_delete_target_the_row() {
    let transport = Arc::new(MockTransport::new());
    let svc = service(&transport, &["Widget__c"], 200);

    let record = DynamicSObject::new("Widget__c").with_field("Name", json!("Renamed"));
    svc.update_sobject("a01C", &record).await.unwrap();
    svc.delete_sobject("a01C", &record).await.unwrap();

    let calls = transport.calls();
    assert_eq!(calls[0].method, "PATCH");
    assert_eq!(calls[0].path, format!("{WIDGET_URI}/a01C"));
    assert_eq!(calls[1].method, "DELETE");
    assert_eq!(calls[1].path, format!("{WIDGET_URI}/a01C"));
}

#[tokio::test]
async fn external_id_operations_use_the_external_field() {
    let transport = Arc::new(MockTransport::with_responses([
        Ok(json!({"id": "a01D", "success": true, "errors": [], "created": true})),
        Ok(serde_json::Value::Null),
        Ok(json!({"Id": "a01D", "Name": "By code"})),
        Ok(serde_json::Value::Null),
    ]));
    let svc = service(&transport, &["Widget__c"], 200);
    let widget = Widget::with_reference("r0");

    let created = svc.upsert_sobject_by_external_id("W-1", &widget).await.unwrap();
    assert_eq!(created.created, Some(true));

    let updated = svc.upsert_sobject_by_external_id("W-1", &widget).await.unwrap();
    assert!(updated.success);
    assert_eq!(updated.created, Some(false));

    let mut fetched = Widget::default();
    svc.get_sobject_by_external_id("W-1", &[], &mut fetched).await.unwrap();
    assert_eq!(fetched.name, "By code");

    svc.delete_sobject_by_external_id("W-1", &widget).await.unwrap();

    let calls = transport.calls();
    assert_eq!(calls.len(), 4);
    assert!(calls.iter().all(|c| c.path == format!("{WIDGET_URI}/Code__c/W-1")));
    assert!(calls[2].params.is_empty());
    assert_eq!(calls[3].method, "DELETE");
}

#[tokio::test]
async fn dynamic_records_default_to_the_id_field() {
    let transport = Arc::new(MockTransport::new());
    let svc = service(&transport, &["Account"], 200);

    svc.delete_sobject_by_external_id("001X", &DynamicSObject::new("Account")).await.unwrap();

    assert_eq!(transport.calls()[0].path, "/services/data/v45.0/sobjects/Account/Id/001X");
}

#[tokio::test]
async fn transport_errors_are_returned_unchanged() {
    let transport = Arc::new(MockTransport::with_responses([Err(server_error("500 oops"))]));
    let svc = service(&transport, &["Widget__c"], 200);

    let err = svc.delete_sobject("a01E", &Widget::default()).await.unwrap_err();
    assert_eq!(err, server_error("500 oops"));

    let err = svc.delete_sobject("a01E", &DynamicSObject::new("Ghost__c")).await.unwrap_err();
    assert_eq!(err, ForceError::TypeNotFound("Ghost__c".to_string()));
}
