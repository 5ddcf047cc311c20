mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use event_booking::domain::entities::{CertificateFilter, CertificateStatus};

fn item_ids(json: &serde_json::Value) -> Vec<i64> {
    json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_list_certificates_scoped_by_event_and_status() {
    let ctx = common::create_test_context();
    let server = TestServer::new(common::admin_app(ctx.state)).unwrap();

    let response = server
        .get("/admin/certificates")
        .add_query_param("event_id", "7")
        .add_query_param("status", "sent")
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(item_ids(&json), vec![1, 5]);
    assert_eq!(json["pagination"]["total_items"], 2);
    assert_eq!(json["items"][0]["status"], "sent");

    let scopes = ctx.certificates.scopes.lock().unwrap();
    assert_eq!(
        scopes.as_slice(),
        &[CertificateFilter {
            event_id: Some(common::EVENT_ID),
            status: Some(CertificateStatus::Sent),
        }]
    );
}

#[tokio::test]
async fn test_all_status_with_search() {
    let ctx = common::create_test_context();
    let server = TestServer::new(common::admin_app(ctx.state)).unwrap();

    let response = server
        .get("/admin/certificates")
        .add_query_param("status", "all")
        .add_query_param("search", "KABIR")
        .await;

    response.assert_status_ok();
    assert_eq!(item_ids(&response.json::<serde_json::Value>()), vec![2]);
    assert_eq!(
        ctx.certificates.scopes.lock().unwrap().as_slice(),
        &[CertificateFilter::default()]
    );
}

#[tokio::test]
async fn test_sort_by_generated_date_desc() {
    let ctx = common::create_test_context();
    let server = TestServer::new(common::admin_app(ctx.state)).unwrap();

    let response = server
        .get("/admin/certificates")
        .add_query_param("event_id", "7")
        .add_query_param("sort", "generated_at")
        .add_query_param("order", "desc")
        .await;

    response.assert_status_ok();
    assert_eq!(
        item_ids(&response.json::<serde_json::Value>()),
        vec![5, 4, 2, 1]
    );
}

#[tokio::test]
async fn test_compact_viewport_columns() {
    let ctx = common::create_test_context();
    let server = TestServer::new(common::admin_app(ctx.state)).unwrap();

    let response = server
        .get("/admin/certificates")
        .add_query_param("viewport", "compact")
        .await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    let keys: Vec<&str> = json["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["event_title", "child_name", "status"]);
}

#[tokio::test]
async fn test_invalid_scope_is_rejected() {
    let ctx = common::create_test_context();
    let server = TestServer::new(common::admin_app(ctx.state)).unwrap();

    let response = server
        .get("/admin/certificates")
        .add_query_param("status", "archived")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "validation_error"
    );

    server
        .get("/admin/certificates")
        .add_query_param("event_id", "seven")
        .await
        .assert_status_bad_request();

    server
        .get("/admin/certificates")
        .add_query_param("venue", "stadium")
        .await
        .assert_status_bad_request();

    assert!(ctx.certificates.scopes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway() {
    let ctx = common::create_failing_certificates_context();
    let server = TestServer::new(common::admin_app(ctx.state)).unwrap();

    let response = server.get("/admin/certificates").await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "upstream_error"
    );
}

#[tokio::test]
async fn test_export_certificates_csv_neutralizes_formulas() {
    let ctx = common::create_test_context();
    let server = TestServer::new(common::admin_app(ctx.state)).unwrap();

    let response = server
        .get("/admin/certificates/export")
        .add_query_param("status", "failed")
        .add_query_param("hidden", "certificate_number,venue_name")
        .await;

    response.assert_status_ok();
    assert!(
        response
            .header("content-disposition")
            .to_str()
            .unwrap()
            .contains("certificates-")
    );

    let body = response.text();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Event,Recipient,Status,Generated Date,Parent Name,Email"));
    assert!(!lines[0].contains("Venue"));
    assert!(lines[1].starts_with(
        "Baby Olympics,Ishaan,failed,2026-12-06T10:04:00+00:00,'=Anil,anil@example.com"
    ));
}
