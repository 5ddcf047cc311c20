mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use event_booking::domain::entities::{BookingStatus, PaymentMethod, PaymentStatus};
use serde_json::json;
use std::sync::Mutex;

fn admin_booking(payment_method: &str) -> serde_json::Value {
    json!({
        "parent": common::parent_json(),
        "child": common::child_json(common::toddler_dob()),
        "event_id": 7,
        "slot_ids": [31, 60],
        "add_ons": [{ "add_on_id": 4, "quantity": 1 }],
        "payment_method": payment_method,
        "notes": "Paid at the venue desk"
    })
}

fn with_bookings() -> common::TestContext {
    common::create_context_with_bookings(common::FakeBookings {
        rows: Mutex::new(common::sample_bookings()),
        ..Default::default()
    })
}

fn item_ids(json: &serde_json::Value) -> Vec<i64> {
    json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_i64().unwrap())
        .collect()
}

fn column_keys(json: &serde_json::Value) -> Vec<String> {
    json["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["key"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_create_admin_booking_cash() {
    let mut ctx = common::create_test_context();
    let server = TestServer::new(common::admin_app(ctx.state.clone())).unwrap();

    let response = server
        .post("/admin/bookings")
        .json(&admin_booking("Cash payment"))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["booking_id"], common::ADMIN_BOOKING_ID);
    let reference = json["reference"].as_str().unwrap();
    assert!(reference.starts_with("MAN"));
    assert_eq!(reference.len(), 12);
    assert!(json["transaction_id"].as_str().unwrap().starts_with("MAN_TXN"));
    assert_eq!(json["quote"]["games_total"], 2300.0);
    assert_eq!(json["quote"]["total"], 2400.0);

    {
        let created = ctx.bookings.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].status, BookingStatus::Confirmed);
        assert_eq!(created[0].payment_method, PaymentMethod::Cash);
        assert_eq!(created[0].payment_status, PaymentStatus::Completed);
        assert_eq!(created[0].games.len(), 2);
        assert_eq!(created[0].add_ons[0].add_on_id, 4);

        let recorded = ctx.payments.recorded.lock().unwrap();
        assert_eq!(recorded[0].booking_id, common::ADMIN_BOOKING_ID);
        assert_eq!(recorded[0].amount, 2400.0);
        assert_eq!(recorded[0].notes.as_deref(), Some("Paid at the venue desk"));
    }

    let notification = ctx.notifications.try_recv().unwrap();
    assert_eq!(notification.booking_id, common::ADMIN_BOOKING_ID);
    assert_eq!(notification.booking_reference, reference);
    assert_eq!(notification.parent_email, "ravi@example.com");
    assert_eq!(notification.games, vec!["Baby Crawling", "Ball Throw"]);
    assert_eq!(notification.add_ons, vec!["Medal"]);
}

#[tokio::test]
async fn test_create_admin_booking_online_payment_pending() {
    let ctx = common::create_test_context();
    let server = TestServer::new(common::admin_app(ctx.state.clone())).unwrap();

    let mut body = admin_booking("Online");
    body.as_object_mut().unwrap().remove("notes");

    let response = server.post("/admin/bookings").json(&body).await;

    response.assert_status(StatusCode::CREATED);

    let created = ctx.bookings.created.lock().unwrap();
    assert_eq!(created[0].payment_status, PaymentStatus::Pending);

    let recorded = ctx.payments.recorded.lock().unwrap();
    assert_eq!(
        recorded[0].notes.as_deref(),
        Some("Manual booking - Online payment pending")
    );
}

#[tokio::test]
async fn test_create_admin_booking_requires_slots() {
    let ctx = common::create_test_context();
    let server = TestServer::new(common::admin_app(ctx.state.clone())).unwrap();

    let mut body = admin_booking("Cash payment");
    body["slot_ids"] = json!([]);

    let response = server.post("/admin/bookings").json(&body).await;

    response.assert_status_bad_request();
    assert!(ctx.bookings.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_bookings_default_page() {
    let ctx = with_bookings();
    let server = TestServer::new(common::admin_app(ctx.state)).unwrap();

    let response = server.get("/admin/bookings").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["pagination"]["page"], 1);
    assert_eq!(json["pagination"]["page_size"], 10);
    assert_eq!(json["pagination"]["total_items"], 4);
    assert_eq!(json["pagination"]["total_pages"], 1);
    assert_eq!(item_ids(&json), vec![1, 2, 3, 4]);
    assert!(!column_keys(&json).contains(&"id".to_string()));
}

#[tokio::test]
async fn test_list_bookings_search_is_case_insensitive() {
    let ctx = with_bookings();
    let server = TestServer::new(common::admin_app(ctx.state)).unwrap();

    let response = server
        .get("/admin/bookings")
        .add_query_param("search", "MEENA")
        .await;

    response.assert_status_ok();
    assert_eq!(item_ids(&response.json::<serde_json::Value>()), vec![2]);
}

#[tokio::test]
async fn test_list_bookings_column_filter() {
    let ctx = with_bookings();
    let server = TestServer::new(common::admin_app(ctx.state)).unwrap();

    let response = server
        .get("/admin/bookings")
        .add_query_param("filter.status", "confirmed")
        .await;

    response.assert_status_ok();
    assert_eq!(item_ids(&response.json::<serde_json::Value>()), vec![1, 4]);
}

#[tokio::test]
async fn test_list_bookings_sort_descending() {
    let ctx = with_bookings();
    let server = TestServer::new(common::admin_app(ctx.state)).unwrap();

    let response = server
        .get("/admin/bookings")
        .add_query_param("sort", "total_amount")
        .add_query_param("order", "desc")
        .await;

    response.assert_status_ok();
    assert_eq!(
        item_ids(&response.json::<serde_json::Value>()),
        vec![2, 1, 3, 4]
    );
}

#[tokio::test]
async fn test_list_bookings_pagination() {
    let ctx = with_bookings();
    let server = TestServer::new(common::admin_app(ctx.state)).unwrap();

    let response = server
        .get("/admin/bookings")
        .add_query_param("page", "2")
        .add_query_param("page_size", "3")
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["pagination"]["total_pages"], 2);
    assert_eq!(item_ids(&json), vec![4]);
}

#[tokio::test]
async fn test_list_bookings_compact_viewport_and_hidden_columns() {
    let ctx = with_bookings();
    let server = TestServer::new(common::admin_app(ctx.state)).unwrap();

    let response = server
        .get("/admin/bookings")
        .add_query_param("viewport", "compact")
        .await;
    response.assert_status_ok();
    assert_eq!(
        column_keys(&response.json::<serde_json::Value>()),
        vec!["reference", "parent_name", "event_title", "status"]
    );

    let response = server
        .get("/admin/bookings")
        .add_query_param("hidden", "parent_name,city")
        .await;
    response.assert_status_ok();
    let keys = column_keys(&response.json::<serde_json::Value>());
    assert!(!keys.contains(&"parent_name".to_string()));
    assert!(!keys.contains(&"city".to_string()));
    assert!(keys.contains(&"reference".to_string()));
}

#[tokio::test]
async fn test_list_bookings_rejects_unknown_columns() {
    let ctx = with_bookings();
    let server = TestServer::new(common::admin_app(ctx.state)).unwrap();

    server
        .get("/admin/bookings")
        .add_query_param("sort", "shoe_size")
        .await
        .assert_status_bad_request();

    server
        .get("/admin/bookings")
        .add_query_param("filter.shoe_size", "9")
        .await
        .assert_status_bad_request();

    server
        .get("/admin/bookings")
        .add_query_param("page_size", "500")
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_export_bookings_csv() {
    let ctx = with_bookings();
    let server = TestServer::new(common::admin_app(ctx.state)).unwrap();

    let response = server
        .get("/admin/bookings/export")
        .add_query_param("filter.status", "confirmed")
        .add_query_param("page_size", "1")
        .await;

    response.assert_status_ok();
    assert!(
        response
            .header("content-type")
            .to_str()
            .unwrap()
            .starts_with("text/csv")
    );
    assert!(
        response
            .header("content-disposition")
            .to_str()
            .unwrap()
            .contains("bookings-")
    );

    let body = response.text();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Booking Ref,Parent"));
    assert!(lines[1].starts_with("PPT261001001,Ravi Kumar"));
    assert!(lines[2].starts_with("MAN261004004,Kavya Reddy"));
}

#[tokio::test]
async fn test_bulk_status_update_reports_failures() {
    let ctx = common::create_context_with_bookings(common::FakeBookings {
        rows: Mutex::new(common::sample_bookings()),
        failing_ids: vec![3],
        ..Default::default()
    });
    let server = TestServer::new(common::admin_app(ctx.state.clone())).unwrap();

    let response = server
        .post("/admin/bookings/status")
        .json(&json!({ "booking_ids": [1, 3, 99], "status": "Cancelled" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "Cancelled");
    assert_eq!(json["updated"], json!([1]));

    let failed: Vec<&str> = json["failed"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["booking_id"].as_str().unwrap())
        .collect();
    assert!(failed.contains(&"3"));
    assert!(failed.contains(&"99"));

    let updates = ctx.bookings.status_updates.lock().unwrap();
    assert_eq!(*updates, vec![(1, BookingStatus::Cancelled)]);
}

#[tokio::test]
async fn test_bulk_status_requires_selection() {
    let ctx = with_bookings();
    let server = TestServer::new(common::admin_app(ctx.state)).unwrap();

    let response = server
        .post("/admin/bookings/status")
        .json(&json!({ "booking_ids": [], "status": "Confirmed" }))
        .await;

    response.assert_status_bad_request();
}
