//! End-to-end API tests against the in-memory store
//!
//! Covers PO entry round trips, field validation, live stock signs, empty
//! sheets, CSV export, catalog upload and the JSON fallbacks.

mod common;

use std::sync::Arc;

use axum::http::{header, Request, StatusCode};
use axum::body::Body;
use chrono::NaiveDateTime;
use inventory_tracker_backend::store::{MemoryStore, SharedStore};
use serde_json::json;
use shared::{SheetKind, TIMESTAMP_FORMAT};

use common::{app_with, get, post_json, post_raw, respond, send, send_raw};

fn memory_app() -> (Arc<MemoryStore>, axum::Router) {
    let memory = Arc::new(MemoryStore::new());
    let store: SharedStore = memory.clone();
    (memory, app_with(store))
}

// ============================================================================
// Purchase Orders
// ============================================================================

#[tokio::test]
async fn test_po_entry_round_trip() {
    let (_, app) = memory_app();

    let (status, body) = send(
        &app,
        post_json(
            "/api/po-entry",
            &json!({"itemName": "Bolt M6", "quantity": "10", "unit": "Kg", "customerName": "Acme"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["itemName"], "Bolt M6");
    assert_eq!(body["quantity"].as_f64(), Some(10.0));
    assert_eq!(body["customerName"], "Acme");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).is_ok());

    let (status, entries) = send(&app, get("/api/po-entries")).await;
    assert_eq!(status, StatusCode::OK);
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["itemName"], "Bolt M6");
    assert_eq!(entries[0]["unit"], "Kg");
    assert_eq!(entries[0]["quantity"].as_f64(), Some(10.0));

    let (_, history) = send(&app, get("/api/transaction-history")).await;
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["type"], "PO");
    assert_eq!(history[0]["itemName"], "Bolt M6");
    assert_eq!(history[0]["customerName"], "Acme");
    assert_eq!(history[0]["timestamp"], timestamp);
}

#[tokio::test]
async fn test_po_missing_customer_writes_nothing() {
    let (memory, app) = memory_app();

    let (status, body) = send(
        &app,
        post_json(
            "/api/po-entry",
            &json!({"itemName": "Bolt M6", "quantity": 10, "unit": "Kg"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "customerName is required"}));

    for sheet in SheetKind::ALL {
        assert_eq!(memory.data_row_count(sheet).await, 0);
    }
}

#[tokio::test]
async fn test_po_fields_checked_in_order() {
    let (_, app) = memory_app();

    let cases = [
        (json!({}), "itemName is required"),
        (json!({"itemName": "", "quantity": 1}), "itemName is required"),
        (json!({"itemName": "Nut", "quantity": 0, "unit": "Pcs"}), "quantity is required"),
        (json!({"itemName": "Nut", "quantity": "5", "unit": null}), "unit is required"),
        (
            json!({"itemName": "Nut", "quantity": "5", "unit": "Pcs", "customerName": false}),
            "customerName is required",
        ),
        (
            json!({"itemName": "Nut", "quantity": "lots", "unit": "Pcs", "customerName": "Acme"}),
            "Invalid quantity value",
        ),
    ];

    for (payload, message) in cases {
        let (status, body) = send(&app, post_json("/api/po-entry", &payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
        assert_eq!(body["error"], message, "payload {}", payload);
    }
}

#[tokio::test]
async fn test_po_summary_groups_by_customer() {
    let (_, app) = memory_app();

    for (item, qty, customer) in [("Bolt", 2, "Acme"), ("Bolt", 3, "Acme"), ("Bolt", 4, "Beta"), ("Nut", 1, "Acme")] {
        let (status, _) = send(
            &app,
            post_json(
                "/api/po-entry",
                &json!({"itemName": item, "quantity": qty, "unit": "Pcs", "customerName": customer}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, summary) = send(&app, get("/api/po-summary")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["totalEntries"], 4);
    assert_eq!(summary["uniqueItems"], 2);

    let groups = summary["itemQuantities"].as_array().unwrap();
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0]["customerName"], "Acme");
    assert_eq!(groups[0]["quantity"].as_f64(), Some(5.0));
    assert_eq!(groups[1]["customerName"], "Beta");
    assert_eq!(groups[2]["itemName"], "Nut");
}

// ============================================================================
// Inward and Live Stock
// ============================================================================

#[tokio::test]
async fn test_push_data_mirrors_history() {
    let (memory, app) = memory_app();

    let (status, body) = send(
        &app,
        post_json(
            "/push-data",
            &json!([
                {"fullText": "Bolt M6", "quantity": "5", "unit": "Kg"},
                {"fullText": "Nut M6", "quantity": 12, "unit": "Pcs"}
            ]),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "success"}));
    assert_eq!(memory.data_row_count(SheetKind::Inward).await, 2);

    let (_, history) = send(&app, get("/api/transaction-history")).await;
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|r| r["type"] == "Inward" && r["customerName"] == ""));
    assert_eq!(history[0]["timestamp"], history[1]["timestamp"]);
}

async fn stock_after(inward: i64, po: Option<i64>) -> serde_json::Value {
    let (_, app) = memory_app();

    send(
        &app,
        post_json("/push-data", &json!([{"fullText": "X", "quantity": inward, "unit": "Kg"}])),
    )
    .await;
    if let Some(po) = po {
        send(
            &app,
            post_json(
                "/api/po-entry",
                &json!({"itemName": "X", "quantity": po, "unit": "Kg", "customerName": "Acme"}),
            ),
        )
        .await;
    }

    let (status, rows) = send(&app, get("/api/live-stock")).await;
    assert_eq!(status, StatusCode::OK);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    rows[0].clone()
}

#[tokio::test]
async fn test_live_stock_status() {
    let oversold = stock_after(5, Some(8)).await;
    assert_eq!(oversold["liveStock"].as_f64(), Some(-3.0));
    assert_eq!(oversold["status"], "Oversold");

    let in_stock = stock_after(5, None).await;
    assert_eq!(in_stock["liveStock"].as_f64(), Some(5.0));
    assert_eq!(in_stock["poQuantity"].as_f64(), Some(0.0));
    assert_eq!(in_stock["status"], "In Stock");

    let out = stock_after(5, Some(5)).await;
    assert_eq!(out["liveStock"].as_f64(), Some(0.0));
    assert_eq!(out["status"], "Out of Stock");
}

#[tokio::test]
async fn test_empty_sheets_give_empty_reports() {
    let (_, app) = memory_app();

    for uri in ["/api/po-entries", "/api/transaction-history", "/api/live-stock"] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body, json!([]), "{}", uri);
    }

    let (status, summary) = send(&app, get("/api/po-summary")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        summary,
        json!({"totalEntries": 0, "uniqueItems": 0, "itemQuantities": []})
    );
}

#[tokio::test]
async fn test_live_stock_csv_export() {
    let (_, app) = memory_app();
    send(
        &app,
        post_json("/push-data", &json!([{"fullText": "Bolt", "quantity": 5, "unit": "Kg"}])),
    )
    .await;

    let response = respond(&app, get("/api/live-stock?format=csv")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("live_stock.csv"));

    let (_, bytes) = send_raw(&app, get("/api/live-stock?format=csv")).await;
    let text = String::from_utf8(bytes).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("itemName,unit,inwardQuantity,poQuantity,liveStock,status")
    );
    assert!(lines.next().unwrap().ends_with("In Stock"));
}

#[tokio::test]
async fn test_totals_beyond_decimal_range_are_500() {
    let (_, app) = memory_app();
    let huge = "50000000000000000000000000000";

    let (status, _) = send(
        &app,
        post_json(
            "/push-data",
            &json!([
                {"fullText": "X", "quantity": huge, "unit": "Kg"},
                {"fullText": "X", "quantity": huge, "unit": "Kg"}
            ]),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, get("/api/live-stock")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal server error"}));

    for _ in 0..2 {
        send(
            &app,
            post_json(
                "/api/po-entry",
                &json!({"itemName": "X", "quantity": huge, "unit": "Kg", "customerName": "Acme"}),
            ),
        )
        .await;
    }
    let (status, body) = send(&app, get("/api/po-summary")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal server error"}));
}

#[tokio::test]
async fn test_out_of_range_quantity_is_rejected() {
    let (memory, app) = memory_app();

    let (status, body) = send(
        &app,
        post_json("/push-data", &json!([{"fullText": "Y", "quantity": "1e30", "unit": "Kg"}])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"status": "error", "message": "Invalid request body"}));
    assert_eq!(memory.data_row_count(SheetKind::Inward).await, 0);

    let (status, body) = send(
        &app,
        post_json(
            "/api/po-entry",
            &json!({"itemName": "Y", "quantity": "1e30", "unit": "Kg", "customerName": "Acme"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Quantity out of range"}));
    assert_eq!(memory.data_row_count(SheetKind::Po).await, 0);
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn test_catalog_upload() {
    let (_, app) = memory_app();
    let boundary = "XBOUNDARYX";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"items.csv\"\r\n\
         Content-Type: text/csv\r\n\r\ncode,Item\r\nB6,Bolt M6\r\nN6,Nut M6\r\n\r\n--{b}--\r\n",
        b = boundary
    );
    let request = Request::builder()
        .method("POST")
        .uri("/api/catalog/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();

    let (status, items) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["fullText"], "Bolt M6");
    assert_eq!(items[1]["fullText"], "Nut M6");
    assert!(items[0]["id"].as_str().is_some());
}

fn multipart_upload(filename: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let boundary = "XBOUNDARYX";
    let mut body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{f}\"\r\n\
         Content-Type: {t}\r\n\r\n",
        b = boundary,
        f = filename,
        t = content_type
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/catalog/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_catalog_upload_workbook() {
    let (_, app) = memory_app();

    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();
    sheet.get_cell_mut("A1").set_value("code");
    sheet.get_cell_mut("B1").set_value("item");
    sheet.get_cell_mut("A2").set_value("B6");
    sheet.get_cell_mut("B2").set_value("Bolt M6");
    sheet.get_cell_mut("A3").set_value("W8");
    sheet.get_cell_mut("B3").set_value("Washer 8mm");
    let mut out = std::io::Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut out).unwrap();

    let request = multipart_upload(
        "items.xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        &out.into_inner(),
    );
    let (status, items) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["fullText"], "Bolt M6");
    assert_eq!(items[1]["fullText"], "Washer 8mm");

    let request = multipart_upload("broken.xlsx", "application/octet-stream", b"PK\x03\x04garbage");
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid request body"}));
}

// ============================================================================
// Fallbacks and Service Info
// ============================================================================

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let (_, app) = memory_app();
    let (status, body) = send(&app, get("/api/nothing-here")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Endpoint not found"}));
}

#[tokio::test]
async fn test_malformed_json_bodies() {
    let (memory, app) = memory_app();

    let (status, body) = send(&app, post_raw("/api/po-entry", "{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid request body"}));

    let (status, body) = send(&app, post_raw("/push-data", "{\"fullText\": 1}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Invalid request body");

    assert_eq!(memory.data_row_count(SheetKind::Inward).await, 0);
}

#[tokio::test]
async fn test_health_and_root() {
    let (_, app) = memory_app();

    let (status, health) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["store"], "memory");
    assert!(health["available_endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e == "GET /api/live-stock"));

    let timestamp = health["timestamp"].as_str().unwrap();
    assert!(NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).is_ok());

    let (status, info) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["status"], "running");
    assert_eq!(info["endpoints"]["inward"], "POST /push-data");
    assert_eq!(info["endpoints"]["po"]["create"], "POST /api/po-entry");
    assert_eq!(info["endpoints"]["po"]["list"], "GET /api/po-entries");
    assert_eq!(info["endpoints"]["po"]["summary"], "GET /api/po-summary");
    assert_eq!(info["endpoints"]["reports"]["transactions"], "GET /api/transaction-history");
    assert_eq!(info["endpoints"]["reports"]["liveStock"], "GET /api/live-stock");
}
