//! Service info and health check handlers

use axum::{extract::State, Json};
use chrono::Local;
use shared::format_timestamp;
use serde::Serialize;
use serde_json::{json, Value};

use crate::AppState;

/// Every endpoint the server answers, as `METHOD path`
pub const ENDPOINTS: [&str; 9] = [
    "GET /",
    "GET /health",
    "POST /push-data",
    "POST /api/po-entry",
    "GET /api/po-entries",
    "GET /api/po-summary",
    "GET /api/transaction-history",
    "GET /api/live-stock",
    "POST /api/catalog/upload",
];

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub store: String,
    pub available_endpoints: Vec<&'static str>,
}

/// Root endpoint: service info and endpoint map
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Inventory Tracker API",
        "status": "running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "GET /health",
            "inward": "POST /push-data",
            "po": {
                "create": "POST /api/po-entry",
                "list": "GET /api/po-entries",
                "summary": "GET /api/po-summary",
            },
            "reports": {
                "transactions": "GET /api/transaction-history",
                "liveStock": "GET /api/live-stock",
            },
            "catalog": {
                "upload": "POST /api/catalog/upload",
            },
        }
    }))
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: format_timestamp(Local::now().naive_local()),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: state.store.name().to_string(),
        available_endpoints: ENDPOINTS.to_vec(),
    })
}
