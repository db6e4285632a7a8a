//! Purchase order entry handlers

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use super::reporting::{csv_attachment, FormatQuery};
use crate::error::{AppError, AppResult};
use crate::services::{IngestionService, ReportingService};
use crate::AppState;

/// `POST /api/po-entry`: validate and record one PO entry
pub async fn create_po_entry(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(body) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let service = IngestionService::new(state.store.clone());
    let entry = service.record_po_entry(&body).await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// `GET /api/po-entries`: every PO entry, newest first
pub async fn list_po_entries(
    State(state): State<AppState>,
    Query(query): Query<FormatQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.store.clone());
    let entries = service.po_entries().await?;

    if query.wants_csv() {
        csv_attachment(&entries, "po_entries.csv")
    } else {
        Ok(Json(entries).into_response())
    }
}
