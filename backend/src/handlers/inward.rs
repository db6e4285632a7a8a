//! Inward batch submission

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::{json, Value};
use shared::InwardItem;

use crate::error::{AppError, StatusError};
use crate::services::IngestionService;
use crate::AppState;

/// `POST /push-data`: record a batch of received items.
///
/// Answers `{"status": "success"}` even when some items failed to append;
/// the per-item outcome is only logged.
pub async fn push_data(
    State(state): State<AppState>,
    payload: Result<Json<Vec<InwardItem>>, JsonRejection>,
) -> Result<Json<Value>, StatusError> {
    let Json(items) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    tracing::debug!("Received inward batch of {} items", items.len());

    let service = IngestionService::new(state.store.clone());
    service.record_inward(items).await?;

    Ok(Json(json!({ "status": "success" })))
}
