//! Reporting handlers for stock analytics and data export

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::PoSummary;

use crate::error::AppResult;
use crate::services::ReportingService;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct FormatQuery {
    pub format: Option<String>, // "json" or "csv"
}

impl FormatQuery {
    pub fn wants_csv(&self) -> bool {
        self.format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("csv"))
    }
}

/// Render rows as a downloadable CSV file
pub fn csv_attachment<T: Serialize>(rows: &[T], filename: &str) -> AppResult<Response> {
    let csv = ReportingService::export_to_csv(rows)?;
    let disposition = format!("attachment; filename=\"{}\"", filename);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
        .into_response())
}

/// Get PO summary
pub async fn get_po_summary(State(state): State<AppState>) -> AppResult<Json<PoSummary>> {
    let service = ReportingService::new(state.store.clone());
    let summary = service.po_summary().await?;
    Ok(Json(summary))
}

/// Get transaction history
pub async fn get_transaction_history(
    State(state): State<AppState>,
    Query(query): Query<FormatQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.store.clone());
    let records = service.transaction_history().await?;

    if query.wants_csv() {
        csv_attachment(&records, "transaction_history.csv")
    } else {
        Ok(Json(records).into_response())
    }
}

/// Get live stock per item and unit
pub async fn get_live_stock(
    State(state): State<AppState>,
    Query(query): Query<FormatQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.store.clone());
    let rows = service.live_stock().await?;

    if query.wants_csv() {
        csv_attachment(&rows, "live_stock.csv")
    } else {
        Ok(Json(rows).into_response())
    }
}
