//! Catalog upload handler

use axum::{extract::Multipart, Json};
use shared::CatalogItem;

use crate::error::{AppError, AppResult};
use crate::services::catalog::parse_catalog;

/// `POST /api/catalog/upload`: parse the workbook or CSV in the multipart field `file`
pub async fn upload_catalog(mut multipart: Multipart) -> AppResult<Json<Vec<CatalogItem>>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        return Ok(Json(parse_catalog(&data)?));
    }

    Err(AppError::BadRequest("missing multipart field `file`".into()))
}
