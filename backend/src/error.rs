//! Error handling for the Inventory Tracker
//!
//! Every failure maps to a flat JSON body. Store and row errors are logged
//! here and never leak their cause into the response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{FieldError, QuantityOverflow, RowError};
use thiserror::Error;

use crate::store::StoreError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Client errors
    #[error("Validation error: {0}")]
    Validation(#[from] FieldError),

    #[error("Invalid request body: {0}")]
    BadRequest(String),

    #[error("Endpoint not found")]
    NotFound,

    // Record store errors
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    #[error("Malformed stored row: {0}")]
    RowParse(#[from] RowError),

    #[error("Report total out of range: {0}")]
    Overflow(#[from] QuantityOverflow),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error body used by most endpoints: `{"error": "..."}`
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::StoreUnavailable(_)
            | AppError::RowParse(_)
            | AppError::Overflow(_)
            | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to the caller
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(e) => e.to_string(),
            AppError::BadRequest(_) => "Invalid request body".to_string(),
            AppError::NotFound => "Endpoint not found".to_string(),
            AppError::StoreUnavailable(_)
            | AppError::RowParse(_)
            | AppError::Overflow(_)
            | AppError::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }

    fn log(&self) {
        if self.status().is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status();
        (status, Json(ErrorResponse { error: self.public_message() })).into_response()
    }
}

/// Error wrapper for `/push-data`, whose callers expect
/// `{"status": "error", "message": "..."}`
#[derive(Debug)]
pub struct StatusError(pub AppError);

#[derive(Serialize)]
pub struct StatusErrorResponse {
    pub status: &'static str,
    pub message: String,
}

impl From<AppError> for StatusError {
    fn from(err: AppError) -> Self {
        StatusError(err)
    }
}

impl IntoResponse for StatusError {
    fn into_response(self) -> Response {
        self.0.log();
        let status = self.0.status();
        let message = match &self.0 {
            AppError::StoreUnavailable(StoreError::SheetUnavailable { sheet, .. }) => {
                format!("Unable to access {} sheet", sheet)
            }
            other => other.public_message(),
        };
        (
            status,
            Json(StatusErrorResponse {
                status: "error",
                message,
            }),
        )
            .into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
