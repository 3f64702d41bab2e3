use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::models::{FieldErrors, RejectReason};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid form input")]
    Validation(FieldErrors),

    #[error("{message}")]
    Booking { reason: RejectReason, message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(fields) => {
                let body = serde_json::json!({
                    "error": "invalid form input",
                    "fields": fields,
                });
                (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response()
            }
            AppError::Booking { reason, message } => {
                let status = match reason {
                    RejectReason::SlotFull => StatusCode::CONFLICT,
                    RejectReason::InvalidSlot => StatusCode::UNPROCESSABLE_ENTITY,
                    RejectReason::BackendUnconfigured => StatusCode::SERVICE_UNAVAILABLE,
                    RejectReason::Unknown => StatusCode::BAD_GATEWAY,
                };
                let body = serde_json::json!({ "error": message, "reason": reason });
                (status, axum::Json(body)).into_response()
            }
        }
    }
}
