use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::application::services::CallProcessingError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map a pipeline error to an HTTP status without collapsing the caller's
/// ability to tell a timeout from a rejection. The full error (interaction
/// id, failing stage) goes into the body and the log.
pub fn processing_error_response(err: CallProcessingError) -> Response {
    let status = match &err {
        CallProcessingError::ProcessingTimedOut { .. } => StatusCode::GATEWAY_TIMEOUT,
        CallProcessingError::Persistence { .. } | CallProcessingError::Cancelled => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        _ => StatusCode::BAD_GATEWAY,
    };

    tracing::error!(error = %err, "Call processing failed");

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}
