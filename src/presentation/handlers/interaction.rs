use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::application::ports::InteractionClient;
use crate::domain::{InteractionId, QaAnswer, SummaryKind};
use crate::presentation::handlers::error::{processing_error_response, ErrorResponse};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct InteractionStatusResponse {
    pub interaction_id: String,
    pub status: String,
}

#[tracing::instrument(skip(state))]
pub async fn interaction_status_handler<C>(
    State(state): State<AppState<C>>,
    Path(interaction_id): Path<String>,
) -> impl IntoResponse
where
    C: InteractionClient + 'static,
{
    let id = InteractionId::new(interaction_id);
    match state.processing_service.get_status(&id).await {
        Ok(status) => (
            StatusCode::OK,
            Json(InteractionStatusResponse {
                interaction_id: id.as_str().to_string(),
                status: status.as_str().to_string(),
            }),
        )
            .into_response(),
        Err(e) => processing_error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    #[serde(default)]
    pub kind: Option<String>,
}

#[derive(Serialize)]
pub struct InteractionSummaryResponse {
    pub interaction_id: String,
    pub kind: String,
    pub summary: String,
}

#[tracing::instrument(skip(state))]
pub async fn interaction_summary_handler<C>(
    State(state): State<AppState<C>>,
    Path(interaction_id): Path<String>,
    Query(params): Query<SummaryParams>,
) -> impl IntoResponse
where
    C: InteractionClient + 'static,
{
    let kind = match params.kind.as_deref() {
        None | Some("general") => SummaryKind::General,
        Some("cx") => SummaryKind::CustomerExperience,
        Some(other) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Unknown summary kind: {}", other),
                }),
            )
                .into_response();
        }
    };

    let id = InteractionId::new(interaction_id);
    match state.processing_service.get_summary(&id, kind).await {
        Ok(summary) => (
            StatusCode::OK,
            Json(InteractionSummaryResponse {
                interaction_id: id.as_str().to_string(),
                kind: kind.as_str().to_string(),
                summary: summary.text,
            }),
        )
            .into_response(),
        Err(e) => processing_error_response(e),
    }
}

#[derive(Serialize)]
pub struct InteractionQaResponse {
    pub interaction_id: String,
    pub answers: Vec<QaAnswer>,
}

/// Evaluate the QA catalog against an already-processed interaction.
#[tracing::instrument(skip(state))]
pub async fn interaction_qa_handler<C>(
    State(state): State<AppState<C>>,
    Path(interaction_id): Path<String>,
) -> impl IntoResponse
where
    C: InteractionClient + 'static,
{
    let id = InteractionId::new(interaction_id);
    let cancel = CancellationToken::new();
    match state.processing_service.evaluate_qa(&id, &cancel).await {
        Ok(answers) => (
            StatusCode::OK,
            Json(InteractionQaResponse {
                interaction_id: id.as_str().to_string(),
                answers,
            }),
        )
            .into_response(),
        Err(e) => processing_error_response(e),
    }
}
