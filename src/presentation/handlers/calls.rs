use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::ports::{InteractionClient, RepositoryError};
use crate::presentation::handlers::error::ErrorResponse;
use crate::presentation::state::AppState;

fn repository_error_response(e: RepositoryError) -> axum::response::Response {
    tracing::error!(error = %e, "Call repository query failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("Repository error: {}", e),
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn list_calls_handler<C>(State(state): State<AppState<C>>) -> impl IntoResponse
where
    C: InteractionClient + 'static,
{
    match state.call_repository.list().await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => repository_error_response(e),
    }
}

#[tracing::instrument(skip(state))]
pub async fn calls_by_type_handler<C>(State(state): State<AppState<C>>) -> impl IntoResponse
where
    C: InteractionClient + 'static,
{
    match state.call_repository.count_by_call_type().await {
        Ok(counts) => (StatusCode::OK, Json(counts)).into_response(),
        Err(e) => repository_error_response(e),
    }
}

#[tracing::instrument(skip(state))]
pub async fn calls_by_date_handler<C>(State(state): State<AppState<C>>) -> impl IntoResponse
where
    C: InteractionClient + 'static,
{
    match state.call_repository.count_by_date().await {
        Ok(counts) => (StatusCode::OK, Json(counts)).into_response(),
        Err(e) => repository_error_response(e),
    }
}
