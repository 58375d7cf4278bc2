use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::InteractionClient;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    calls_by_date_handler, calls_by_type_handler, health_handler, interaction_qa_handler,
    interaction_status_handler, interaction_summary_handler, list_calls_handler,
    process_upload_handler, process_uri_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<C>(state: AppState<C>) -> Router
where
    C: InteractionClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/calls/process", post(process_upload_handler::<C>))
        .route("/api/v1/calls/process-uri", post(process_uri_handler::<C>))
        .route("/api/v1/calls", get(list_calls_handler::<C>))
        .route(
            "/api/v1/calls/stats/by-type",
            get(calls_by_type_handler::<C>),
        )
        .route(
            "/api/v1/calls/stats/by-date",
            get(calls_by_date_handler::<C>),
        )
        .route(
            "/api/v1/interactions/{interaction_id}/status",
            get(interaction_status_handler::<C>),
        )
        .route(
            "/api/v1/interactions/{interaction_id}/summary",
            get(interaction_summary_handler::<C>),
        )
        .route(
            "/api/v1/interactions/{interaction_id}/qa",
            get(interaction_qa_handler::<C>),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
