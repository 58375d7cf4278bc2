use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::application::ports::InteractionClient;
use crate::domain::{CallMetadata, CallProcessingResult, QaAnswer};
use crate::presentation::handlers::error::{processing_error_response, ErrorResponse};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ProcessCallResponse {
    pub message: String,
    pub interaction_id: String,
    pub transcription: String,
    pub summary: String,
    pub dispatcher: String,
    pub call_type: String,
    pub language: String,
    pub notes: String,
    pub qa_answers: Vec<QaAnswer>,
}

impl ProcessCallResponse {
    fn from_result(result: CallProcessingResult) -> Self {
        Self {
            message: "Call processed successfully".to_string(),
            interaction_id: result.interaction_id.as_str().to_string(),
            transcription: result.transcription,
            summary: result.summary.text,
            dispatcher: result.metadata.dispatcher,
            call_type: result.metadata.call_type,
            language: result.metadata.language,
            notes: result.metadata.notes,
            qa_answers: result.qa_answers,
        }
    }
}

/// Multipart upload: one `audio_file` part plus optional text parts for the
/// call metadata.
#[tracing::instrument(skip(state, multipart))]
pub async fn process_upload_handler<C>(
    State(state): State<AppState<C>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    C: InteractionClient + 'static,
{
    let mut audio: Option<(Vec<u8>, String)> = None;
    let mut metadata = CallMetadata::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read multipart: {}", e),
                    }),
                )
                    .into_response();
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "audio_file" => {
                let content_type = field
                    .content_type()
                    .unwrap_or("audio/wav")
                    .to_string();
                match field.bytes().await {
                    Ok(data) => audio = Some((data.to_vec(), content_type)),
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read audio bytes");
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(ErrorResponse {
                                error: format!("Failed to read audio file: {}", e),
                            }),
                        )
                            .into_response();
                    }
                }
            }
            "dispatcher" => metadata.dispatcher = field.text().await.unwrap_or_default(),
            "call_type" => metadata.call_type = field.text().await.unwrap_or_default(),
            "language" => metadata.language = field.text().await.unwrap_or_default(),
            "notes" => metadata.notes = field.text().await.unwrap_or_default(),
            other => {
                tracing::debug!(field = other, "Ignoring unknown multipart field");
            }
        }
    }

    let Some((audio, content_type)) = audio else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No audio_file uploaded".to_string(),
            }),
        )
            .into_response();
    };

    let cancel = CancellationToken::new();
    match state
        .processing_service
        .process_uploaded_audio(audio, &content_type, metadata, &cancel)
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(ProcessCallResponse::from_result(result)),
        )
            .into_response(),
        Err(e) => processing_error_response(e),
    }
}

#[derive(Deserialize)]
pub struct ProcessUriRequest {
    pub download_uri: String,
    #[serde(default)]
    pub dispatcher: String,
    #[serde(default)]
    pub call_type: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub notes: String,
}

/// Process audio the external service downloads itself; no upload step.
#[tracing::instrument(skip(state, body))]
pub async fn process_uri_handler<C>(
    State(state): State<AppState<C>>,
    Json(body): Json<ProcessUriRequest>,
) -> impl IntoResponse
where
    C: InteractionClient + 'static,
{
    let metadata = CallMetadata {
        dispatcher: body.dispatcher,
        call_type: body.call_type,
        language: body.language,
        notes: body.notes,
    };

    let cancel = CancellationToken::new();
    match state
        .processing_service
        .process_audio_by_uri(&body.download_uri, metadata, &cancel)
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(ProcessCallResponse::from_result(result)),
        )
            .into_response(),
        Err(e) => processing_error_response(e),
    }
}
