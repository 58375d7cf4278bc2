use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client;

use crate::application::ports::{InteractionClient, InteractionClientError};
use crate::domain::{AudioSource, InteractionId, SummaryKind, SummaryResult, TranscriptPayload};

use super::types::{AskRequest, AskResponse, DeclareRequest, DeclareResponse, StatusResponse, SummaryResponse};

pub const API_TOKEN_HEADER: &str = "X-API-Token";

/// Immutable connection settings for the external analysis service, threaded
/// through the constructor. No process-wide state.
#[derive(Debug, Clone)]
pub struct ElevateConfig {
    pub base_url: String,
    pub api_token: String,
    pub request_timeout: Duration,
}

/// reqwest-backed implementation of [`InteractionClient`] against the
/// ElevateAI-style interaction API.
pub struct ElevateClient {
    client: Client,
    base_url: String,
    api_token: String,
}

impl ElevateClient {
    pub fn new(config: ElevateConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn ensure_success(
        response: reqwest::Response,
        context: &str,
    ) -> Result<reqwest::Response, InteractionClientError> {
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(InteractionClientError::ServiceUnavailable(format!(
                "{context} returned {status}: {text}"
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl InteractionClient for ElevateClient {
    async fn declare(&self, source: &AudioSource) -> Result<InteractionId, InteractionClientError> {
        let download_uri = match source {
            AudioSource::DownloadUri(uri) => Some(uri.clone()),
            AudioSource::UploadedAudio { .. } => None,
        };
        let body = DeclareRequest::audio(download_uri);

        let response = self
            .client
            .post(self.url("/interactions"))
            .header(API_TOKEN_HEADER, &self.api_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                InteractionClientError::ServiceUnavailable(format!("declare request failed: {e}"))
            })?;
        let response = Self::ensure_success(response, "declare").await?;

        let decl: DeclareResponse = response.json().await.map_err(|e| {
            InteractionClientError::InvalidResponse(format!("declare response parse failed: {e}"))
        })?;

        decl.into_identifier()
            .map(InteractionId::new)
            .ok_or_else(|| {
                InteractionClientError::InvalidResponse(
                    "declare response carries no interaction identifier".to_string(),
                )
            })
    }

    async fn upload(
        &self,
        interaction_id: &InteractionId,
        audio: Vec<u8>,
        content_type: &str,
    ) -> Result<(), InteractionClientError> {
        let file_part = multipart::Part::bytes(audio)
            .file_name("audio")
            .mime_str(content_type)
            .map_err(|e| {
                InteractionClientError::ServiceUnavailable(format!("upload form build failed: {e}"))
            })?;
        let form = multipart::Form::new().part("audio_file", file_part);

        tracing::debug!(interaction_id = %interaction_id, content_type, "Uploading audio");

        let response = self
            .client
            .post(self.url(&format!("/interactions/{interaction_id}/upload")))
            .header(API_TOKEN_HEADER, &self.api_token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                InteractionClientError::ServiceUnavailable(format!("upload request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let detail = response.text().await.unwrap_or_default();
            return Err(InteractionClientError::UploadRejected { status, detail });
        }

        Ok(())
    }

    async fn fetch_status(
        &self,
        interaction_id: &InteractionId,
    ) -> Result<String, InteractionClientError> {
        let response = self
            .client
            .get(self.url(&format!("/interactions/{interaction_id}/status")))
            .header(API_TOKEN_HEADER, &self.api_token)
            .send()
            .await
            .map_err(|e| {
                InteractionClientError::ServiceUnavailable(format!("status request failed: {e}"))
            })?;
        let response = Self::ensure_success(response, "status").await?;

        let status: StatusResponse = response.json().await.map_err(|e| {
            InteractionClientError::InvalidResponse(format!("status response parse failed: {e}"))
        })?;

        Ok(status.status.to_lowercase())
    }

    async fn fetch_transcript(
        &self,
        interaction_id: &InteractionId,
    ) -> Result<TranscriptPayload, InteractionClientError> {
        let response = self
            .client
            .get(self.url(&format!(
                "/interactions/{interaction_id}/transcripts/punctuated"
            )))
            .header(API_TOKEN_HEADER, &self.api_token)
            .send()
            .await
            .map_err(|e| {
                InteractionClientError::ServiceUnavailable(format!(
                    "transcript request failed: {e}"
                ))
            })?;
        let response = Self::ensure_success(response, "transcript").await?;

        response.json().await.map_err(|e| {
            InteractionClientError::InvalidResponse(format!(
                "transcript response parse failed: {e}"
            ))
        })
    }

    async fn fetch_summary(
        &self,
        interaction_id: &InteractionId,
        kind: SummaryKind,
    ) -> Result<SummaryResult, InteractionClientError> {
        let path = match kind {
            SummaryKind::General => format!("/interactions/{interaction_id}/gen-ai/summary"),
            SummaryKind::CustomerExperience => {
                format!("/interactions/{interaction_id}/gen-ai/cx/summary")
            }
        };

        let response = self
            .client
            .get(self.url(&path))
            .header(API_TOKEN_HEADER, &self.api_token)
            .send()
            .await
            .map_err(|e| {
                InteractionClientError::ServiceUnavailable(format!("summary request failed: {e}"))
            })?;
        let response = Self::ensure_success(response, "summary").await?;

        let payload: SummaryResponse = response.json().await.map_err(|e| {
            InteractionClientError::InvalidResponse(format!("summary response parse failed: {e}"))
        })?;

        let text = payload.summary.ok_or_else(|| {
            InteractionClientError::InvalidResponse(
                "summary response missing summary text".to_string(),
            )
        })?;

        Ok(SummaryResult::new(interaction_id.clone(), kind, text))
    }

    async fn ask(
        &self,
        interaction_id: &InteractionId,
        question: &str,
    ) -> Result<String, InteractionClientError> {
        let response = self
            .client
            .post(self.url(&format!("/interactions/{interaction_id}/gen-ai/ask")))
            .header(API_TOKEN_HEADER, &self.api_token)
            .json(&AskRequest { question })
            .send()
            .await
            .map_err(|e| {
                InteractionClientError::ServiceUnavailable(format!("ask request failed: {e}"))
            })?;
        let response = Self::ensure_success(response, "ask").await?;

        let payload: AskResponse = response.json().await.map_err(|e| {
            InteractionClientError::InvalidResponse(format!("ask response parse failed: {e}"))
        })?;

        payload.answer.ok_or_else(|| {
            InteractionClientError::InvalidResponse("ask response missing answer".to_string())
        })
    }
}
