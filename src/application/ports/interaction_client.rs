use async_trait::async_trait;

use crate::domain::{AudioSource, InteractionId, SummaryKind, SummaryResult, TranscriptPayload};

/// Typed wrapper over the external transcription/analysis service. One
/// external round trip per method, bounded by the client's request timeout.
///
/// Every operation is safe to retry except `upload`: re-uploading audio
/// creates duplicate billable processing, so callers that need a retry must
/// declare a new interaction instead.
#[async_trait]
pub trait InteractionClient: Send + Sync {
    /// Declare a new interaction and obtain its service-assigned identifier.
    async fn declare(&self, source: &AudioSource) -> Result<InteractionId, InteractionClientError>;

    /// Push audio bytes for an interaction declared without a download URI.
    async fn upload(
        &self,
        interaction_id: &InteractionId,
        audio: Vec<u8>,
        content_type: &str,
    ) -> Result<(), InteractionClientError>;

    /// Current lifecycle status as the raw lowercase wire token. The client
    /// does not interpret the token; that is the polling controller's job.
    async fn fetch_status(
        &self,
        interaction_id: &InteractionId,
    ) -> Result<String, InteractionClientError>;

    /// Raw punctuated-transcript payload.
    async fn fetch_transcript(
        &self,
        interaction_id: &InteractionId,
    ) -> Result<TranscriptPayload, InteractionClientError>;

    /// Generated narrative summary of the requested kind.
    async fn fetch_summary(
        &self,
        interaction_id: &InteractionId,
        kind: SummaryKind,
    ) -> Result<SummaryResult, InteractionClientError>;

    /// Free-text answer to a natural-language question about the interaction.
    async fn ask(
        &self,
        interaction_id: &InteractionId,
        question: &str,
    ) -> Result<String, InteractionClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum InteractionClientError {
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("upload rejected ({status}): {detail}")]
    UploadRejected { status: u16, detail: String },
}
