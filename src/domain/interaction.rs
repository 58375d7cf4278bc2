use chrono::{DateTime, Utc};

use super::InteractionStatus;

/// Opaque identifier assigned by the external analysis service when an
/// interaction is declared. The only value that outlives a processing
/// request — it ends up on the persisted call record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InteractionId(String);

impl InteractionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InteractionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the audio for an interaction comes from: either the service pulls
/// it from a URI, or we push the bytes in a separate upload step.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioSource {
    DownloadUri(String),
    UploadedAudio { content_type: String },
}

impl AudioSource {
    pub fn requires_upload(&self) -> bool {
        matches!(self, AudioSource::UploadedAudio { .. })
    }
}

/// Ephemeral orchestration state for one processing request. Never persisted
/// as its own entity.
#[derive(Debug, Clone)]
pub struct Interaction {
    pub id: InteractionId,
    pub source: AudioSource,
    pub status: InteractionStatus,
    pub created_at: DateTime<Utc>,
}

impl Interaction {
    pub fn declared(id: InteractionId, source: AudioSource) -> Self {
        Self {
            id,
            source,
            status: InteractionStatus::Queued,
            created_at: Utc::now(),
        }
    }
}
