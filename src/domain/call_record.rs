use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{InteractionId, QaAnswer, SummaryResult, TranscriptResult};

/// Caller-supplied context for one processed call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallMetadata {
    pub dispatcher: String,
    pub call_type: String,
    pub language: String,
    pub notes: String,
}

/// Everything the pipeline produced for one interaction. Pure composition,
/// assembled once polling, fetching and QA extraction have all finished.
#[derive(Debug, Clone)]
pub struct CallProcessingResult {
    pub interaction_id: InteractionId,
    pub transcript: TranscriptResult,
    pub transcription: String,
    pub summary: SummaryResult,
    pub qa_answers: Vec<QaAnswer>,
    pub metadata: CallMetadata,
}

impl CallProcessingResult {
    pub fn assemble(
        transcript: TranscriptResult,
        summary: SummaryResult,
        qa_answers: Vec<QaAnswer>,
        metadata: CallMetadata,
    ) -> Self {
        Self {
            interaction_id: transcript.interaction_id.clone(),
            transcription: transcript.flattened(),
            transcript,
            summary,
            qa_answers,
            metadata,
        }
    }
}

/// The document handed to the persistence collaborator, keyed by a freshly
/// generated identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRecord {
    pub id: Uuid,
    pub interaction_id: String,
    pub transcription: String,
    pub summary: String,
    pub dispatcher: String,
    pub call_type: String,
    pub language: String,
    pub notes: String,
    pub qa_answers: Vec<QaAnswer>,
    pub created_at: DateTime<Utc>,
}

impl CallRecord {
    pub fn from_result(result: &CallProcessingResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            interaction_id: result.interaction_id.as_str().to_string(),
            transcription: result.transcription.clone(),
            summary: result.summary.text.clone(),
            dispatcher: result.metadata.dispatcher.clone(),
            call_type: result.metadata.call_type.clone(),
            language: result.metadata.language.clone(),
            notes: result.metadata.notes.clone(),
            qa_answers: result.qa_answers.clone(),
            created_at: Utc::now(),
        }
    }
}
