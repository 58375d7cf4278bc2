use serde::Deserialize;

use super::InteractionId;

/// Raw structured payload from the punctuated-transcript endpoint.
/// `sentenceSegments` stays optional at the wire so the orchestrator can
/// tell a missing field apart from an empty transcript.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptPayload {
    #[serde(rename = "sentenceSegments")]
    pub sentence_segments: Option<Vec<PhraseSegment>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PhraseSegment {
    pub phrase: String,
    #[serde(default)]
    pub speaker: Option<String>,
}

/// Speaker-attributed transcript for one interaction. Immutable once fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptResult {
    pub interaction_id: InteractionId,
    pub segments: Vec<PhraseSegment>,
}

impl TranscriptResult {
    pub fn new(interaction_id: InteractionId, segments: Vec<PhraseSegment>) -> Self {
        Self {
            interaction_id,
            segments,
        }
    }

    /// Flattened transcription text: a literal speaker label once, then each
    /// phrase followed by a space, in service order.
    pub fn flattened(&self) -> String {
        let mut text = String::from("Dispatcher: ");
        for segment in &self.segments {
            text.push_str(&segment.phrase);
            text.push(' ');
        }
        text
    }
}
