mod call_record;
mod interaction;
mod interaction_status;
mod qa;
mod summary;
mod transcript;

pub use call_record::{CallMetadata, CallProcessingResult, CallRecord};
pub use interaction::{AudioSource, Interaction, InteractionId};
pub use interaction_status::InteractionStatus;
pub use qa::{
    catalog_question, classify, extract_proof, parse_answer, QaAnswer, QaQuestion,
    QUESTION_CATALOG, UNKNOWN_ANSWER,
};
pub use summary::{SummaryKind, SummaryResult};
pub use transcript::{PhraseSegment, TranscriptPayload, TranscriptResult};
