use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::application::ports::{
    CallRepository, InteractionClient, InteractionClientError, RepositoryError,
};
use crate::application::services::{poll_until, PollError, PollPolicy};
use crate::domain::{
    parse_answer, AudioSource, CallMetadata, CallProcessingResult, CallRecord, Interaction,
    InteractionId, InteractionStatus, QaAnswer, QaQuestion, SummaryKind, SummaryResult,
    TranscriptResult, QUESTION_CATALOG,
};

/// Drives one interaction through the external service's lifecycle
/// (declare, optional upload, poll, fetch) and turns the outcome into a
/// persisted call record plus structured QA answers.
///
/// Each processing request owns its interaction state; concurrent requests
/// share nothing but the client and the repository.
pub struct CallProcessingService<C: InteractionClient> {
    client: Arc<C>,
    repository: Arc<dyn CallRepository>,
    poll_policy: PollPolicy,
}

impl<C: InteractionClient> CallProcessingService<C> {
    pub fn new(
        client: Arc<C>,
        repository: Arc<dyn CallRepository>,
        poll_policy: PollPolicy,
    ) -> Self {
        Self {
            client,
            repository,
            poll_policy,
        }
    }

    /// Process audio the service downloads itself from `download_uri`.
    #[tracing::instrument(skip(self, metadata, cancel))]
    pub async fn process_audio_by_uri(
        &self,
        download_uri: &str,
        metadata: CallMetadata,
        cancel: &CancellationToken,
    ) -> Result<CallProcessingResult, CallProcessingError> {
        let source = AudioSource::DownloadUri(download_uri.to_string());
        let interaction = self.declare(source).await?;
        self.run_pipeline(interaction, None, metadata, cancel).await
    }

    /// Process audio supplied as bytes; uploaded in a separate step after
    /// declaration. The buffer is owned by this request and dropped on every
    /// exit path.
    #[tracing::instrument(skip(self, audio, metadata, cancel), fields(bytes = audio.len()))]
    pub async fn process_uploaded_audio(
        &self,
        audio: Vec<u8>,
        content_type: &str,
        metadata: CallMetadata,
        cancel: &CancellationToken,
    ) -> Result<CallProcessingResult, CallProcessingError> {
        let source = AudioSource::UploadedAudio {
            content_type: content_type.to_string(),
        };
        let interaction = self.declare(source).await?;
        self.run_pipeline(interaction, Some(audio), metadata, cancel)
            .await
    }

    /// Evaluate the full question catalog against an already-processed
    /// interaction. Questions run concurrently; a failed ask is recorded as
    /// an Unknown answer rather than aborting the batch, so the output
    /// always has one answer per catalog question, in catalog order.
    #[tracing::instrument(skip(self, cancel))]
    pub async fn evaluate_qa(
        &self,
        interaction_id: &InteractionId,
        cancel: &CancellationToken,
    ) -> Result<Vec<QaAnswer>, CallProcessingError> {
        if cancel.is_cancelled() {
            return Err(CallProcessingError::Cancelled);
        }

        let batch = futures::future::join_all(
            QUESTION_CATALOG
                .iter()
                .map(|question| self.evaluate_question(interaction_id, question)),
        );

        tokio::select! {
            _ = cancel.cancelled() => Err(CallProcessingError::Cancelled),
            answers = batch => Ok(answers),
        }
    }

    /// Current lifecycle status of an interaction.
    #[tracing::instrument(skip(self))]
    pub async fn get_status(
        &self,
        interaction_id: &InteractionId,
    ) -> Result<InteractionStatus, CallProcessingError> {
        let token = self.client.fetch_status(interaction_id).await.map_err(|source| {
            CallProcessingError::StatusCheck {
                interaction_id: interaction_id.clone(),
                source,
            }
        })?;

        InteractionStatus::from_str(&token).map_err(|_| CallProcessingError::UnknownStatus {
            interaction_id: interaction_id.clone(),
            token,
        })
    }

    /// Fetch a generated summary of the requested kind.
    #[tracing::instrument(skip(self))]
    pub async fn get_summary(
        &self,
        interaction_id: &InteractionId,
        kind: SummaryKind,
    ) -> Result<SummaryResult, CallProcessingError> {
        self.client
            .fetch_summary(interaction_id, kind)
            .await
            .map_err(|source| CallProcessingError::RetrievalFailed {
                interaction_id: interaction_id.clone(),
                stage: RetrievalStage::Summary,
                source,
            })
    }

    async fn declare(&self, source: AudioSource) -> Result<Interaction, CallProcessingError> {
        let id = self
            .client
            .declare(&source)
            .await
            .map_err(|source| CallProcessingError::Declare { source })?;

        tracing::info!(interaction_id = %id, "Interaction declared");
        Ok(Interaction::declared(id, source))
    }

    async fn run_pipeline(
        &self,
        mut interaction: Interaction,
        audio: Option<Vec<u8>>,
        metadata: CallMetadata,
        cancel: &CancellationToken,
    ) -> Result<CallProcessingResult, CallProcessingError> {
        if let Some(audio) = audio {
            if interaction.source.requires_upload() {
                self.upload(&interaction, audio).await?;
            }
        }

        self.await_processed(&interaction, cancel).await?;
        interaction.status = InteractionStatus::Processed;

        let (transcript, summary) = self.retrieve_results(&interaction.id).await?;
        let qa_answers = self.evaluate_qa(&interaction.id, cancel).await?;

        let result = CallProcessingResult::assemble(transcript, summary, qa_answers, metadata);

        let record = CallRecord::from_result(&result);
        self.repository
            .insert(&record)
            .await
            .map_err(|source| CallProcessingError::Persistence {
                interaction_id: interaction.id.clone(),
                source,
            })?;

        tracing::info!(
            interaction_id = %interaction.id,
            record_id = %record.id,
            answers = result.qa_answers.len(),
            "Call processing completed"
        );

        Ok(result)
    }

    /// Single upload attempt. Never retried here: re-uploading creates
    /// duplicate billable processing, so a failure terminates the pipeline
    /// before any polling starts.
    async fn upload(
        &self,
        interaction: &Interaction,
        audio: Vec<u8>,
    ) -> Result<(), CallProcessingError> {
        let content_type = match &interaction.source {
            AudioSource::UploadedAudio { content_type } => content_type.as_str(),
            AudioSource::DownloadUri(_) => "audio/wav",
        };

        self.client
            .upload(&interaction.id, audio, content_type)
            .await
            .map_err(|source| CallProcessingError::Upload {
                interaction_id: interaction.id.clone(),
                source,
            })?;

        tracing::info!(interaction_id = %interaction.id, "Audio uploaded");
        Ok(())
    }

    async fn await_processed(
        &self,
        interaction: &Interaction,
        cancel: &CancellationToken,
    ) -> Result<(), CallProcessingError> {
        let terminal = [InteractionStatus::Processed.as_str().to_string()];
        let failure = [InteractionStatus::Failed.as_str().to_string()];

        let client = Arc::clone(&self.client);
        let id = interaction.id.clone();
        let check = move || {
            let client = Arc::clone(&client);
            let id = id.clone();
            async move { client.fetch_status(&id).await }
        };

        match poll_until(check, &terminal, &failure, &self.poll_policy, cancel).await {
            Ok(_) => Ok(()),
            Err(PollError::Failed { status, attempts }) => {
                tracing::warn!(
                    interaction_id = %interaction.id,
                    status = %status,
                    attempts,
                    "Service reported terminal failure"
                );
                Err(CallProcessingError::ProcessingFailed {
                    interaction_id: interaction.id.clone(),
                    status,
                })
            }
            Err(PollError::TimedOut { attempts }) => Err(CallProcessingError::ProcessingTimedOut {
                interaction_id: interaction.id.clone(),
                attempts,
            }),
            Err(PollError::Cancelled) => Err(CallProcessingError::Cancelled),
        }
    }

    /// Both fetches are required before a result can be assembled; either
    /// one failing surfaces as a retrieval error even though polling
    /// succeeded.
    async fn retrieve_results(
        &self,
        interaction_id: &InteractionId,
    ) -> Result<(TranscriptResult, SummaryResult), CallProcessingError> {
        let (payload, summary) = tokio::join!(
            self.client.fetch_transcript(interaction_id),
            self.client.fetch_summary(interaction_id, SummaryKind::General),
        );

        let payload = payload.map_err(|source| CallProcessingError::RetrievalFailed {
            interaction_id: interaction_id.clone(),
            stage: RetrievalStage::Transcript,
            source,
        })?;
        let summary = summary.map_err(|source| CallProcessingError::RetrievalFailed {
            interaction_id: interaction_id.clone(),
            stage: RetrievalStage::Summary,
            source,
        })?;

        let segments =
            payload
                .sentence_segments
                .ok_or_else(|| CallProcessingError::MalformedTranscript {
                    interaction_id: interaction_id.clone(),
                })?;

        Ok((
            TranscriptResult::new(interaction_id.clone(), segments),
            summary,
        ))
    }

    async fn evaluate_question(
        &self,
        interaction_id: &InteractionId,
        question: &QaQuestion,
    ) -> QaAnswer {
        match self.client.ask(interaction_id, question.prompt).await {
            Ok(answer_text) => parse_answer(question, &answer_text),
            Err(e) => {
                tracing::warn!(
                    interaction_id = %interaction_id,
                    question = question.id,
                    error = %e,
                    "Ask failed, recording Unknown answer"
                );
                QaAnswer::unknown(question.id)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalStage {
    Transcript,
    Summary,
}

impl fmt::Display for RetrievalStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetrievalStage::Transcript => write!(f, "transcript"),
            RetrievalStage::Summary => write!(f, "summary"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CallProcessingError {
    #[error("declare failed: {source}")]
    Declare {
        #[source]
        source: InteractionClientError,
    },
    #[error("upload failed for interaction {interaction_id}: {source}")]
    Upload {
        interaction_id: InteractionId,
        #[source]
        source: InteractionClientError,
    },
    #[error("interaction {interaction_id} reported terminal status {status}")]
    ProcessingFailed {
        interaction_id: InteractionId,
        status: String,
    },
    #[error("interaction {interaction_id} not processed after {attempts} status checks")]
    ProcessingTimedOut {
        interaction_id: InteractionId,
        attempts: u32,
    },
    #[error("{stage} retrieval failed for interaction {interaction_id}: {source}")]
    RetrievalFailed {
        interaction_id: InteractionId,
        stage: RetrievalStage,
        #[source]
        source: InteractionClientError,
    },
    #[error("transcript payload for interaction {interaction_id} is missing sentence segments")]
    MalformedTranscript { interaction_id: InteractionId },
    #[error("status check failed for interaction {interaction_id}: {source}")]
    StatusCheck {
        interaction_id: InteractionId,
        #[source]
        source: InteractionClientError,
    },
    #[error("unknown status token {token:?} for interaction {interaction_id}")]
    UnknownStatus {
        interaction_id: InteractionId,
        token: String,
    },
    #[error("persisting call record for interaction {interaction_id} failed: {source}")]
    Persistence {
        interaction_id: InteractionId,
        #[source]
        source: RepositoryError,
    },
    #[error("processing cancelled")]
    Cancelled,
}
