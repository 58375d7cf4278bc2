use serde::{Deserialize, Serialize};

/// Body for POST /interactions. `downloadUri` is omitted when the audio is
/// pushed in a separate upload step.
#[derive(Debug, Clone, Serialize)]
pub struct DeclareRequest {
    #[serde(rename = "type")]
    pub interaction_type: &'static str,
    pub model: &'static str,
    #[serde(rename = "languageTag")]
    pub language_tag: &'static str,
    #[serde(rename = "downloadUri", skip_serializing_if = "Option::is_none")]
    pub download_uri: Option<String>,
}

impl DeclareRequest {
    pub fn audio(download_uri: Option<String>) -> Self {
        Self {
            interaction_type: "audio",
            model: "echo",
            language_tag: "en-us",
            download_uri,
        }
    }
}

/// The service answers with either key depending on API revision; both are
/// optional at the wire and at least one must be present.
#[derive(Debug, Clone, Deserialize)]
pub struct DeclareResponse {
    #[serde(rename = "interactionIdentifier")]
    pub interaction_identifier: Option<String>,
    pub id: Option<String>,
}

impl DeclareResponse {
    pub fn into_identifier(self) -> Option<String> {
        self.interaction_identifier.or(self.id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryResponse {
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AskRequest<'a> {
    pub question: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AskResponse {
    pub answer: Option<String>,
}
