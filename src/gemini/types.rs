use serde::{Deserialize, Serialize};

use super::GeminiError;

/// Decoding parameters for a generateContent call.
///
/// Serialized camelCase inside the request's `generationConfig` block.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    /// Near-deterministic decoding for prescription transcription.
    pub fn extraction() -> Self {
        Self {
            temperature: 0.1,
            top_k: 32,
            top_p: 1.0,
            max_output_tokens: 4096,
        }
    }

    /// Decoding parameters for prescription validation.
    pub fn validation() -> Self {
        Self {
            temperature: 0.2,
            top_k: 40,
            top_p: 0.8,
            max_output_tokens: 8192,
        }
    }
}

/// Generative model client abstraction (allows mocking).
pub trait GenerativeClient: Send + Sync {
    /// Submit a text-only prompt.
    fn generate_text(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, GeminiError>;

    /// Submit a prompt with an inline base64-encoded file attachment.
    fn generate_with_file(
        &self,
        prompt: &str,
        mime_type: &str,
        base64_data: &str,
        config: &GenerationConfig,
    ) -> Result<String, GeminiError>;
}

// ──────────────────────────────────────────────
// Wire types for models/{model}:generateContent
// ──────────────────────────────────────────────

/// Request body. `inline_data`/`mime_type` stay snake_case and the config
/// block is camelCase; both are what the v1beta endpoint expects.
#[derive(Serialize)]
pub(crate) struct GenerateContentRequest<'a> {
    pub contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    pub generation_config: &'a GenerationConfig,
}

#[derive(Serialize)]
pub(crate) struct Content<'a> {
    pub parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
pub(crate) struct Part<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData<'a>>,
}

#[derive(Serialize)]
pub(crate) struct InlineData<'a> {
    pub mime_type: &'a str,
    pub data: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
pub(crate) struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
pub(crate) struct ResponsePart {
    pub text: Option<String>,
}

/// Pull the first text part of the first candidate out of a response.
pub(crate) fn first_candidate_text(
    response: GenerateContentResponse,
) -> Result<String, GeminiError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or(GeminiError::EmptyResponse)
}
