use super::types::{
    first_candidate_text, Content, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, GenerativeClient, InlineData, Part,
};
use super::GeminiError;
use crate::config::GeminiSettings;

/// HTTP client for the Gemini generateContent API.
///
/// The API key travels in the `x-goog-api-key` header, never in the URL, so
/// request logging cannot capture it.
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> Result<Self, GeminiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| GeminiError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model,
            api_key: settings.api_key,
            client,
            timeout_secs: settings.timeout_secs,
        })
    }

    /// Construct a client from `MEDVALIDATE_*` environment variables.
    pub fn from_env() -> Result<Self, GeminiError> {
        Self::new(GeminiSettings::from_env()?)
    }

    fn post_generate(
        &self,
        parts: Vec<Part<'_>>,
        config: &GenerationConfig,
    ) -> Result<String, GeminiError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: config,
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    GeminiError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    GeminiError::HttpClient(format!(
                        "Request timed out after {}s",
                        self.timeout_secs
                    ))
                } else {
                    GeminiError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| GeminiError::ResponseParsing(e.to_string()))?;

        first_candidate_text(parsed)
    }
}

impl GenerativeClient for GeminiClient {
    fn generate_text(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, GeminiError> {
        self.post_generate(
            vec![Part {
                text: Some(prompt),
                inline_data: None,
            }],
            config,
        )
    }

    fn generate_with_file(
        &self,
        prompt: &str,
        mime_type: &str,
        base64_data: &str,
        config: &GenerationConfig,
    ) -> Result<String, GeminiError> {
        self.post_generate(
            vec![
                Part {
                    text: Some(prompt),
                    inline_data: None,
                },
                Part {
                    text: None,
                    inline_data: Some(InlineData {
                        mime_type,
                        data: base64_data,
                    }),
                },
            ],
            config,
        )
    }
}

/// Mock generative client for testing — returns a configurable response
/// or a configurable failure.
pub struct MockGenerativeClient {
    response: Option<String>,
}

impl MockGenerativeClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
        }
    }

    /// A client whose every call fails with `EmptyResponse`.
    pub fn failing() -> Self {
        Self { response: None }
    }

    fn respond(&self) -> Result<String, GeminiError> {
        match &self.response {
            Some(r) => Ok(r.clone()),
            None => Err(GeminiError::EmptyResponse),
        }
    }
}

impl GenerativeClient for MockGenerativeClient {
    fn generate_text(
        &self,
        _prompt: &str,
        _config: &GenerationConfig,
    ) -> Result<String, GeminiError> {
        self.respond()
    }

    fn generate_with_file(
        &self,
        _prompt: &str,
        _mime_type: &str,
        _base64_data: &str,
        _config: &GenerationConfig,
    ) -> Result<String, GeminiError> {
        self.respond()
    }
}
