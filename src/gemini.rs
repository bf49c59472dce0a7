use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
const TEXT_MODEL: &str = "gemini-3-flash-preview";
const IMAGE_MODEL: &str = "gemini-3-pro-image-preview";

// Image generation can take tens of seconds; this bounds the worst case.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("gemini returned status {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("gemini blocked the request on safety grounds")]
    SafetyBlocked,

    #[error("gemini response contained no usable content")]
    Empty,
}

/// Client for the generative model service. Constructed once at startup and
/// injected into the components that need it; absence of a key means the
/// owning component runs in fallback mode instead.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            base_url: GEMINI_API_URL.to_string(),
        }
    }

    /// Point the client at a different host. Used by tests to stand in a
    /// fake upstream.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Single-shot text generation against the flash model.
    pub async fn generate_text(&self, prompt: &str, temperature: f32) -> Result<String, GeminiError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent::from_text(prompt)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                temperature: Some(temperature),
                response_modalities: None,
            }),
            safety_settings: None,
        };

        let response = self.generate(TEXT_MODEL, &request).await?;
        let candidate = response.candidates.into_iter().next().ok_or(GeminiError::Empty)?;
        candidate
            .into_parts()
            .into_iter()
            .filter(|part| !part.thought)
            .find_map(|part| part.text)
            .ok_or(GeminiError::Empty)
    }

    /// Image generation against the image model. The dangerous-content
    /// threshold is pinned to the strictest level; this is a kids' product.
    pub async fn generate_image(
        &self,
        prompt: &str,
        system_instruction: &str,
    ) -> Result<ImageCandidate, GeminiError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent::from_text(prompt)],
            system_instruction: Some(RequestContent::from_text(system_instruction)),
            generation_config: Some(GenerationConfig {
                temperature: None,
                response_modalities: Some(vec!["TEXT".to_string(), "IMAGE".to_string()]),
            }),
            safety_settings: Some(vec![SafetySetting {
                category: "HARM_CATEGORY_DANGEROUS_CONTENT".to_string(),
                threshold: "BLOCK_LOW_AND_ABOVE".to_string(),
            }]),
        };

        let response = self.generate(IMAGE_MODEL, &request).await?;
        let candidate = match response.candidates.into_iter().next() {
            Some(c) if c.finish_reason.as_deref() != Some("SAFETY") => c,
            _ => return Err(GeminiError::SafetyBlocked),
        };

        let mut result = ImageCandidate { title: None, image: None };
        for part in candidate.into_parts() {
            // Skip internal reasoning parts; they aren't user-facing output.
            if part.thought {
                continue;
            }
            if let Some(text) = part.text {
                result.title = Some(text.trim().to_string());
            }
            if let Some(inline) = part.inline_data {
                result.image = Some(InlineImage {
                    mime_type: inline.mime_type,
                    data: inline.data,
                });
            }
        }
        Ok(result)
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        let response = self
            .http
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api { status, body });
        }

        Ok(response.json().await?)
    }
}

/// Text and inline image extracted from the first candidate.
#[derive(Debug)]
pub struct ImageCandidate {
    pub title: Option<String>,
    pub image: Option<InlineImage>,
}

#[derive(Debug)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<RequestContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    safety_settings: Option<Vec<SafetySetting>>,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

impl RequestContent {
    fn from_text(text: &str) -> Self {
        Self {
            parts: vec![RequestPart { text: text.to_string() }],
        }
    }
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
}

#[derive(Serialize)]
struct SafetySetting {
    category: String,
    threshold: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

impl Candidate {
    fn into_parts(self) -> Vec<CandidatePart> {
        self.content.map(|c| c.parts).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CandidatePart {
    text: Option<String>,
    inline_data: Option<InlineData>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}
