//! Gemini API client
//!
//! Direct HTTP client for the Gemini generateContent endpoint. The pipeline
//! uses it for both generation calls: synthesizing place candidates for an
//! area and narrating nearby-search results.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Client for the Gemini completion endpoint
///
/// Holds the shared `reqwest::Client` (connection pooling), the credential,
/// and the base URL. Tests point `base_url` at a mock server.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a client for the given credential, base URL, and model name
    pub fn new(http: reqwest::Client, api_key: String, base_url: String, model: String) -> Self {
        Self {
            http,
            api_key,
            base_url,
            model,
        }
    }

    /// Submit a prompt and return the model's text response
    ///
    /// # Errors
    /// Returns `AppError::Internal` when the API key is empty, the HTTP
    /// request fails, the response cannot be parsed, or the response carries
    /// no text content.
    pub async fn generate(&self, prompt: &str) -> Result<String, AppError> {
        if self.api_key.is_empty() {
            return Err(AppError::Internal(anyhow!("Gemini API key is empty")));
        }

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        tracing::debug!(
            model = %self.model,
            prompt_len = prompt.len(),
            "Calling Gemini API"
        );

        let response = self
            .http
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            tracing::error!(
                status_code = status.as_u16(),
                error_body = %error_body,
                "Gemini API returned error status"
            );
            return Err(AppError::Upstream(format!(
                "Gemini API returned status {}: {}",
                status.as_u16(),
                error_body
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to read Gemini response: {}", e)))?;

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            AppError::Upstream(format!(
                "Failed to parse Gemini response: {} - body: {}",
                e, body
            ))
        })?;

        if let Some(feedback) = &parsed.prompt_feedback {
            if let Some(reason) = &feedback.block_reason {
                return Err(AppError::Upstream(format!(
                    "Gemini blocked the prompt: {}",
                    reason
                )));
            }
        }

        let text = parsed
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.clone())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| AppError::Upstream("Gemini response contains no text".to_string()))?;

        tracing::debug!(response_len = text.len(), "Gemini response received");
        Ok(text)
    }
}

#[derive(Serialize, Debug)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Serialize, Debug)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize, Debug)]
struct RequestPart {
    text: String,
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize, Debug)]
struct ResponseCandidate {
    content: ResponseContent,
}

#[derive(Deserialize, Debug)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    text: String,
}

#[derive(Deserialize, Debug)]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}
