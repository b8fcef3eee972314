//! Gemini client for story and card generation
//!
//! Every request asks for a JSON response (`responseMimeType`). Calls are
//! never retried; after each successful call the client pauses for the
//! configured pacing interval to stay under the service's rate limits.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::application::ports::outbound::{ContentGenerator, GeneratorError};
use crate::infrastructure::config::AiConfig;

const QUOTA_STATUS: &str = "RESOURCE_EXHAUSTED";

/// Client for the Gemini `generateContent` API
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    generation_config: GenerationConfig,
    pacing: Duration,
}

impl GeminiClient {
    pub fn new(config: &AiConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/models/{}:generateContent",
                config.base_url.trim_end_matches('/'),
                config.model
            ),
            api_key,
            generation_config: GenerationConfig {
                temperature: config.temperature,
                top_p: config.top_p,
                top_k: config.top_k,
                max_output_tokens: config.max_output_tokens,
                response_mime_type: "application/json",
            },
            pacing: Duration::from_millis(config.pacing_ms),
        })
    }

    async fn send(&self, prompt: &str) -> Result<String, GeneratorError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: &self.generation_config,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(classify_transport_error)?;
            return Err(classify_status(status, &body));
        }

        let body: GenerateContentResponse =
            response.json().await.map_err(classify_transport_error)?;
        let text = body.text();
        if text.trim().is_empty() {
            return Err(GeneratorError::ServiceUnavailable(
                "response contained no text".to_string(),
            ));
        }
        Ok(text)
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
        match self.send(prompt).await {
            Ok(text) => {
                debug!(response_len = text.len(), "Gemini call succeeded");
                if !self.pacing.is_zero() {
                    tokio::time::sleep(self.pacing).await;
                }
                Ok(text)
            }
            Err(e) => {
                warn!(error = %e, "Gemini call failed");
                Err(e)
            }
        }
    }
}

fn classify_transport_error(e: reqwest::Error) -> GeneratorError {
    if e.is_timeout() {
        GeneratorError::Timeout
    } else {
        GeneratorError::ServiceUnavailable(e.to_string())
    }
}

fn classify_status(status: StatusCode, body: &str) -> GeneratorError {
    let detail = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error);
    let quota = status == StatusCode::TOO_MANY_REQUESTS
        || detail
            .as_ref()
            .is_some_and(|d| d.status.as_deref() == Some(QUOTA_STATUS));
    let message = detail
        .and_then(|d| d.message)
        .unwrap_or_else(|| format!("HTTP {}", status));
    if quota {
        GeneratorError::QuotaExceeded(message)
    } else {
        GeneratorError::ServiceUnavailable(message)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: &'a GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, all parts joined
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
    status: Option<String>,
}
