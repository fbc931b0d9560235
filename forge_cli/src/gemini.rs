//! HTTP client for the generative-language review service.
//!
//! Implements [`DocumentAnalyzer`] against the `models/{model}:generateContent`
//! endpoint. The document travels inline as base64 next to the instruction
//! text; the reply is the concatenated text parts of the first candidate.

use std::thread;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use forge_core::review::{DocumentAnalyzer, DocumentBlob, ModelProfile, ReviewSettings};
use forge_core::{CalcError, CalcResult};
use reqwest::blocking::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Current application version (from Cargo.toml)
const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    Inline { inline_data: InlineData<'a> },
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
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
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Blocking client for the review service
pub struct GeminiClient {
    http: Client,
    endpoint: String,
    api_key: String,
    max_retries: u32,
    backoff: Duration,
}

impl GeminiClient {
    /// Build a client from review settings.
    ///
    /// Fails before any request if the API key is missing.
    pub fn new(settings: &ReviewSettings, api_key: Option<String>) -> CalcResult<Self> {
        Self::with_builder(settings, api_key, Client::builder())
    }

    fn with_builder(settings: &ReviewSettings, api_key: Option<String>, builder: ClientBuilder) -> CalcResult<Self> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| CalcError::config_error("GOOGLE_API_KEY is not set (environment, .env, or --api-key)"))?;

        let http = builder
            .user_agent(format!("Forgequote/{}", CURRENT_VERSION))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| CalcError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(GeminiClient {
            http,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            api_key,
            max_retries: settings.max_retries,
            backoff: Duration::from_secs(1),
        })
    }

    /// Base delay between retries; doubles on each attempt
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    fn url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, model)
    }
}

impl DocumentAnalyzer for GeminiClient {
    fn analyze(&self, profile: &ModelProfile, instructions: &str, document: &DocumentBlob) -> CalcResult<String> {
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Part::Text { text: instructions },
                    Part::Inline {
                        inline_data: InlineData {
                            mime_type: document.media_type.mime(),
                            data: STANDARD.encode(&document.data),
                        },
                    },
                ],
            }],
        };
        let url = self.url(&profile.model);
        let failed = |reason: String| CalcError::review_failed(&profile.name, reason);

        let mut last_error = String::from("no attempt made");

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.backoff * (1u32 << (attempt - 1).min(16));
                warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %last_error,
                    "review request failed, retrying"
                );
                thread::sleep(delay);
            }

            debug!(url = %url, attempt, "POST generateContent");
            let response = match self
                .http
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = format!("Network error: {}", e);
                    continue;
                }
            };

            let status = response.status();
            let text = response.text().map_err(|e| failed(format!("Failed to read response: {}", e)))?;

            if status.as_u16() == 429 || status.is_server_error() {
                last_error = format!("HTTP {}: {}", status.as_u16(), error_message(&text));
                continue;
            }
            if !status.is_success() {
                return Err(failed(format!("HTTP {}: {}", status.as_u16(), error_message(&text))));
            }

            let parsed: GenerateResponse =
                serde_json::from_str(&text).map_err(|e| failed(format!("Failed to parse response: {}", e)))?;
            return extract_text(parsed).map_err(failed);
        }

        Err(failed(format!(
            "gave up after {} retries: {}",
            self.max_retries, last_error
        )))
    }
}

/// Service error message from an error body, or the raw body
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// Concatenate the text parts of the first candidate
fn extract_text(response: GenerateResponse) -> Result<String, String> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates".to_string());
        return Err(format!("Request blocked: {}", reason));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(format!("Empty reply (finish reason: {})", reason));
    }
    Ok(text)
}
