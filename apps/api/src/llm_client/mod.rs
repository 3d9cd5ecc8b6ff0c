/// LLM Client — the single point of entry for all LLM backend calls.
///
/// ARCHITECTURAL RULE: No other module may call an LLM backend directly.
/// All LLM interactions MUST go through a `CompletionProvider`.
///
/// Two backends are supported: a local Ollama instance (role-based
/// generation) and the Gemini API (resume-based generation). Handlers only
/// ever see the trait, so the pairing of path to backend lives entirely in
/// `main.rs` wiring.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Total wait applied to every backend call. Once exceeded the request is
/// abandoned and reported as a timeout; a call never blocks past this bound.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("request timed out after {}s", REQUEST_TIMEOUT.as_secs())]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("backend returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("provider error: {0}")]
    Provider(String),

    #[error("backend returned empty response text")]
    EmptyResponse,
}

impl CompletionError {
    fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            CompletionError::Timeout
        } else {
            CompletionError::Transport(e.to_string())
        }
    }

    /// Transient failures worth a bounded retry. A timeout is not retried:
    /// the caller has already waited the full `REQUEST_TIMEOUT`.
    fn is_retryable(&self) -> bool {
        match self {
            CompletionError::Transport(_) => true,
            CompletionError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// A text-completion backend: given a prompt, produce response text, fallibly.
/// The response is returned raw; extracting JSON out of it is the
/// generation module's job.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Runs `attempt` up to `MAX_RETRIES` times with exponential backoff
/// (1s, 2s) on transient errors. Non-transient errors return immediately.
async fn complete_with_retries<F, Fut>(
    provider: &str,
    attempt: F,
) -> Result<String, CompletionError>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<String, CompletionError>>,
{
    let mut last_error = None;

    for n in 0..MAX_RETRIES {
        if n > 0 {
            let delay = Duration::from_millis(1000 * (1 << (n - 1)));
            warn!(
                "{provider} call attempt {n} failed, retrying after {}ms...",
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
        }

        match attempt().await {
            Ok(text) => return Ok(text),
            Err(e) if e.is_retryable() => last_error = Some(e),
            Err(e) => return Err(e),
        }
    }

    Err(last_error.unwrap_or(CompletionError::EmptyResponse))
}

fn build_http_client() -> Client {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("Failed to build HTTP client")
}

// ────────────────────────────────────────────────────────────────────────────
// Ollama (role-based generation)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

/// Client for a local Ollama instance's `/api/generate` endpoint.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            client: build_http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    async fn call_once(&self, prompt: &str) -> Result<String, CompletionError> {
        let request_body = OllamaRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request_body)
            .send()
            .await
            .map_err(CompletionError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: OllamaResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Provider(format!("malformed response envelope: {e}")))?;

        let text = envelope.response.trim().to_string();
        if text.is_empty() {
            return Err(CompletionError::EmptyResponse);
        }

        debug!("Ollama call succeeded: {} chars of response text", text.len());
        Ok(text)
    }
}

#[async_trait]
impl CompletionProvider for OllamaClient {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        complete_with_retries(self.name(), || self.call_once(prompt)).await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini (resume-based generation)
// ────────────────────────────────────────────────────────────────────────────

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiRequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiRequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Client for the Gemini `generateContent` API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: build_http_client(),
            api_key,
            model,
        }
    }

    async fn call_once(&self, prompt: &str) -> Result<String, CompletionError> {
        let request_body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiRequestPart { text: prompt }],
            }],
        };

        let url = format!("{GEMINI_API_BASE}/{}:generateContent", self.model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(CompletionError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_gemini_error(status, body));
        }

        let envelope: GeminiResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Provider(format!("malformed response envelope: {e}")))?;

        let text = envelope
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text)
            .map(|t| t.trim().to_string())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(CompletionError::EmptyResponse);
        }

        debug!("Gemini call succeeded: {} chars of response text", text.len());
        Ok(text)
    }
}

/// Maps a non-2xx Gemini reply to a `CompletionError`.
///
/// Gemini wraps every error, 429s and 5xx included, in its
/// `{"error": {"message": ...}}` envelope. Transient statuses must stay
/// `Status` so the retry predicate sees them; only terminal client errors
/// surface the envelope message as a provider error.
fn classify_gemini_error(status: reqwest::StatusCode, body: String) -> CompletionError {
    if status.as_u16() != 429 && !status.is_server_error() {
        if let Ok(e) = serde_json::from_str::<GeminiError>(&body) {
            return CompletionError::Provider(e.error.message);
        }
    }
    CompletionError::Status {
        status: status.as_u16(),
        message: body,
    }
}

#[async_trait]
impl CompletionProvider for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        complete_with_retries(self.name(), || self.call_once(prompt)).await
    }
}
