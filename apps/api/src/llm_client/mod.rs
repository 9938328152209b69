//! LLM Client — the single point of entry for all generation calls in Folio.
//!
//! ARCHITECTURAL RULE: No other module may call the model endpoint directly.
//! All LLM interactions MUST go through a `TextGenerator`.
//!
//! The default backend is `OllamaClient` (the `/api/generate` endpoint of a
//! local Ollama server). Pipeline code only ever sees the trait, so an
//! alternate model-serving backend can be swapped in at startup without
//! touching the adapters.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

/// Request timeout for a single generation call. A timeout surfaces as
/// `LlmError::Http`, i.e. a generation failure — never a silent fallback.
const GENERATE_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);

/// Default cap on generated tokens, matching the summarizer's needs.
const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 500;
const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Per-call generation knobs.
#[derive(Debug, Clone)]
pub struct GenOptions {
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl Default for GenOptions {
    fn default() -> Self {
        Self {
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Output of a single generation call. The text payload is optional because
/// a backend may answer 200 with no text; callers decide whether that is an
/// error (locator) or a sentinel (summarizer).
#[derive(Debug, Clone)]
pub struct Generation {
    text: Option<String>,
}

impl Generation {
    pub fn new(text: Option<String>) -> Self {
        Self { text }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// The generation backend trait. Implement this to swap model-serving
/// endpoints without touching the locator, summarizer, or pipeline code.
///
/// Carried in `AppState` as `Arc<dyn TextGenerator>`. Implementations issue
/// exactly one attempt per call; retry policy, if any, belongs to callers.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, options: &GenOptions) -> Result<Generation, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Ollama backend
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    num_predict: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: Option<String>,
}

/// The default `TextGenerator`, backed by Ollama's non-streaming
/// `/api/generate` endpoint.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    host: String,
    model: String,
}

impl OllamaClient {
    pub fn new(host: String, model: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(GENERATE_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            host,
            model,
        }
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str, options: &GenOptions) -> Result<Generation, LlmError> {
        let url = format!("{}/api/generate", self.host);
        let request_body = OllamaRequest {
            model: &self.model,
            prompt,
            system: prompts::BOOK_ASSISTANT_SYSTEM,
            stream: false,
            options: OllamaOptions {
                num_predict: options.max_output_tokens,
                temperature: options.temperature,
            },
        };

        let response = self.client.post(&url).json(&request_body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: OllamaResponse = response.json().await?;

        debug!(
            "LLM call succeeded: model={}, response_chars={}",
            self.model,
            body.response.as_deref().map(str::len).unwrap_or(0)
        );

        Ok(Generation::new(body.response))
    }
}
