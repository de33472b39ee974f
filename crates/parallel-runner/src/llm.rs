//! Text completion service abstraction and HTTP implementations.
//!
//! The orchestrator is generic over [`CompletionService`] so tests can
//! script responses. Production uses [`LlmBackend`], an enum over the
//! OpenAI-compatible and Anthropic wire formats, both over `reqwest`.
//!
//! Exactly one HTTP attempt is made per call. A non-success status, a
//! network error, a timeout, or a body without text content is an error
//! and the caller falls back.

use std::future::Future;

use serde_json::Value;

use crate::config::{BackendType, LlmBackendConfig};
use crate::error::RunnerError;
use crate::prompt::RenderedPrompt;

/// Something that turns a prompt into completion text.
pub trait CompletionService: Send + Sync {
    /// Send a prompt and return the raw completion text.
    fn complete(
        &self,
        prompt: &RenderedPrompt,
    ) -> impl Future<Output = Result<String, RunnerError>> + Send;
}

// ---------------------------------------------------------------------------
// Unified backend enum
// ---------------------------------------------------------------------------

/// A configured HTTP completion backend.
#[derive(Debug)]
pub enum LlmBackend {
    /// OpenAI-compatible chat completions API.
    OpenAi(OpenAiBackend),
    /// Anthropic Messages API.
    Anthropic(AnthropicBackend),
}

impl LlmBackend {
    /// Human-readable name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::OpenAi(_) => "openai-compatible",
            Self::Anthropic(_) => "anthropic",
        }
    }
}

impl CompletionService for LlmBackend {
    async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, RunnerError> {
        match self {
            Self::OpenAi(backend) => backend.complete(prompt).await,
            Self::Anthropic(backend) => backend.complete(prompt).await,
        }
    }
}

/// Connection settings shared by both wire formats.
#[derive(Debug)]
struct Endpoint {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl Endpoint {
    fn new(config: &LlmBackendConfig) -> Result<Self, RunnerError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RunnerError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    /// Send the request and return the decoded JSON body of a success.
    async fn send(
        &self,
        label: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<Value, RunnerError> {
        let response = request
            .send()
            .await
            .map_err(|e| RunnerError::LlmBackend(format!("{label} request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_owned());
            return Err(RunnerError::LlmBackend(format!(
                "{label} returned {status}: {error_body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| RunnerError::LlmBackend(format!("{label} response parse failed: {e}")))
    }
}

// ---------------------------------------------------------------------------
// OpenAI-compatible backend
// ---------------------------------------------------------------------------

/// Backend for OpenAI-compatible chat completions APIs.
///
/// Sends requests to `{api_url}/chat/completions`.
#[derive(Debug)]
pub struct OpenAiBackend {
    endpoint: Endpoint,
}

impl OpenAiBackend {
    /// Create a new OpenAI-compatible backend.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Config`] if the HTTP client cannot be built.
    pub fn new(config: &LlmBackendConfig) -> Result<Self, RunnerError> {
        Ok(Self {
            endpoint: Endpoint::new(config)?,
        })
    }

    async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, RunnerError> {
        let endpoint = &self.endpoint;
        let url = format!("{}/chat/completions", endpoint.api_url);

        let body = serde_json::json!({
            "model": endpoint.model,
            "messages": [
                {"role": "system", "content": prompt.system},
                {"role": "user", "content": prompt.user}
            ],
            "temperature": endpoint.temperature,
            "max_tokens": endpoint.max_tokens
        });

        let mut request = endpoint.client.post(&url).json(&body);
        if let Some(key) = &endpoint.api_key {
            request = request.bearer_auth(key);
        }

        let json = endpoint.send("OpenAI", request).await?;
        extract_openai_content(&json)
    }
}

/// Extract the text content from an `OpenAI` chat completions response.
fn extract_openai_content(json: &Value) -> Result<String, RunnerError> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            RunnerError::LlmBackend("OpenAI response missing choices[0].message.content".to_owned())
        })
}

// ---------------------------------------------------------------------------
// Anthropic Messages API backend
// ---------------------------------------------------------------------------

/// Backend for the Anthropic Messages API.
///
/// The system prompt is a top-level field, auth is `x-api-key`, and the
/// text lives at `content[0].text`.
#[derive(Debug)]
pub struct AnthropicBackend {
    endpoint: Endpoint,
}

impl AnthropicBackend {
    /// Create a new Anthropic Messages API backend.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Config`] if the HTTP client cannot be built.
    pub fn new(config: &LlmBackendConfig) -> Result<Self, RunnerError> {
        Ok(Self {
            endpoint: Endpoint::new(config)?,
        })
    }

    async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, RunnerError> {
        let endpoint = &self.endpoint;
        let url = format!("{}/messages", endpoint.api_url);

        let body = serde_json::json!({
            "model": endpoint.model,
            "max_tokens": endpoint.max_tokens,
            "temperature": endpoint.temperature,
            "system": prompt.system,
            "messages": [
                {"role": "user", "content": prompt.user}
            ]
        });

        let mut request = endpoint
            .client
            .post(&url)
            .header("anthropic-version", "2023-06-01")
            .json(&body);
        if let Some(key) = &endpoint.api_key {
            request = request.header("x-api-key", key);
        }

        let json = endpoint.send("Anthropic", request).await?;
        extract_anthropic_content(&json)
    }
}

/// Extract the text content from an Anthropic Messages API response.
fn extract_anthropic_content(json: &Value) -> Result<String, RunnerError> {
    json.get("content")
        .and_then(|c| c.get(0))
        .and_then(|b| b.get("text"))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            RunnerError::LlmBackend("Anthropic response missing content[0].text".to_owned())
        })
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Create a backend from configuration.
///
/// # Errors
///
/// Returns [`RunnerError::Config`] if the HTTP client cannot be built.
pub fn create_backend(config: &LlmBackendConfig) -> Result<LlmBackend, RunnerError> {
    Ok(match config.backend_type {
        BackendType::OpenAi => LlmBackend::OpenAi(OpenAiBackend::new(config)?),
        BackendType::Anthropic => LlmBackend::Anthropic(AnthropicBackend::new(config)?),
    })
}
