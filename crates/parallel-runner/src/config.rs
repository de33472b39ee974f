//! Configuration types for the runner and CLI.
//!
//! All configuration comes from environment variables. Loading goes
//! through a lookup function so tests can supply values without touching
//! the process environment.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::RunnerError;

/// Default OpenAI-compatible endpoint base.
pub const DEFAULT_API_URL: &str = "https://gen.pollinations.ai/v1";

/// Default model name sent to the endpoint.
pub const DEFAULT_MODEL: &str = "openai";

/// Default store directory, relative to the working directory.
pub const DEFAULT_STORE_DIR: &str = ".parallel";

/// Complete runner configuration.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Text completion backend.
    pub backend: LlmBackendConfig,
    /// Directory overriding the embedded prompt templates.
    pub templates_dir: Option<PathBuf>,
    /// Directory holding the JSON store files.
    pub store_dir: PathBuf,
}

/// Configuration for the text completion backend.
#[derive(Debug, Clone)]
pub struct LlmBackendConfig {
    /// The wire protocol spoken by the endpoint.
    pub backend_type: BackendType,
    /// Base API URL (e.g. `https://gen.pollinations.ai/v1`).
    pub api_url: String,
    /// API key. No auth header is sent when absent.
    pub api_key: Option<String>,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Completion token cap.
    pub max_tokens: u32,
    /// Whole-request HTTP timeout. Expiry counts as a transport failure.
    pub timeout: Duration,
}

/// Supported completion API flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// `OpenAI`-compatible chat completions (Pollinations, `OpenAI`, Ollama).
    OpenAi,
    /// Anthropic Messages API.
    Anthropic,
}

impl FromStr for BackendType {
    type Err = RunnerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "pollinations" | "ollama" => Ok(Self::OpenAi),
            "anthropic" | "claude" => Ok(Self::Anthropic),
            other => Err(RunnerError::Config(format!("unknown backend type: {other}"))),
        }
    }
}

impl RunnerConfig {
    /// Load configuration from the process environment.
    ///
    /// Variables (all optional):
    /// - `LLM_BACKEND` -- `openai` or `anthropic` (default `openai`)
    /// - `LLM_API_URL` -- API base URL (default [`DEFAULT_API_URL`])
    /// - `LLM_API_KEY` -- API key (required for `anthropic`)
    /// - `LLM_MODEL` -- model name (default [`DEFAULT_MODEL`])
    /// - `LLM_TEMPERATURE` -- sampling temperature (default `0.7`)
    /// - `LLM_MAX_TOKENS` -- completion token cap (default `4096`)
    /// - `LLM_TIMEOUT_MS` -- request timeout in milliseconds (default `60000`)
    /// - `TEMPLATES_DIR` -- prompt template directory (embedded by default)
    /// - `PARALLEL_STORE_DIR` -- store directory (default [`DEFAULT_STORE_DIR`])
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Config`] for unparsable values.
    pub fn from_env() -> Result<Self, RunnerError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve only the store directory from the process environment.
    ///
    /// Never fails, so commands that only touch the store work without a
    /// usable backend configuration.
    pub fn store_dir_from_env() -> PathBuf {
        Self::store_dir_from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve only the store directory through a variable lookup.
    pub fn store_dir_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
        lookup("PARALLEL_STORE_DIR")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STORE_DIR), PathBuf::from)
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Config`] for unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RunnerError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let backend_type: BackendType = var("LLM_BACKEND")
            .map_or(Ok(BackendType::OpenAi), |v| v.parse())?;
        let api_key = var("LLM_API_KEY");

        if backend_type == BackendType::Anthropic && api_key.is_none() {
            return Err(RunnerError::Config(
                "LLM_API_KEY is required for the anthropic backend".to_owned(),
            ));
        }

        let temperature: f32 = parse_or(var("LLM_TEMPERATURE"), "LLM_TEMPERATURE", 0.7)?;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(RunnerError::Config(format!(
                "invalid LLM_TEMPERATURE: {temperature} is outside 0.0..=2.0"
            )));
        }

        let max_tokens: u32 = parse_or(var("LLM_MAX_TOKENS"), "LLM_MAX_TOKENS", 4096)?;
        let timeout_ms: u64 = parse_or(var("LLM_TIMEOUT_MS"), "LLM_TIMEOUT_MS", 60_000)?;

        let backend = LlmBackendConfig {
            backend_type,
            api_url: var("LLM_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_owned())
                .trim_end_matches('/')
                .to_owned(),
            api_key,
            model: var("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            temperature,
            max_tokens,
            timeout: Duration::from_millis(timeout_ms),
        };

        Ok(Self {
            backend,
            templates_dir: var("TEMPLATES_DIR").map(PathBuf::from),
            store_dir: Self::store_dir_from_lookup(&lookup),
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or<T>(value: Option<String>, name: &str, default: T) -> Result<T, RunnerError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.map_or(Ok(default), |v| {
        v.trim()
            .parse()
            .map_err(|e| RunnerError::Config(format!("invalid {name}: {e}")))
    })
}
