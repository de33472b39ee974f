//! Error types for the generation runner.
//!
//! None of these reach callers of the orchestrator's generation
//! operations; they are logged and replaced with fallback output. They do
//! surface from configuration loading and backend construction.

use parallel_core::Unparsable;

/// Errors that can occur while preparing or performing a generation call.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Failed to load or render a prompt template.
    #[error("template error: {0}")]
    Template(String),

    /// The completion service returned an error or was unreachable.
    #[error("LLM backend error: {0}")]
    LlmBackend(String),

    /// The completion could not be turned into timelines or events.
    #[error("response parse error: {0}")]
    Parse(#[from] Unparsable),

    /// Configuration is invalid.
    #[error("config error: {0}")]
    Config(String),
}
