//! Generation runtime for Parallel.
//!
//! Wires the pure pipeline in `parallel-core` to a real text completion
//! service: configuration, HTTP backends, prompt templates, and the
//! [`Orchestrator`] exposing full and branch generation. The `parallel`
//! binary in this crate is the command-line front end.
//!
//! # Modules
//!
//! - [`config`] -- Environment-driven configuration
//! - [`llm`] -- The [`CompletionService`] seam and HTTP backends
//! - [`prompt`] -- `minijinja` prompt templates
//! - [`orchestrator`] -- Generation with normalize-or-fallback routing
//! - [`tracker`] -- Request tokens for discarding stale results
//! - [`error`] -- Runner error types

pub mod config;
pub mod error;
pub mod llm;
pub mod orchestrator;
pub mod prompt;
pub mod tracker;

pub use config::{BackendType, LlmBackendConfig, RunnerConfig};
pub use error::RunnerError;
pub use llm::{CompletionService, LlmBackend, create_backend};
pub use orchestrator::{BranchRequest, Generated, GenerationSource, Orchestrator};
pub use prompt::{PromptEngine, RenderedPrompt};
pub use tracker::{RequestToken, RequestTracker};
