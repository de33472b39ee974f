//! Generation orchestrator: prompt, one completion call, normalize or fall
//! back.
//!
//! ```text
//! decision --> year extraction --> PromptEngine --> CompletionService
//!                                                       |
//!                      Ok(text) --> normalize ----------+--> Model
//!                      Err / Unparsable --> fallback ------> Fallback
//! ```
//!
//! Both operations are total. Transport failures, template errors, and
//! unparsable responses are logged and replaced with fallback output; no
//! error reaches the caller. There is no retry.

use chrono::{Datelike, Utc};
use parallel_core::{
    BranchOutcome, NormalizeRequest, extract_decision_year, fallback_branch, fallback_simulation,
    normalize, normalize_branch,
};
use parallel_types::{Horizon, SimulationDraft};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::RunnerConfig;
use crate::error::RunnerError;
use crate::llm::{CompletionService, LlmBackend, create_backend};
use crate::prompt::{BranchPrompt, PromptEngine, TimelinePrompt};
use crate::tracker::{RequestToken, RequestTracker};

/// Where a generated value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationSource {
    /// Normalized from a completion.
    Model,
    /// Produced locally after a failure.
    Fallback,
}

/// A generation result stamped with its request token and source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated<T> {
    /// Token issued when the request started.
    pub token: RequestToken,
    /// Whether the value came from the model or the fallback.
    pub source: GenerationSource,
    /// The generated value.
    pub value: T,
}

/// Inputs to a branch regeneration.
#[derive(Debug, Clone, Copy)]
pub struct BranchRequest<'a> {
    /// The simulation's original decision text.
    pub decision: &'a str,
    /// Year of the event being re-decided; first year of the new events.
    pub event_year: i32,
    /// Title of the event being re-decided.
    pub event_title: &'a str,
    /// Description of the event being re-decided.
    pub event_description: &'a str,
    /// What the user would have done instead.
    pub alternate_choice: &'a str,
    /// Number of replacement events.
    pub count: usize,
}

/// Drives full and branch generation against a completion service.
#[derive(Debug)]
pub struct Orchestrator<C> {
    service: C,
    prompts: PromptEngine,
    tracker: RequestTracker,
    current_year: Option<i32>,
}

impl Orchestrator<LlmBackend> {
    /// Build an orchestrator with the configured HTTP backend and templates.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Config`] or [`RunnerError::Template`] if the
    /// backend or the templates cannot be set up.
    pub fn from_config(config: &RunnerConfig) -> Result<Self, RunnerError> {
        let backend = create_backend(&config.backend)?;
        let prompts = PromptEngine::new(config.templates_dir.as_deref())?;
        info!(
            backend = backend.name(),
            model = config.backend.model,
            api_url = config.backend.api_url,
            "completion backend configured"
        );
        Ok(Self::new(backend, prompts))
    }
}

impl<C: CompletionService> Orchestrator<C> {
    /// Create an orchestrator over any completion service.
    pub const fn new(service: C, prompts: PromptEngine) -> Self {
        Self {
            service,
            prompts,
            tracker: RequestTracker::new(),
            current_year: None,
        }
    }

    /// Pin the current year instead of reading the clock.
    #[must_use]
    pub const fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = Some(year);
        self
    }

    /// The tracker issuing this orchestrator's request tokens.
    pub const fn tracker(&self) -> &RequestTracker {
        &self.tracker
    }

    /// The underlying completion service.
    pub const fn service(&self) -> &C {
        &self.service
    }

    fn current_year(&self) -> i32 {
        self.current_year.unwrap_or_else(|| Utc::now().year())
    }

    /// Generate three timelines for a decision.
    ///
    /// The decision year is the first year in `1990..=current + 1`
    /// mentioned in `decision`, else the current year. The same year is
    /// used by the fallback.
    pub async fn generate_timelines(
        &self,
        decision: &str,
        horizon: Horizon,
    ) -> Generated<SimulationDraft> {
        let token = self.tracker.issue();
        let current_year = self.current_year();
        let decision_year = extract_decision_year(decision, current_year).unwrap_or(current_year);

        info!(
            %token,
            decision_year,
            years = horizon.years(),
            "generating timelines"
        );

        match self.request_timelines(decision, decision_year, horizon).await {
            Ok(draft) => {
                debug!(%token, "timelines normalized from completion");
                Generated {
                    token,
                    source: GenerationSource::Model,
                    value: draft,
                }
            }
            Err(e) => {
                warn!(%token, error = %e, "timeline generation failed, using fallback");
                Generated {
                    token,
                    source: GenerationSource::Fallback,
                    value: fallback_simulation(decision, horizon, decision_year),
                }
            }
        }
    }

    async fn request_timelines(
        &self,
        decision: &str,
        decision_year: i32,
        horizon: Horizon,
    ) -> Result<SimulationDraft, RunnerError> {
        let prompt = self.prompts.render_timelines(&TimelinePrompt {
            decision,
            start_year: decision_year,
            years: horizon.years(),
        })?;
        let raw = self.service.complete(&prompt).await?;
        let request = NormalizeRequest {
            decision,
            decision_year,
            horizon,
        };
        Ok(normalize(&raw, &request)?)
    }

    /// Regenerate a timeline from one event onward.
    ///
    /// Returns exactly `count` events dated from `event_year`, plus a
    /// replacement snapshot.
    pub async fn generate_branch(&self, request: &BranchRequest<'_>) -> Generated<BranchOutcome> {
        let token = self.tracker.issue();
        info!(
            %token,
            event_year = request.event_year,
            count = request.count,
            "generating branch"
        );

        match self.request_branch(request).await {
            Ok(outcome) => Generated {
                token,
                source: GenerationSource::Model,
                value: outcome,
            },
            Err(e) => {
                warn!(%token, error = %e, "branch generation failed, using fallback");
                Generated {
                    token,
                    source: GenerationSource::Fallback,
                    value: fallback_branch(request.alternate_choice, request.event_year, request.count),
                }
            }
        }
    }

    async fn request_branch(&self, request: &BranchRequest<'_>) -> Result<BranchOutcome, RunnerError> {
        let prompt = self.prompts.render_branch(&BranchPrompt {
            decision: request.decision,
            event_year: request.event_year,
            event_title: request.event_title,
            event_description: request.event_description,
            alternate_choice: request.alternate_choice,
            count: request.count,
        })?;
        let raw = self.service.complete(&prompt).await?;
        Ok(normalize_branch(&raw, request.event_year, request.count)?)
    }
}
