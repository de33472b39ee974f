use anyhow::{Context, Result};
use clap::Args;
use parallel_core::{EventSelector, branch_count, splice};
use parallel_runner::{BranchRequest, GenerationSource, Orchestrator, RunnerConfig};
use parallel_store::{BranchLog, JsonFileStore, SimulationStore};
use parallel_types::{BranchDraft, EventId, SimulationId, TimelineSlot};

use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct BranchArgs {
    /// Simulation ID
    pub id: SimulationId,

    /// Timeline to branch (A, B, or C)
    #[arg(long)]
    pub timeline: TimelineSlot,

    /// Event to branch from, by ID
    #[arg(long, conflicts_with_all = ["year", "title"], required_unless_present = "year")]
    pub event_id: Option<EventId>,

    /// Event to branch from, by year (with --title)
    #[arg(long, requires = "title")]
    pub year: Option<i32>,

    /// Event to branch from, by title (with --year)
    #[arg(long, requires = "year")]
    pub title: Option<String>,

    /// What you would have done instead
    #[arg(long)]
    pub choice: String,
}

impl BranchArgs {
    fn selector(&self) -> Option<EventSelector> {
        match (self.event_id, self.year, &self.title) {
            (Some(id), _, _) => Some(EventSelector::Id(id)),
            (None, Some(year), Some(title)) => Some(EventSelector::YearTitle {
                year,
                title: title.clone(),
            }),
            _ => None,
        }
    }
}

pub async fn run(
    args: &BranchArgs,
    config: &RunnerConfig,
    store: &JsonFileStore,
    format: OutputFormat,
) -> Result<()> {
    let choice = args.choice.trim();
    if choice.is_empty() {
        anyhow::bail!("Alternate choice is empty");
    }

    let simulation = store
        .get(args.id)
        .await
        .context("Failed to read the store")?
        .with_context(|| format!("No simulation with id {}", args.id))?;

    let selector = args
        .selector()
        .context("Give --event-id, or both --year and --title")?;
    let timeline = simulation.timeline(args.timeline);
    let event_index = selector
        .resolve(timeline)
        .with_context(|| format!("No such event in timeline {}", args.timeline))?;
    let event = timeline
        .events
        .get(event_index)
        .with_context(|| format!("No such event in timeline {}", args.timeline))?
        .clone();

    let orchestrator =
        Orchestrator::from_config(config).context("Failed to set up the completion backend")?;
    let generated = orchestrator
        .generate_branch(&BranchRequest {
            decision: &simulation.decision,
            event_year: event.year,
            event_title: &event.title,
            event_description: &event.description,
            alternate_choice: choice,
            count: branch_count(timeline, event_index),
        })
        .await;

    let fallback = generated.source == GenerationSource::Fallback;
    let outcome = generated.value;

    let updated = splice(
        simulation,
        args.timeline.index(),
        event_index,
        outcome.events.clone(),
        outcome.snapshot,
    )?;

    store
        .replace(&updated)
        .await
        .context("Failed to save the branched simulation")?;
    store
        .append_branch(
            updated.id,
            BranchDraft {
                timeline: args.timeline,
                parent_event_id: Some(event.id),
                parent_event_year: event.year,
                parent_event_title: event.title,
                alternate_choice: choice.to_owned(),
                follow_up_events: outcome.events,
            },
        )
        .await
        .context("Failed to record the branch")?;

    output::print_timeline(updated.timeline(args.timeline), fallback, format)
}
