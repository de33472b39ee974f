use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use parallel_runner::{GenerationSource, Orchestrator, RunnerConfig};
use parallel_store::{JsonFileStore, SimulationStore};
use parallel_types::{Horizon, Simulation, SimulationId};

use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct GenerateArgs {
    /// The decision, e.g. "In 2019 I turned down the job in Berlin"
    pub decision: String,

    /// Years to simulate (3, 5, 7, or 10)
    #[arg(long, default_value = "5", value_parser = parse_horizon)]
    pub years: Horizon,

    /// Print without saving to the store
    #[arg(long)]
    pub no_save: bool,
}

fn parse_horizon(s: &str) -> Result<Horizon, String> {
    let years: u32 = s.trim().parse().map_err(|e| format!("{e}"))?;
    Horizon::new(years).map_err(|e| e.to_string())
}

pub async fn run(
    args: &GenerateArgs,
    config: &RunnerConfig,
    store: &JsonFileStore,
    format: OutputFormat,
) -> Result<()> {
    let decision = args.decision.trim();
    if decision.is_empty() {
        anyhow::bail!("Decision text is empty");
    }

    let orchestrator =
        Orchestrator::from_config(config).context("Failed to set up the completion backend")?;
    let generated = orchestrator.generate_timelines(decision, args.years).await;
    let fallback = generated.source == GenerationSource::Fallback;

    let simulation = if args.no_save {
        Simulation::from_draft(generated.value, SimulationId::new(), Utc::now())
    } else {
        store
            .save(generated.value)
            .await
            .with_context(|| format!("Failed to save to {}", store.dir().display()))?
    };

    output::print_simulation(&simulation, fallback, format)
}
