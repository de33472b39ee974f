use anyhow::{Context, Result};
use parallel_core::{compare as compare_scores, looks_degraded, share_text};
use parallel_store::{BranchLog, JsonFileStore, SimulationStore};
use parallel_types::Simulation;

use super::IdArgs;
use crate::output::{self, OutputFormat};

async fn load(args: &IdArgs, store: &JsonFileStore) -> Result<Simulation> {
    store
        .get(args.id)
        .await
        .context("Failed to read the store")?
        .with_context(|| format!("No simulation with id {}", args.id))
}

pub async fn list(store: &JsonFileStore, format: OutputFormat) -> Result<()> {
    let simulations = store.list().await.context("Failed to read the store")?;
    output::print_list(&simulations, format)
}

pub async fn show(args: &IdArgs, store: &JsonFileStore, format: OutputFormat) -> Result<()> {
    let simulation = load(args, store).await?;
    let degraded = looks_degraded(&simulation.timelines);
    output::print_simulation(&simulation, degraded, format)
}

pub async fn delete(args: &IdArgs, store: &JsonFileStore) -> Result<()> {
    let removed = store
        .delete(args.id)
        .await
        .context("Failed to update the store")?;
    if removed {
        println!("Deleted {}", args.id);
    } else {
        println!("Nothing to delete for {}", args.id);
    }
    Ok(())
}

pub async fn compare(args: &IdArgs, store: &JsonFileStore, format: OutputFormat) -> Result<()> {
    let simulation = load(args, store).await?;
    output::print_comparison(&simulation, &compare_scores(&simulation), format)
}

pub async fn share(args: &IdArgs, store: &JsonFileStore) -> Result<()> {
    let simulation = load(args, store).await?;
    println!("{}", share_text(&simulation));
    Ok(())
}

pub async fn branches(args: &IdArgs, store: &JsonFileStore, format: OutputFormat) -> Result<()> {
    let records = store
        .branches_for(args.id)
        .await
        .context("Failed to read the store")?;
    output::print_branches(&records, format)
}
