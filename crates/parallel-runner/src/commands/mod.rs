pub mod branch;
pub mod generate;
pub mod manage;

use clap::{Args, Subcommand};
use parallel_types::SimulationId;

#[derive(Subcommand)]
pub enum Commands {
    /// Generate three timelines from a decision
    Generate(generate::GenerateArgs),
    /// Re-decide one event and regenerate the timeline from there
    Branch(branch::BranchArgs),
    /// List stored simulations (most recent first)
    List,
    /// Show a stored simulation
    Show(IdArgs),
    /// Delete a stored simulation
    Delete(IdArgs),
    /// Compare final scores across the three timelines
    Compare(IdArgs),
    /// Print a plain-text summary for sharing
    Share(IdArgs),
    /// Show the branch history of a simulation
    Branches(IdArgs),
}

#[derive(Args)]
pub struct IdArgs {
    /// Simulation ID
    pub id: SimulationId,
}
