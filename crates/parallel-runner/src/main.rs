//! `parallel` -- explore the lives you never lived.
//!
//! Describe a decision and get three alternate timelines, then branch any
//! event with a different choice. Simulations are kept in a local JSON
//! store (20 most recent).
//!
//! ```text
//! parallel generate "In 2019 I turned down the job in Berlin" --years 5
//! parallel list
//! parallel branch <id> --timeline B --year 2021 --title "Rock Bottom" --choice "Asked for help"
//! parallel compare <id>
//! ```

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use parallel_runner::RunnerConfig;
use parallel_store::JsonFileStore;
use tracing_subscriber::EnvFilter;

use crate::commands::Commands;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "parallel",
    version,
    about = "Generate three alternate-life timelines from a decision and branch them"
)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Directory for the JSON store files
    #[arg(long, global = true)]
    store_dir: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Full configuration, needed only by commands that call the backend.
fn backend_config() -> Result<RunnerConfig> {
    RunnerConfig::from_env().context("Invalid configuration")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let store_dir = cli
        .store_dir
        .clone()
        .unwrap_or_else(RunnerConfig::store_dir_from_env);
    let store = JsonFileStore::open(&store_dir);

    match &cli.command {
        Commands::Generate(args) => {
            let config = backend_config()?;
            commands::generate::run(args, &config, &store, cli.format).await
        }
        Commands::Branch(args) => {
            let config = backend_config()?;
            commands::branch::run(args, &config, &store, cli.format).await
        }
        Commands::List => commands::manage::list(&store, cli.format).await,
        Commands::Show(args) => commands::manage::show(args, &store, cli.format).await,
        Commands::Delete(args) => commands::manage::delete(args, &store).await,
        Commands::Compare(args) => commands::manage::compare(args, &store, cli.format).await,
        Commands::Share(args) => commands::manage::share(args, &store).await,
        Commands::Branches(args) => commands::manage::branches(args, &store, cli.format).await,
    }
}
