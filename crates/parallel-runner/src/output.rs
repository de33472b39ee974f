use std::fmt::Write as _;

use anyhow::{Context, Result};
use parallel_core::Comparison;
use parallel_types::{BranchEvent, Simulation, Timeline};
use serde::Serialize;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

const DEGRADED_NOTE: &str = "(offline fallback: the generator was unavailable)";

fn print_json(value: &impl Serialize) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to encode output")?;
    println!("{text}");
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Flagged<'a, T> {
    degraded: bool,
    #[serde(flatten)]
    value: &'a T,
}

pub fn print_simulation(simulation: &Simulation, degraded: bool, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&Flagged {
            degraded,
            value: simulation,
        }),
        OutputFormat::Text => {
            print!("{}", simulation_text(simulation, degraded));
            Ok(())
        }
    }
}

pub fn print_timeline(timeline: &Timeline, degraded: bool, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&Flagged {
            degraded,
            value: timeline,
        }),
        OutputFormat::Text => {
            let mut text = String::new();
            if degraded {
                let _ = writeln!(text, "{DEGRADED_NOTE}\n");
            }
            write_timeline(&mut text, timeline);
            print!("{text}");
            Ok(())
        }
    }
}

pub fn print_list(simulations: &[Simulation], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&simulations),
        OutputFormat::Text => {
            if simulations.is_empty() {
                println!("No simulations yet.");
            }
            for sim in simulations {
                println!(
                    "{}  {}  {}y from {}  {}",
                    sim.id,
                    sim.created_at.format("%Y-%m-%d %H:%M"),
                    sim.years_to_simulate,
                    sim.decision_year,
                    sim.decision
                );
            }
            Ok(())
        }
    }
}

pub fn print_comparison(
    simulation: &Simulation,
    comparison: &Comparison,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(comparison),
        OutputFormat::Text => {
            let mut text = String::new();
            let _ = writeln!(
                text,
                "{:<4}{:<28}{:>10}{:>8}{:>8}{:>9}",
                "", "Path", "Happiness", "Wealth", "Growth", "Overall"
            );
            for card in &comparison.cards {
                let _ = writeln!(
                    text,
                    "{:<4}{:<28}{:>10}{:>8}{:>8}{:>9}",
                    card.slot,
                    format!("{} {}", card.emoji, card.name),
                    card.happiness,
                    card.wealth,
                    card.growth,
                    card.overall
                );
            }
            let best = simulation.timeline(comparison.best_overall);
            let happiest = simulation.timeline(comparison.happiest);
            let _ = writeln!(text, "\nBest overall: {} {}", best.emoji, best.name);
            let _ = writeln!(text, "Happiest:     {} {}", happiest.emoji, happiest.name);
            print!("{text}");
            Ok(())
        }
    }
}

pub fn print_branches(records: &[BranchEvent], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&records),
        OutputFormat::Text => {
            if records.is_empty() {
                println!("No branches recorded.");
            }
            for record in records {
                println!(
                    "{}  timeline {}  {} \"{}\" -> \"{}\" ({} events)",
                    record.created_at.format("%Y-%m-%d %H:%M"),
                    record.timeline,
                    record.parent_event_year,
                    record.parent_event_title,
                    record.alternate_choice,
                    record.follow_up_events.len()
                );
            }
            Ok(())
        }
    }
}

fn simulation_text(simulation: &Simulation, degraded: bool) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "{}", simulation.decision_summary);
    let _ = writeln!(
        text,
        "Decision ({}): {}",
        simulation.decision_year, simulation.decision
    );
    let _ = writeln!(text, "ID: {}", simulation.id);
    if degraded {
        let _ = writeln!(text, "{DEGRADED_NOTE}");
    }

    for timeline in &simulation.timelines {
        text.push('\n');
        write_timeline(&mut text, timeline);
    }

    let _ = writeln!(text, "\n\u{201C}{}\u{201D}", simulation.insight);
    text
}

fn write_timeline(text: &mut String, timeline: &Timeline) {
    let _ = writeln!(
        text,
        "[{}] {} {} -- {}",
        timeline.id, timeline.emoji, timeline.name, timeline.description
    );
    for event in &timeline.events {
        let _ = writeln!(
            text,
            "  {}  {:<28} {:<13} {:>3}  {}",
            event.year, event.title, event.mood, event.mood_score, event.description
        );
        let _ = writeln!(text, "        id {}", event.id);
    }

    let s = &timeline.final_snapshot;
    let _ = writeln!(
        text,
        "  => {} in {}; {}",
        s.career, s.location, s.relationship
    );
    let _ = writeln!(
        text,
        "     best: {} / regret: {}",
        s.key_achievement, s.biggest_regret
    );
    let _ = writeln!(
        text,
        "     happiness {} / wealth {} / growth {}",
        s.happiness_score, s.wealth_score, s.growth_score
    );
    let _ = writeln!(text, "     \"{}\"", s.quote);
}
