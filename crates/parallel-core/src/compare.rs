//! Score comparison across the three timelines and the share summary.

use std::fmt::Write as _;

use parallel_types::{Simulation, Timeline, TimelineSlot};
use serde::Serialize;

/// Final scores of one timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCard {
    /// Which timeline.
    pub slot: TimelineSlot,
    /// Timeline display name.
    pub name: String,
    /// Timeline emoji.
    pub emoji: String,
    /// Final happiness score.
    pub happiness: u8,
    /// Final wealth score.
    pub wealth: u8,
    /// Final growth score.
    pub growth: u8,
    /// Mean of the three scores, rounded half up.
    pub overall: u8,
}

impl ScoreCard {
    fn from_timeline(timeline: &Timeline) -> Self {
        let snapshot = &timeline.final_snapshot;
        Self {
            slot: timeline.id,
            name: timeline.name.clone(),
            emoji: timeline.emoji.clone(),
            happiness: snapshot.happiness_score,
            wealth: snapshot.wealth_score,
            growth: snapshot.growth_score,
            overall: rounded_mean(
                snapshot.happiness_score,
                snapshot.wealth_score,
                snapshot.growth_score,
            ),
        }
    }
}

/// Side-by-side scores of a simulation's timelines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    /// One card per timeline, in slot order.
    pub cards: [ScoreCard; 3],
    /// Highest `overall`; the earlier slot wins ties.
    pub best_overall: TimelineSlot,
    /// Highest happiness; the earlier slot wins ties.
    pub happiest: TimelineSlot,
}

/// Compare the final snapshots of a simulation's timelines.
pub fn compare(simulation: &Simulation) -> Comparison {
    let cards = simulation.timelines.each_ref().map(ScoreCard::from_timeline);
    let best_overall = first_max_by(&cards, |card| card.overall);
    let happiest = first_max_by(&cards, |card| card.happiness);

    Comparison {
        cards,
        best_overall,
        happiest,
    }
}

/// A plain-text summary suitable for pasting elsewhere.
pub fn share_text(simulation: &Simulation) -> String {
    let comparison = compare(simulation);
    let mut text = format!("PARALLEL: What if?\n\nDecision: \"{}\"\n\n", simulation.decision);

    for card in &comparison.cards {
        let _ = writeln!(
            text,
            "Path {}: {} \u{2192} Happiness {}%",
            card.slot, card.name, card.happiness
        );
    }

    let _ = write!(
        text,
        "\nBest path: {}\n\n\"{}\"",
        simulation.timeline(comparison.happiest).name,
        simulation.insight
    );
    text
}

#[allow(clippy::arithmetic_side_effects)]
fn rounded_mean(a: u8, b: u8, c: u8) -> u8 {
    // Sum of three u8 fits in u16; a third of a sum is never exactly .5.
    let sum = u16::from(a) + u16::from(b) + u16::from(c);
    u8::try_from((sum + 1) / 3).unwrap_or(u8::MAX)
}

fn first_max_by(cards: &[ScoreCard; 3], key: impl Fn(&ScoreCard) -> u8) -> TimelineSlot {
    let mut best = TimelineSlot::A;
    let mut best_key = None;
    for card in cards {
        let value = key(card);
        if best_key.is_none_or(|current| value > current) {
            best = card.slot;
            best_key = Some(value);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use parallel_types::{Horizon, SimulationId};

    use super::*;
    use crate::fallback::fallback_simulation;

    fn with_scores(scores: [(u8, u8, u8); 3]) -> Simulation {
        let mut draft = fallback_simulation("Took the offer in 2020", Horizon::DEFAULT, 2020);
        for (timeline, (h, w, g)) in draft.timelines.iter_mut().zip(scores) {
            timeline.final_snapshot.happiness_score = h;
            timeline.final_snapshot.wealth_score = w;
            timeline.final_snapshot.growth_score = g;
        }
        draft.insight = String::from("Roads diverge.");
        Simulation::from_draft(draft, SimulationId::new(), Utc::now())
    }

    #[test]
    fn overall_rounds_the_mean() {
        assert_eq!(rounded_mean(50, 50, 50), 50);
        assert_eq!(rounded_mean(50, 50, 51), 50);
        assert_eq!(rounded_mean(50, 51, 51), 51);
        assert_eq!(rounded_mean(100, 100, 100), 100);
        assert_eq!(rounded_mean(0, 0, 1), 0);
    }

    #[test]
    fn best_and_happiest_are_tracked_separately() {
        let sim = with_scores([(60, 90, 90), (95, 10, 10), (70, 70, 70)]);
        let comparison = compare(&sim);
        assert_eq!(comparison.best_overall, TimelineSlot::A);
        assert_eq!(comparison.happiest, TimelineSlot::B);
    }

    #[test]
    fn ties_go_to_the_earlier_slot() {
        let sim = with_scores([(40, 40, 40), (80, 80, 80), (80, 80, 80)]);
        let comparison = compare(&sim);
        assert_eq!(comparison.best_overall, TimelineSlot::B);
        assert_eq!(comparison.happiest, TimelineSlot::B);
    }

    #[test]
    fn share_text_lists_paths_and_insight() {
        let sim = with_scores([(10, 0, 0), (20, 0, 0), (90, 0, 0)]);
        let text = share_text(&sim);
        assert!(text.starts_with("PARALLEL: What if?"));
        assert!(text.contains("Decision: \"Took the offer in 2020\""));
        assert!(text.contains("Path A: "));
        assert!(text.contains("Happiness 90%"));
        let happiest = &sim.timeline(TimelineSlot::C).name;
        assert!(text.contains(&format!("Best path: {happiest}")));
        assert!(text.ends_with("\"Roads diverge.\""));
    }
}
