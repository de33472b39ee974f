//! Network-free archetype timelines.
//!
//! When the completion service is unreachable or returns nothing usable,
//! the orchestrator serves three hand-authored archetypes instead: "The Hard
//! Road", "Golden Cage", and "Wandering Path". The output satisfies every
//! invariant a model-generated simulation does (three slots, consecutive
//! years, exact event count), so downstream code never has to special-case
//! it.
//!
//! Each archetype pool holds [`Horizon::MAX`] templates, so any allowed
//! horizon is served in full. Mood scores are drawn from
//! [`MOOD_SCORE_RANGE`] so charts do not look flat.

use parallel_types::{
    EventId, FinalSnapshot, Horizon, Mood, SimulationDraft, Timeline, TimelineEvent, TimelineSlot,
};
use rand::Rng;

use crate::defaults;
use crate::year::year_at;

/// Range fallback mood scores are drawn from.
pub const MOOD_SCORE_RANGE: core::ops::Range<u8> = 40..80;

/// Paraphrase used for fallback simulations.
pub const FALLBACK_SUMMARY: &str = "A choice that echoes through time";

/// Closing reflection used for fallback simulations.
pub const FALLBACK_INSIGHT: &str = "Every path has its own beauty and its own burdens. \
The question is not which path is best, but which path is yours.";

/// A pre-authored event without a year or score.
#[derive(Debug, Clone, Copy)]
struct EventTemplate {
    title: &'static str,
    description: &'static str,
    mood: Mood,
}

/// A pre-authored snapshot.
#[derive(Debug, Clone, Copy)]
struct SnapshotTemplate {
    career: &'static str,
    location: &'static str,
    relationship: &'static str,
    key_achievement: &'static str,
    biggest_regret: &'static str,
    happiness_score: u8,
    wealth_score: u8,
    growth_score: u8,
    quote: &'static str,
}

/// One hand-authored fallback timeline.
#[derive(Debug, Clone, Copy)]
struct Archetype {
    name: &'static str,
    emoji: &'static str,
    description: &'static str,
    events: [EventTemplate; 10],
    snapshot: SnapshotTemplate,
}

const fn ev(title: &'static str, description: &'static str, mood: Mood) -> EventTemplate {
    EventTemplate {
        title,
        description,
        mood,
    }
}

const HARD_ROAD: Archetype = Archetype {
    name: "The Hard Road",
    emoji: "\u{1F3D4}\u{FE0F}",
    description: "A challenging path with great rewards",
    events: [
        ev(
            "The Fall",
            "Everything seemed to crumble at once. The weight of the decision settled in.",
            Mood::Struggling,
        ),
        ev(
            "Rock Bottom",
            "A moment of clarity found in the deepest valley.",
            Mood::Struggling,
        ),
        ev(
            "The Turn",
            "Something shifted. A door opened where there was only wall.",
            Mood::TurningPoint,
        ),
        ev(
            "Rising Slowly",
            "Each step forward felt earned, not given.",
            Mood::Hopeful,
        ),
        ev(
            "New Heights",
            "Looking back, the struggle became the foundation.",
            Mood::Thriving,
        ),
        ev(
            "Old Doubts",
            "Success brought new questions about what it had cost.",
            Mood::Chaotic,
        ),
        ev(
            "Steady Ground",
            "The pace eased. There was finally room to breathe.",
            Mood::Peaceful,
        ),
        ev(
            "Giving Back",
            "Hard lessons became something worth passing on.",
            Mood::Hopeful,
        ),
        ev(
            "Second Summit",
            "A bigger challenge, met with a steadier hand.",
            Mood::Thriving,
        ),
        ev(
            "The View",
            "Every scar told part of a story worth having lived.",
            Mood::Peaceful,
        ),
    ],
    snapshot: SnapshotTemplate {
        career: "Self-Made Entrepreneur",
        location: "A bustling city of dreams",
        relationship: "Late but lasting love",
        key_achievement: "Built something from nothing",
        biggest_regret: "The years lost to the climb",
        happiness_score: 75,
        wealth_score: 85,
        growth_score: 90,
        quote: "The hardest climbs lead to the best views.",
    },
};

const GOLDEN_CAGE: Archetype = Archetype {
    name: "Golden Cage",
    emoji: "\u{1F3C6}",
    description: "Success on paper, emptiness within",
    events: [
        ev(
            "Easy Wins",
            "Success came quickly, almost too easily.",
            Mood::Thriving,
        ),
        ev(
            "Golden Days",
            "Everything clicked. Life felt like a streak of luck.",
            Mood::Thriving,
        ),
        ev(
            "The Hush",
            "A quiet settled in. Something felt missing.",
            Mood::Peaceful,
        ),
        ev(
            "Hollow Echo",
            "The achievements lost their shine.",
            Mood::Struggling,
        ),
        ev(
            "Breaking Point",
            "The foundation cracked from within.",
            Mood::Chaotic,
        ),
        ev(
            "Hard Questions",
            "For the first time, the question was why rather than what next.",
            Mood::TurningPoint,
        ),
        ev(
            "Loosening Grip",
            "Letting go of one thing made room for another.",
            Mood::Hopeful,
        ),
        ev(
            "Old Friends",
            "Reconnecting with people who knew the earlier self.",
            Mood::Peaceful,
        ),
        ev(
            "Gilded Habits",
            "Comfort pulled back toward the familiar climb.",
            Mood::Struggling,
        ),
        ev(
            "An Open Door",
            "The cage was never locked. Stepping out was the hard part.",
            Mood::Hopeful,
        ),
    ],
    snapshot: SnapshotTemplate {
        career: "Corporate Leader",
        location: "A prestigious neighborhood",
        relationship: "Distant memories",
        key_achievement: "Reached the top of the ladder",
        biggest_regret: "Forgot to ask why I was climbing",
        happiness_score: 45,
        wealth_score: 95,
        growth_score: 50,
        quote: "I had everything, except what mattered.",
    },
};

const WANDERING_PATH: Archetype = Archetype {
    name: "Wandering Path",
    emoji: "\u{1F33F}",
    description: "Unconventional but fulfilling",
    events: [
        ev(
            "Small Steps",
            "No dramatic turns, just steady movement forward.",
            Mood::Hopeful,
        ),
        ev(
            "Quiet Growth",
            "Changes happened slowly, almost invisibly.",
            Mood::Peaceful,
        ),
        ev(
            "Crossroads",
            "A choice that seemed small changed everything.",
            Mood::TurningPoint,
        ),
        ev(
            "Finding Flow",
            "Things started to align naturally.",
            Mood::Hopeful,
        ),
        ev(
            "Quiet Joy",
            "Not flashy, but deeply, genuinely good.",
            Mood::Thriving,
        ),
        ev(
            "Restless Season",
            "The old itch to move returned, unsettling the calm.",
            Mood::Chaotic,
        ),
        ev(
            "Putting Down Roots",
            "Choosing to stay turned out to be its own adventure.",
            Mood::Peaceful,
        ),
        ev(
            "Lean Year",
            "Money ran thin, and the trade-offs became real.",
            Mood::Struggling,
        ),
        ev(
            "Shared Table",
            "A small circle became a second family.",
            Mood::Thriving,
        ),
        ev(
            "Full Circle",
            "The winding road made sense when seen from here.",
            Mood::Peaceful,
        ),
    ],
    snapshot: SnapshotTemplate {
        career: "Creative Freedom",
        location: "Somewhere that feels like home",
        relationship: "Deep, genuine connections",
        key_achievement: "Found my own definition of success",
        biggest_regret: "Sometimes wondering \"what if\"",
        happiness_score: 80,
        wealth_score: 70,
        growth_score: 75,
        quote: "Contentment is its own kind of success.",
    },
};

const fn archetype(slot: TimelineSlot) -> &'static Archetype {
    match slot {
        TimelineSlot::A => &HARD_ROAD,
        TimelineSlot::B => &GOLDEN_CAGE,
        TimelineSlot::C => &WANDERING_PATH,
    }
}

impl SnapshotTemplate {
    fn to_snapshot(self) -> FinalSnapshot {
        FinalSnapshot {
            career: self.career.to_owned(),
            location: self.location.to_owned(),
            relationship: self.relationship.to_owned(),
            key_achievement: self.key_achievement.to_owned(),
            biggest_regret: self.biggest_regret.to_owned(),
            happiness_score: self.happiness_score,
            wealth_score: self.wealth_score,
            growth_score: self.growth_score,
            quote: self.quote.to_owned(),
        }
    }
}

/// Build the fallback timeline for one slot.
///
/// Takes the first `horizon` templates of the slot's archetype, dated
/// `decision_year + index`.
pub fn fallback_timeline<R: Rng>(
    slot: TimelineSlot,
    horizon: Horizon,
    decision_year: i32,
    rng: &mut R,
) -> Timeline {
    let archetype = archetype(slot);

    let events = archetype
        .events
        .iter()
        .take(horizon.event_count())
        .enumerate()
        .map(|(i, template)| TimelineEvent {
            id: EventId::new(),
            year: year_at(decision_year, i),
            title: template.title.to_owned(),
            description: template.description.to_owned(),
            mood: template.mood,
            mood_score: rng.random_range(MOOD_SCORE_RANGE),
        })
        .collect();

    Timeline {
        id: slot,
        name: archetype.name.to_owned(),
        emoji: archetype.emoji.to_owned(),
        description: archetype.description.to_owned(),
        events,
        final_snapshot: archetype.snapshot.to_snapshot(),
    }
}

/// Build a complete fallback simulation using the thread-local RNG.
pub fn fallback_simulation(decision: &str, horizon: Horizon, decision_year: i32) -> SimulationDraft {
    fallback_simulation_with(decision, horizon, decision_year, &mut rand::rng())
}

/// Build a complete fallback simulation with an explicit RNG.
pub fn fallback_simulation_with<R: Rng>(
    decision: &str,
    horizon: Horizon,
    decision_year: i32,
    rng: &mut R,
) -> SimulationDraft {
    SimulationDraft {
        decision: decision.to_owned(),
        decision_year,
        decision_summary: FALLBACK_SUMMARY.to_owned(),
        years_to_simulate: horizon.years(),
        timelines: TimelineSlot::ALL.map(|slot| fallback_timeline(slot, horizon, decision_year, rng)),
        insight: FALLBACK_INSIGHT.to_owned(),
    }
}

/// Whether a title is a known placeholder rather than generated content.
///
/// Matches the normalizer's default title and every fallback archetype
/// title.
pub fn is_placeholder_title(title: &str) -> bool {
    title == defaults::TIMELINE_EVENT.title
        || TimelineSlot::ALL
            .iter()
            .any(|slot| archetype(*slot).events.iter().any(|e| e.title == title))
}

/// Content heuristic for flagging degraded output in the UI.
///
/// Looks only at the first event of the first timeline; structurally a
/// degraded simulation is indistinguishable from a generated one.
pub fn looks_degraded(timelines: &[Timeline; 3]) -> bool {
    let [first, _, _] = timelines;
    first
        .events
        .first()
        .is_some_and(|event| is_placeholder_title(&event.title))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn every_horizon_yields_exact_counts_and_years() {
        let mut rng = SmallRng::seed_from_u64(7);
        for years in Horizon::ALLOWED {
            let horizon = Horizon::new(years).unwrap_or_default();
            let draft = fallback_simulation_with("Took the job", horizon, 2018, &mut rng);

            assert_eq!(draft.years_to_simulate, years);
            for (timeline, slot) in draft.timelines.iter().zip(TimelineSlot::ALL) {
                assert_eq!(timeline.id, slot);
                assert_eq!(timeline.events.len(), horizon.event_count());
                assert!(timeline.years_are_consecutive_from(2018));
            }
        }
    }

    #[test]
    fn mood_scores_stay_in_range() {
        let mut rng = SmallRng::seed_from_u64(99);
        let draft = fallback_simulation_with("x", Horizon::new(10).unwrap_or_default(), 2000, &mut rng);
        for timeline in &draft.timelines {
            for event in &timeline.events {
                assert!(MOOD_SCORE_RANGE.contains(&event.mood_score));
            }
        }
    }

    #[test]
    fn archetypes_keep_their_identity() {
        let mut rng = SmallRng::seed_from_u64(1);
        let draft = fallback_simulation_with("x", Horizon::DEFAULT, 2020, &mut rng);
        let names: Vec<&str> = draft.timelines.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["The Hard Road", "Golden Cage", "Wandering Path"]);
        let [_, golden, _] = &draft.timelines;
        assert_eq!(golden.final_snapshot.wealth_score, 95);
        assert_eq!(draft.decision_summary, FALLBACK_SUMMARY);
    }

    #[test]
    fn decision_text_is_carried_through() {
        let draft = fallback_simulation("Moved to the coast in 2016", Horizon::DEFAULT, 2016);
        assert_eq!(draft.decision, "Moved to the coast in 2016");
        assert_eq!(draft.decision_year, 2016);
    }

    #[test]
    fn fallback_output_looks_degraded() {
        let draft = fallback_simulation("x", Horizon::DEFAULT, 2020);
        assert!(looks_degraded(&draft.timelines));
    }

    #[test]
    fn generated_titles_do_not_look_degraded() {
        let mut draft = fallback_simulation("x", Horizon::DEFAULT, 2020);
        let [first, _, _] = &mut draft.timelines;
        if let Some(event) = first.events.first_mut() {
            event.title = String::from("A Bold Leap");
        }
        assert!(!looks_degraded(&draft.timelines));
    }
}
