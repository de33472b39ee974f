//! Core schema structs: events, snapshots, timelines, simulations, and
//! branch audit records.
//!
//! Field names are camelCase on the wire so persisted data and the web
//! client share one JSON shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Mood, TimelineSlot};
use crate::ids::{BranchId, EventId, SimulationId};

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// One narrative beat within a timeline.
///
/// Within a timeline, `year` values are consecutive ascending integers
/// starting at the decision year. The year is always assigned locally,
/// never copied from generated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TimelineEvent {
    /// Stable identity assigned when the event is created.
    #[serde(default)]
    pub id: EventId,
    /// Calendar year of the event.
    pub year: i32,
    /// Short title, a few words.
    pub title: String,
    /// Free-text description of what happened.
    pub description: String,
    /// Emotional tone.
    pub mood: Mood,
    /// Intensity of the mood, 0 to 100.
    pub mood_score: u8,
}

// ---------------------------------------------------------------------------
// Final snapshot
// ---------------------------------------------------------------------------

/// Terminal-state summary of a timeline.
///
/// Fields are independent; there are no cross-field invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct FinalSnapshot {
    /// Where the career ended up.
    pub career: String,
    /// Where life is lived.
    pub location: String,
    /// Relationship status.
    pub relationship: String,
    /// The proudest outcome.
    pub key_achievement: String,
    /// The deepest regret.
    pub biggest_regret: String,
    /// 0 to 100.
    pub happiness_score: u8,
    /// 0 to 100.
    pub wealth_score: u8,
    /// 0 to 100.
    pub growth_score: u8,
    /// A reflective closing line.
    pub quote: String,
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// One of the three parallel branches of a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Timeline {
    /// Slot identity, stable within a simulation.
    pub id: TimelineSlot,
    /// Display name, e.g. "The Hard Road".
    pub name: String,
    /// Display emoji.
    pub emoji: String,
    /// Flavor text.
    pub description: String,
    /// Ordered yearly events.
    pub events: Vec<TimelineEvent>,
    /// Where this path ends up.
    pub final_snapshot: FinalSnapshot,
}

impl Timeline {
    /// Index of the first event matching `(year, title)`.
    ///
    /// Two events sharing both year and title are ambiguous; the lowest
    /// index wins. Prefer [`Timeline::position_of`] when the event id is
    /// known.
    pub fn locate_event(&self, year: i32, title: &str) -> Option<usize> {
        self.events
            .iter()
            .position(|event| event.year == year && event.title == title)
    }

    /// Index of the event with the given stable id.
    pub fn position_of(&self, id: EventId) -> Option<usize> {
        self.events.iter().position(|event| event.id == id)
    }

    /// Whether event years run `start, start + 1, ...` without gaps.
    pub fn years_are_consecutive_from(&self, start: i32) -> bool {
        let mut expected = Some(start);
        for event in &self.events {
            if expected != Some(event.year) {
                return false;
            }
            expected = event.year.checked_add(1);
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// Every simulation field except the identity assigned at save time.
///
/// This is what the generation pipeline produces; the persistence layer
/// turns it into a [`Simulation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SimulationDraft {
    /// The user's original decision text.
    pub decision: String,
    /// Year the decision was made; the first event of every timeline.
    pub decision_year: i32,
    /// Short paraphrase of the decision.
    pub decision_summary: String,
    /// Number of yearly events per timeline.
    pub years_to_simulate: u32,
    /// Exactly three timelines, slots `A`, `B`, `C` in order.
    pub timelines: [Timeline; 3],
    /// Closing reflection.
    pub insight: String,
}

/// A generated, persisted simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Simulation {
    /// Unique id, assigned at save time.
    pub id: SimulationId,
    /// The user's original decision text.
    pub decision: String,
    /// Year the decision was made; the first event of every timeline.
    pub decision_year: i32,
    /// Short paraphrase of the decision.
    pub decision_summary: String,
    /// Number of yearly events per timeline.
    pub years_to_simulate: u32,
    /// Exactly three timelines, slots `A`, `B`, `C` in order.
    pub timelines: [Timeline; 3],
    /// Closing reflection.
    pub insight: String,
    /// When the simulation was saved.
    pub created_at: DateTime<Utc>,
}

impl Simulation {
    /// Attach an identity to a generated draft.
    pub fn from_draft(draft: SimulationDraft, id: SimulationId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            decision: draft.decision,
            decision_year: draft.decision_year,
            decision_summary: draft.decision_summary,
            years_to_simulate: draft.years_to_simulate,
            timelines: draft.timelines,
            insight: draft.insight,
            created_at,
        }
    }

    /// The timeline occupying a slot.
    pub fn timeline(&self, slot: TimelineSlot) -> &Timeline {
        let [a, b, c] = &self.timelines;
        match slot {
            TimelineSlot::A => a,
            TimelineSlot::B => b,
            TimelineSlot::C => c,
        }
    }
}

// ---------------------------------------------------------------------------
// Branch audit records
// ---------------------------------------------------------------------------

/// A branch operation before it is stamped with an id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchDraft {
    /// Timeline the branch was applied to.
    pub timeline: TimelineSlot,
    /// Stable id of the event that was replaced, when known.
    #[serde(default)]
    pub parent_event_id: Option<EventId>,
    /// Year of the event that was replaced.
    pub parent_event_year: i32,
    /// Title of the event that was replaced.
    pub parent_event_title: String,
    /// The user's alternate choice.
    pub alternate_choice: String,
    /// The events that now follow the branch point.
    pub follow_up_events: Vec<TimelineEvent>,
}

/// Append-only audit record of a single branch operation.
///
/// Informational only; never read back into generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct BranchEvent {
    /// Unique id of this record.
    pub id: BranchId,
    /// Timeline the branch was applied to.
    pub timeline: TimelineSlot,
    /// Stable id of the event that was replaced, when known.
    #[serde(default)]
    pub parent_event_id: Option<EventId>,
    /// Year of the event that was replaced.
    pub parent_event_year: i32,
    /// Title of the event that was replaced.
    pub parent_event_title: String,
    /// The user's alternate choice.
    pub alternate_choice: String,
    /// The events that now follow the branch point.
    pub follow_up_events: Vec<TimelineEvent>,
    /// When the branch was applied.
    pub created_at: DateTime<Utc>,
}

impl BranchEvent {
    /// Stamp a draft with an id and timestamp.
    pub fn from_draft(draft: BranchDraft, id: BranchId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            timeline: draft.timeline,
            parent_event_id: draft.parent_event_id,
            parent_event_year: draft.parent_event_year,
            parent_event_title: draft.parent_event_title,
            alternate_choice: draft.alternate_choice,
            follow_up_events: draft.follow_up_events,
            created_at,
        }
    }
}
