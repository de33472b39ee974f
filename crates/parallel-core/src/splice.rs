//! Merging branch events into an existing simulation.
//!
//! A splice keeps the addressed timeline's events before the branch point,
//! replaces everything from the branch point onward with the new events,
//! and swaps in the new snapshot whole. The other two timelines and every
//! top-level field pass through untouched.
//!
//! Year consecutiveness of the result is the producer's job; the branch
//! path already dates new events from the branch event's year.

use parallel_types::{EventId, FinalSnapshot, Simulation, Timeline, TimelineEvent};

use crate::error::SpliceError;

/// How the caller addresses the event a branch starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventSelector {
    /// The event's stable id.
    Id(EventId),
    /// Structural match on year and title; the lowest index wins.
    YearTitle {
        /// Event year.
        year: i32,
        /// Event title, matched exactly.
        title: String,
    },
}

impl EventSelector {
    /// Index of the selected event in `timeline`, if present.
    pub fn resolve(&self, timeline: &Timeline) -> Option<usize> {
        match self {
            Self::Id(id) => timeline.position_of(*id),
            Self::YearTitle { year, title } => timeline.locate_event(*year, title),
        }
    }
}

/// Number of events a branch at `event_index` regenerates.
pub fn branch_count(timeline: &Timeline, event_index: usize) -> usize {
    timeline.events.len().saturating_sub(event_index)
}

/// Splice `new_events` into timeline `timeline_index` at `event_index`.
///
/// `event_index` may equal the timeline's length, in which case every
/// original event is kept and `new_events` is appended.
///
/// # Errors
///
/// [`SpliceError::TimelineOutOfRange`] for an index past `2`,
/// [`SpliceError::EventOutOfRange`] for an event index past the end.
pub fn splice(
    mut simulation: Simulation,
    timeline_index: usize,
    event_index: usize,
    new_events: Vec<TimelineEvent>,
    new_snapshot: FinalSnapshot,
) -> Result<Simulation, SpliceError> {
    let timeline = simulation
        .timelines
        .get_mut(timeline_index)
        .ok_or(SpliceError::TimelineOutOfRange(timeline_index))?;

    let len = timeline.events.len();
    if event_index > len {
        return Err(SpliceError::EventOutOfRange {
            index: event_index,
            len,
        });
    }

    timeline.events.truncate(event_index);
    timeline.events.extend(new_events);
    timeline.final_snapshot = new_snapshot;

    Ok(simulation)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use parallel_types::{Horizon, SimulationId};

    use super::*;
    use crate::branch::fallback_branch;
    use crate::fallback::fallback_simulation;

    fn simulation() -> Simulation {
        let draft = fallback_simulation("Moved abroad in 2015", Horizon::DEFAULT, 2015);
        Simulation::from_draft(draft, SimulationId::new(), Utc::now())
    }

    #[test]
    fn keeps_prefix_and_replaces_suffix() {
        let original = simulation();
        let branch = fallback_branch("Stayed home", 2017, 3);
        let spliced = splice(original.clone(), 0, 2, branch.events.clone(), branch.snapshot.clone())
            .unwrap();

        let before = original.timelines.first().unwrap();
        let after = spliced.timelines.first().unwrap();
        assert_eq!(after.events.get(..2), before.events.get(..2));
        assert_eq!(after.events.get(2..), Some(branch.events.as_slice()));
        assert_eq!(after.final_snapshot, branch.snapshot);
        assert!(after.years_are_consecutive_from(2015));
    }

    #[test]
    fn splice_at_zero_replaces_everything() {
        let original = simulation();
        let branch = fallback_branch("Never left", 2015, 5);
        let spliced = splice(original, 2, 0, branch.events.clone(), branch.snapshot).unwrap();
        assert_eq!(spliced.timelines.get(2).unwrap().events, branch.events);
    }

    #[test]
    fn top_level_fields_unchanged() {
        let original = simulation();
        let branch = fallback_branch("x", 2016, 4);
        let spliced = splice(original.clone(), 1, 1, branch.events, branch.snapshot).unwrap();
        assert_eq!(spliced.id, original.id);
        assert_eq!(spliced.decision, original.decision);
        assert_eq!(spliced.decision_year, original.decision_year);
        assert_eq!(spliced.decision_summary, original.decision_summary);
        assert_eq!(spliced.years_to_simulate, original.years_to_simulate);
        assert_eq!(spliced.insight, original.insight);
        assert_eq!(spliced.created_at, original.created_at);
    }

    #[test]
    fn out_of_range_indices_are_errors() {
        let branch = fallback_branch("x", 2016, 1);
        assert_eq!(
            splice(simulation(), 3, 0, branch.events.clone(), branch.snapshot.clone()),
            Err(SpliceError::TimelineOutOfRange(3))
        );
        assert_eq!(
            splice(simulation(), 0, 6, branch.events, branch.snapshot),
            Err(SpliceError::EventOutOfRange { index: 6, len: 5 })
        );
    }

    #[test]
    fn selector_resolves_by_id_and_by_year_title() {
        let sim = simulation();
        let timeline = sim.timelines.first().unwrap();
        let third = timeline.events.get(2).unwrap();

        assert_eq!(EventSelector::Id(third.id).resolve(timeline), Some(2));
        let by_text = EventSelector::YearTitle {
            year: third.year,
            title: third.title.clone(),
        };
        assert_eq!(by_text.resolve(timeline), Some(2));
        assert_eq!(EventSelector::Id(EventId::new()).resolve(timeline), None);
    }

    #[test]
    fn branch_count_is_remaining_events() {
        let sim = simulation();
        let timeline = sim.timelines.first().unwrap();
        assert_eq!(branch_count(timeline, 0), 5);
        assert_eq!(branch_count(timeline, 4), 1);
        assert_eq!(branch_count(timeline, 9), 0);
    }
}
