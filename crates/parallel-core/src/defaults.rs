//! Default values for every field the generative backend may omit.
//!
//! The normalizer, the branch path, and the fallbacks all read from this
//! table so a given gap is always filled the same way.

use parallel_types::{EventId, FinalSnapshot, Mood, TimelineEvent, TimelineSlot};

/// Placeholder for missing snapshot text fields.
pub const UNKNOWN: &str = "Unknown";

/// Default for any missing 0..=100 score.
pub const SCORE: u8 = 50;

/// Default mood for events with a missing or unknown mood.
pub const MOOD: Mood = Mood::Hopeful;

/// Default timeline emoji.
pub const TIMELINE_EMOJI: &str = "\u{2728}";

/// Default timeline flavor text.
pub const TIMELINE_DESCRIPTION: &str = "An alternate path";

/// Default decision paraphrase.
pub const DECISION_SUMMARY: &str = "A life decision";

/// Default closing reflection.
pub const INSIGHT: &str = "Every choice opens doors we'll never see closed.";

/// Quote for a backfilled full-generation snapshot.
pub const SNAPSHOT_QUOTE: &str = "Life is a journey.";

/// Quote for a backfilled branch snapshot.
pub const BRANCH_SNAPSHOT_QUOTE: &str = "Every choice matters.";

/// Description of every inline branch-fallback event.
pub const BRANCH_FALLBACK_DESCRIPTION: &str = "Your different choice led to new outcomes.";

/// Maximum characters of the alternate choice used as a fallback title.
pub const BRANCH_FALLBACK_TITLE_CHARS: usize = 30;

/// Default text for an event whose fields are missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDefaults {
    /// Title used when none is given.
    pub title: &'static str,
    /// Description used when none is given.
    pub description: &'static str,
}

/// Event defaults for full timeline generation.
pub const TIMELINE_EVENT: EventDefaults = EventDefaults {
    title: "Life Event",
    description: "An important moment",
};

/// Event defaults for branch generation.
pub const BRANCH_EVENT: EventDefaults = EventDefaults {
    title: "Event",
    description: "An outcome",
};

impl EventDefaults {
    /// A fully defaulted event for the given year.
    pub fn event(self, year: i32) -> TimelineEvent {
        TimelineEvent {
            id: EventId::new(),
            year,
            title: self.title.to_owned(),
            description: self.description.to_owned(),
            mood: MOOD,
            mood_score: SCORE,
        }
    }
}

/// Generic timeline name for a slot, e.g. `"Timeline B"`.
pub fn timeline_name(slot: TimelineSlot) -> String {
    format!("Timeline {slot}")
}

/// A snapshot with every text field [`UNKNOWN`] and every score [`SCORE`].
pub fn snapshot(quote: &str) -> FinalSnapshot {
    FinalSnapshot {
        career: UNKNOWN.to_owned(),
        location: UNKNOWN.to_owned(),
        relationship: UNKNOWN.to_owned(),
        key_achievement: UNKNOWN.to_owned(),
        biggest_regret: UNKNOWN.to_owned(),
        happiness_score: SCORE,
        wealth_score: SCORE,
        growth_score: SCORE,
        quote: quote.to_owned(),
    }
}

/// The snapshot attached to the inline branch fallback.
pub fn branch_fallback_snapshot() -> FinalSnapshot {
    FinalSnapshot {
        key_achievement: String::from("Your story continues"),
        biggest_regret: String::from("Only time will tell"),
        ..snapshot("Every choice opens new doors.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_is_unknown_and_fifty() {
        let s = snapshot(SNAPSHOT_QUOTE);
        assert_eq!(s.career, UNKNOWN);
        assert_eq!(s.biggest_regret, UNKNOWN);
        assert_eq!(
            (s.happiness_score, s.wealth_score, s.growth_score),
            (50, 50, 50)
        );
        assert_eq!(s.quote, SNAPSHOT_QUOTE);
    }

    #[test]
    fn default_event_uses_table_values() {
        let e = TIMELINE_EVENT.event(2030);
        assert_eq!(e.year, 2030);
        assert_eq!(e.title, "Life Event");
        assert_eq!(e.mood, Mood::Hopeful);
        assert_eq!(e.mood_score, 50);
    }

    #[test]
    fn timeline_name_uses_slot_label() {
        assert_eq!(timeline_name(TimelineSlot::C), "Timeline C");
    }
}
