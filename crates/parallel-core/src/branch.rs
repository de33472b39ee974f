//! Branch response repair and the inline branch fallback.
//!
//! A branch regenerates a timeline from one event onward. The response is
//! a JSON object with an `events` array and a `finalSnapshot`; it goes
//! through the same extraction as a full simulation, and event years are
//! forced to `event_year + index`.

use parallel_types::{EventId, FinalSnapshot, TimelineEvent};

use crate::defaults::{self, BRANCH_EVENT};
use crate::error::Unparsable;
use crate::extract::parse_payload;
use crate::normalize::{normalize_events, normalize_snapshot};
use crate::year::year_at;

/// Replacement events and snapshot for a branched timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchOutcome {
    /// Exactly `count` events dated from the branch event's year.
    pub events: Vec<TimelineEvent>,
    /// The replacement final snapshot.
    pub snapshot: FinalSnapshot,
}

/// Normalize a branch completion.
///
/// Returns [`Unparsable`] when no JSON can be recovered or the JSON has no
/// non-empty `events` array. Shorter arrays are padded to `count`.
pub fn normalize_branch(raw: &str, event_year: i32, count: usize) -> Result<BranchOutcome, Unparsable> {
    let payload = parse_payload(raw).into_result()?;

    let events = payload
        .get("events")
        .filter(|v| v.as_array().is_some_and(|list| !list.is_empty()))
        .ok_or(Unparsable::MissingEvents)?;

    Ok(BranchOutcome {
        events: normalize_events(Some(events), event_year, count, BRANCH_EVENT),
        snapshot: normalize_snapshot(payload.get("finalSnapshot"), defaults::BRANCH_SNAPSHOT_QUOTE),
    })
}

/// The deterministic branch result used when generation fails.
///
/// The first event is titled from the alternate choice (cut to 30
/// characters), the rest `"New Path N"` with `N` counting from 2.
pub fn fallback_branch(alternate_choice: &str, event_year: i32, count: usize) -> BranchOutcome {
    let events = (0..count)
        .map(|i| {
            let title = if i == 0 {
                fallback_title(alternate_choice)
            } else {
                format!("New Path {}", i.saturating_add(1))
            };
            TimelineEvent {
                id: EventId::new(),
                year: year_at(event_year, i),
                title,
                description: defaults::BRANCH_FALLBACK_DESCRIPTION.to_owned(),
                mood: defaults::MOOD,
                mood_score: defaults::SCORE,
            }
        })
        .collect();

    BranchOutcome {
        events,
        snapshot: defaults::branch_fallback_snapshot(),
    }
}

fn fallback_title(alternate_choice: &str) -> String {
    let trimmed = alternate_choice.trim();
    if trimmed.is_empty() {
        return BRANCH_EVENT.title.to_owned();
    }
    trimmed
        .chars()
        .take(defaults::BRANCH_FALLBACK_TITLE_CHARS)
        .collect::<String>()
        .trim_end()
        .to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use parallel_types::Mood;

    use super::*;

    #[test]
    fn forces_years_from_branch_event() {
        let raw = r#"{"events": [
            {"year": 1999, "title": "Leap", "mood": "thriving", "moodScore": 88},
            {"year": 2050, "title": "Land"}
        ], "finalSnapshot": {"career": "Pilot"}}"#;
        let outcome = normalize_branch(raw, 2022, 2).unwrap();

        let years: Vec<i32> = outcome.events.iter().map(|e| e.year).collect();
        assert_eq!(years, [2022, 2023]);
        let leap = outcome.events.first().unwrap();
        let land = outcome.events.get(1).unwrap();
        assert_eq!((leap.mood, leap.mood_score), (Mood::Thriving, 88));
        assert_eq!(land.description, "An outcome");
        assert_eq!(outcome.snapshot.career, "Pilot");
        assert_eq!(outcome.snapshot.quote, defaults::BRANCH_SNAPSHOT_QUOTE);
    }

    #[test]
    fn pads_to_requested_count() {
        let raw = r#"{"events": [{"title": "Only"}]}"#;
        let outcome = normalize_branch(raw, 2020, 3).unwrap();
        let titles: Vec<&str> = outcome.events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Only", "Event", "Event"]);
        assert_eq!(outcome.snapshot, defaults::snapshot(defaults::BRANCH_SNAPSHOT_QUOTE));
    }

    #[test]
    fn missing_or_empty_events_is_unparsable() {
        assert_eq!(normalize_branch("{}", 2020, 2), Err(Unparsable::MissingEvents));
        assert_eq!(
            normalize_branch(r#"{"events": []}"#, 2020, 2),
            Err(Unparsable::MissingEvents)
        );
        assert_eq!(normalize_branch("nope", 2020, 2), Err(Unparsable::NoJsonObject));
    }

    #[test]
    fn fallback_titles_and_years() {
        let outcome = fallback_branch("Moved to Lisbon instead of staying in Berlin", 2021, 3);
        let titles: Vec<&str> = outcome.events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Moved to Lisbon instead of sta", "New Path 2", "New Path 3"]);
        let years: Vec<i32> = outcome.events.iter().map(|e| e.year).collect();
        assert_eq!(years, [2021, 2022, 2023]);
        assert!(outcome.events.iter().all(|e| e.mood == Mood::Hopeful && e.mood_score == 50));
        assert_eq!(outcome.snapshot.key_achievement, "Your story continues");
        assert_eq!(outcome.snapshot.happiness_score, 50);
    }

    #[test]
    fn fallback_title_counts_characters_not_bytes() {
        let choice = "日本に引っ越して新しい仕事を始めることにした、そして友達と一緒に住んだ";
        let outcome = fallback_branch(choice, 2020, 1);
        assert_eq!(outcome.events.first().map(|e| e.title.chars().count()), Some(30));
    }

    #[test]
    fn fallback_with_zero_count_is_empty() {
        assert!(fallback_branch("x", 2020, 0).events.is_empty());
    }
}
