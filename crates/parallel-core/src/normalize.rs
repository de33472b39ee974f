//! Repair and validation of a full-simulation completion.
//!
//! The completion service guarantees nothing about shape, field presence,
//! types, or numeric consistency. The normalizer trusts only the JSON's
//! narrative text and enforces every structural invariant locally:
//!
//! - exactly three timelines, slots `A`, `B`, `C` by position (missing
//!   slots are filled from the fallback archetype at that position)
//! - exactly `horizon` events per timeline
//! - event years `decision_year + index`, whatever the source said
//! - every missing leaf field taken from [`crate::defaults`]

use parallel_types::{
    EventId, FinalSnapshot, Horizon, Mood, SimulationDraft, Timeline, TimelineEvent, TimelineSlot,
};
use rand::Rng;
use serde_json::Value;
use tracing::debug;

use crate::defaults::{self, EventDefaults};
use crate::error::Unparsable;
use crate::extract::parse_payload;
use crate::fallback::fallback_timeline;
use crate::year::year_at;

/// Context the normalizer needs besides the raw text.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeRequest<'a> {
    /// The user's decision text, copied into the draft.
    pub decision: &'a str,
    /// Year of the first event of every timeline.
    pub decision_year: i32,
    /// Events per timeline.
    pub horizon: Horizon,
}

/// Normalize a completion into a schema-valid draft.
///
/// Returns [`Unparsable`] when no JSON can be recovered or the JSON has no
/// non-empty `timelines` array; the caller substitutes the fallback.
pub fn normalize(raw: &str, request: &NormalizeRequest<'_>) -> Result<SimulationDraft, Unparsable> {
    normalize_with(raw, request, &mut rand::rng())
}

/// [`normalize`] with an explicit RNG for fallback slot filling.
pub fn normalize_with<R: Rng>(
    raw: &str,
    request: &NormalizeRequest<'_>,
    rng: &mut R,
) -> Result<SimulationDraft, Unparsable> {
    let payload = parse_payload(raw).into_result()?;

    let raw_timelines = payload
        .get("timelines")
        .and_then(Value::as_array)
        .filter(|list| !list.is_empty())
        .ok_or(Unparsable::MissingTimelines)?;

    if raw_timelines.len() != TimelineSlot::ALL.len() {
        debug!(
            received = raw_timelines.len(),
            "coercing timeline count to three"
        );
    }

    let timelines = TimelineSlot::ALL.map(|slot| match raw_timelines.get(slot.index()) {
        Some(raw_timeline) => normalize_timeline(raw_timeline, slot, request),
        None => fallback_timeline(slot, request.horizon, request.decision_year, rng),
    });

    Ok(SimulationDraft {
        decision: request.decision.to_owned(),
        decision_year: request.decision_year,
        decision_summary: text_or(&payload, "decisionSummary", defaults::DECISION_SUMMARY),
        years_to_simulate: request.horizon.years(),
        timelines,
        insight: text_or(&payload, "insight", defaults::INSIGHT),
    })
}

/// Normalize one timeline object into `slot`.
fn normalize_timeline(raw: &Value, slot: TimelineSlot, request: &NormalizeRequest<'_>) -> Timeline {
    let name = raw
        .get("name")
        .and_then(non_empty_str)
        .map_or_else(|| defaults::timeline_name(slot), ToOwned::to_owned);

    Timeline {
        id: slot,
        name,
        emoji: text_or(raw, "emoji", defaults::TIMELINE_EMOJI),
        description: text_or(raw, "description", defaults::TIMELINE_DESCRIPTION),
        events: normalize_events(
            raw.get("events"),
            request.decision_year,
            request.horizon.event_count(),
            defaults::TIMELINE_EVENT,
        ),
        final_snapshot: normalize_snapshot(raw.get("finalSnapshot"), defaults::SNAPSHOT_QUOTE),
    }
}

/// Normalize an events array to exactly `count` events dated from `start_year`.
///
/// Source years are discarded. Short lists are padded with default events.
pub(crate) fn normalize_events(
    raw: Option<&Value>,
    start_year: i32,
    count: usize,
    fallback: EventDefaults,
) -> Vec<TimelineEvent> {
    let source = raw.and_then(Value::as_array).map_or(&[][..], Vec::as_slice);

    (0..count)
        .map(|i| {
            let year = year_at(start_year, i);
            source.get(i).map_or_else(
                || fallback.event(year),
                |raw_event| normalize_event(raw_event, year, fallback),
            )
        })
        .collect()
}

fn normalize_event(raw: &Value, year: i32, fallback: EventDefaults) -> TimelineEvent {
    TimelineEvent {
        id: EventId::new(),
        year,
        title: text_or(raw, "title", fallback.title),
        description: text_or(raw, "description", fallback.description),
        mood: mood_or_default(raw),
        mood_score: score_or(raw, "moodScore", defaults::SCORE),
    }
}

/// Normalize a snapshot object field by field.
pub(crate) fn normalize_snapshot(raw: Option<&Value>, quote: &str) -> FinalSnapshot {
    let Some(raw) = raw.filter(|v| v.is_object()) else {
        return defaults::snapshot(quote);
    };

    FinalSnapshot {
        career: text_or(raw, "career", defaults::UNKNOWN),
        location: text_or(raw, "location", defaults::UNKNOWN),
        relationship: text_or(raw, "relationship", defaults::UNKNOWN),
        key_achievement: text_or(raw, "keyAchievement", defaults::UNKNOWN),
        biggest_regret: text_or(raw, "biggestRegret", defaults::UNKNOWN),
        happiness_score: score_or(raw, "happinessScore", defaults::SCORE),
        wealth_score: score_or(raw, "wealthScore", defaults::SCORE),
        growth_score: score_or(raw, "growthScore", defaults::SCORE),
        quote: text_or(raw, "quote", quote),
    }
}

// ---------------------------------------------------------------------------
// Leaf field coercion
// ---------------------------------------------------------------------------

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

/// A non-empty string field, or the default.
fn text_or(raw: &Value, key: &str, default: &str) -> String {
    raw.get(key)
        .and_then(non_empty_str)
        .unwrap_or(default)
        .to_owned()
}

/// A numeric field rounded and clamped to 0..=100, or the default.
///
/// Numeric strings (`"72"`) are accepted; anything else is not.
fn score_or(raw: &Value, key: &str, default: u8) -> u8 {
    let number = match raw.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    number
        .filter(|n| n.is_finite())
        .map_or(default, clamp_score)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_score(value: f64) -> u8 {
    // Clamped to 0..=100 first, so the cast is exact.
    value.round().clamp(0.0, 100.0) as u8
}

fn mood_or_default(raw: &Value) -> Mood {
    raw.get("mood")
        .and_then(Value::as_str)
        .and_then(Mood::parse_lenient)
        .unwrap_or(defaults::MOOD)
}
