//! Error types for the normalizer and the splice engine.

/// Why a completion could not be turned into a schema value.
///
/// Callers never surface this to users; it selects the fallback path and
/// is logged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Unparsable {
    /// The completion was empty or whitespace.
    #[error("completion text is empty")]
    Empty,

    /// No `{ ... }` span was found in the completion.
    #[error("no JSON object found in completion")]
    NoJsonObject,

    /// The located span is not valid JSON, even after repair.
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// The JSON has no non-empty `timelines` array.
    #[error("response has no timelines")]
    MissingTimelines,

    /// The JSON has no non-empty `events` array.
    #[error("response has no events")]
    MissingEvents,
}

/// Errors raised when a splice addresses something that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpliceError {
    /// The timeline index is not 0, 1, or 2.
    #[error("timeline index {0} out of range")]
    TimelineOutOfRange(usize),

    /// The event index is past the end of the timeline.
    #[error("event index {index} out of range for timeline with {len} events")]
    EventOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of events in the addressed timeline.
        len: usize,
    },
}
