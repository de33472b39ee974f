//! Enumeration types for the Parallel schema model.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::TypesError;

// ---------------------------------------------------------------------------
// Mood
// ---------------------------------------------------------------------------

/// The emotional tone of a single timeline event.
///
/// The vocabulary is closed: prompts list exactly these values and the
/// normalizer maps anything else to [`Mood::Hopeful`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "bindings/")]
pub enum Mood {
    /// Looking forward with optimism.
    #[default]
    Hopeful,
    /// Doing well on every front.
    Thriving,
    /// A hard stretch.
    Struggling,
    /// A moment where the direction of life changes.
    TurningPoint,
    /// Calm and settled.
    Peaceful,
    /// Unstable, many things changing at once.
    Chaotic,
}

impl Mood {
    /// Every mood, in prompt order.
    pub const ALL: [Self; 6] = [
        Self::Hopeful,
        Self::Thriving,
        Self::Struggling,
        Self::TurningPoint,
        Self::Peaceful,
        Self::Chaotic,
    ];

    /// The wire label (`"turning-point"` etc).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hopeful => "hopeful",
            Self::Thriving => "thriving",
            Self::Struggling => "struggling",
            Self::TurningPoint => "turning-point",
            Self::Peaceful => "peaceful",
            Self::Chaotic => "chaotic",
        }
    }

    /// Parse a mood label leniently.
    ///
    /// Accepts the exact wire labels plus common model variations such as
    /// `"Turning Point"` or `"turning_point"`. Returns `None` for anything
    /// outside the vocabulary.
    pub fn parse_lenient(label: &str) -> Option<Self> {
        let folded: String = label
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match folded.as_str() {
            "hopeful" => Some(Self::Hopeful),
            "thriving" => Some(Self::Thriving),
            "struggling" => Some(Self::Struggling),
            "turningpoint" => Some(Self::TurningPoint),
            "peaceful" => Some(Self::Peaceful),
            "chaotic" => Some(Self::Chaotic),
            _ => None,
        }
    }
}

impl core::fmt::Display for Mood {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Timeline slot
// ---------------------------------------------------------------------------

/// Identity of one of the three parallel timelines in a simulation.
///
/// A simulation always holds exactly one timeline per slot, in the order
/// `A`, `B`, `C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum TimelineSlot {
    /// First timeline.
    A,
    /// Second timeline.
    B,
    /// Third timeline.
    C,
}

impl TimelineSlot {
    /// All slots in their fixed order.
    pub const ALL: [Self; 3] = [Self::A, Self::B, Self::C];

    /// Zero-based position of this slot within a simulation.
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
        }
    }

    /// The slot at a zero-based position, if any.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::A),
            1 => Some(Self::B),
            2 => Some(Self::C),
            _ => None,
        }
    }

    /// The single-letter label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }
}

impl core::fmt::Display for TimelineSlot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.label())
    }
}

impl core::str::FromStr for TimelineSlot {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            "C" | "c" => Ok(Self::C),
            other => Err(TypesError::UnknownSlot(other.to_owned())),
        }
    }
}
