//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Simulations, events, and branch records each get their own id type so
//! they cannot be mixed up at compile time. All ids use UUID v7
//! (time-ordered), which keeps a most-recent-first listing sortable by id.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl core::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a persisted simulation, assigned at save time.
    SimulationId
}

define_id! {
    /// Stable identifier for a single timeline event, assigned at creation.
    ///
    /// Branch targets are resolved by this id when available instead of
    /// the ambiguous `(year, title)` pair.
    EventId
}

define_id! {
    /// Unique identifier for a branch audit record.
    BranchId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let simulation = SimulationId::new();
        let event = EventId::new();
        assert_ne!(simulation.into_inner(), Uuid::nil());
        assert_ne!(event.into_inner(), Uuid::nil());
    }

    #[test]
    fn id_roundtrip_serde() {
        let id = SimulationId::new();
        let json = serde_json::to_string(&id).unwrap_or_default();
        let back: Result<SimulationId, _> = serde_json::from_str(&json);
        assert_eq!(back.ok(), Some(id));
    }

    #[test]
    fn id_parses_from_display_form() {
        let id = BranchId::new();
        let parsed: Result<BranchId, _> = format!(" {id} ").parse();
        assert_eq!(parsed.ok(), Some(id));
        assert!("not-a-uuid".parse::<BranchId>().is_err());
    }
}
