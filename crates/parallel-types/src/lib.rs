//! Shared schema model for the Parallel timeline simulator.
//!
//! This crate is the single source of truth for the data contracts that flow
//! between the normalizer, the fallback generator, the splice engine, the
//! persistence layer, and the web client. Types defined here are exported to
//! `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for simulations, events, and branches
//! - [`enums`] -- Moods and timeline slots
//! - [`horizon`] -- The validated years-to-simulate value
//! - [`structs`] -- Events, snapshots, timelines, simulations, branch records
//! - [`error`] -- Validation errors for the schema model

pub mod enums;
pub mod error;
pub mod horizon;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Mood, TimelineSlot};
pub use error::TypesError;
pub use horizon::Horizon;
pub use ids::{BranchId, EventId, SimulationId};
pub use structs::{
    BranchDraft, BranchEvent, FinalSnapshot, Simulation, SimulationDraft, Timeline, TimelineEvent,
};
