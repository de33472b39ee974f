//! Timeline generation and branching contract for Parallel.
//!
//! Everything in this crate is pure: no network, no storage, no clock.
//! The orchestrator in `parallel-runner` feeds raw completion text in and
//! gets schema-valid values out.
//!
//! # Pipeline
//!
//! ```text
//! raw text --> extract (fence/prose strip, JSON repair) --> normalize --> SimulationDraft
//!                     |                                         ^
//!                     +-- Unparsable --> fallback --------------+
//! ```
//!
//! # Modules
//!
//! - [`defaults`] -- The single table of default values shared by every path
//! - [`extract`] -- JSON payload extraction from completion text
//! - [`normalize`] -- Repair and validation of a full simulation response
//! - [`branch`] -- Repair of a branch response and the inline branch fallback
//! - [`fallback`] -- Network-free archetype timelines
//! - [`splice`] -- Merging branch events into an existing simulation
//! - [`year`] -- Decision-year extraction and year arithmetic
//! - [`compare`] -- Score comparison and the share summary
//! - [`error`] -- Error types

pub mod branch;
pub mod compare;
pub mod defaults;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod normalize;
pub mod splice;
pub mod year;

pub use branch::{BranchOutcome, fallback_branch, normalize_branch};
pub use compare::{Comparison, ScoreCard, compare, share_text};
pub use error::{SpliceError, Unparsable};
pub use extract::{ParseOutcome, parse_payload};
pub use fallback::{fallback_simulation, fallback_simulation_with, fallback_timeline, looks_degraded};
pub use normalize::{NormalizeRequest, normalize, normalize_with};
pub use splice::{EventSelector, branch_count, splice};
pub use year::{extract_decision_year, year_at};
