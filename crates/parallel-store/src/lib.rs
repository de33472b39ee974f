//! Persistence for Parallel simulations and branch audit records.
//!
//! The core never touches storage directly; the CLI and tests inject one
//! of the [`SimulationStore`] implementations here.
//!
//! # Modules
//!
//! - [`store`] -- The [`SimulationStore`] and [`BranchLog`] contracts
//! - [`memory`] -- In-memory implementation
//! - [`file`] -- JSON-file implementation
//! - [`error`] -- Shared error types

pub mod error;
pub mod file;
pub mod memory;
pub mod store;

pub use error::StoreError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use store::{BranchLog, MAX_SIMULATIONS, SimulationStore};
