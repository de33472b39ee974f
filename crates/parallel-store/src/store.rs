//! The persistence contracts and list bookkeeping shared by every backend.

use std::collections::HashMap;
use std::future::Future;

use chrono::Utc;
use parallel_types::{BranchDraft, BranchEvent, BranchId, Simulation, SimulationDraft, SimulationId};

use crate::error::StoreError;

/// Most simulations kept; saving past this evicts the oldest.
pub const MAX_SIMULATIONS: usize = 20;

/// Durable `id -> Simulation` mapping, most recent first.
///
/// Every write is a read-modify-write of the whole list. Concurrent
/// writers from separate processes can lose updates.
pub trait SimulationStore: Send + Sync {
    /// Assign an id and timestamp, prepend, and evict past
    /// [`MAX_SIMULATIONS`].
    fn save(
        &self,
        draft: SimulationDraft,
    ) -> impl Future<Output = Result<Simulation, StoreError>> + Send;

    /// All stored simulations, most recent first.
    fn list(&self) -> impl Future<Output = Result<Vec<Simulation>, StoreError>> + Send;

    /// One simulation by id.
    fn get(
        &self,
        id: SimulationId,
    ) -> impl Future<Output = Result<Option<Simulation>, StoreError>> + Send;

    /// Remove a simulation. Returns whether anything was removed; an
    /// absent id is not an error.
    fn delete(&self, id: SimulationId) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Overwrite the stored simulation with the same id, keeping its list
    /// position. Returns `false` when no such id is stored.
    fn replace(
        &self,
        simulation: &Simulation,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;
}

/// Append-only branch audit log keyed by simulation id.
///
/// Informational only; nothing here feeds back into generation.
pub trait BranchLog: Send + Sync {
    /// Stamp and append a branch record.
    fn append_branch(
        &self,
        simulation: SimulationId,
        draft: BranchDraft,
    ) -> impl Future<Output = Result<BranchEvent, StoreError>> + Send;

    /// Records for one simulation in append order.
    fn branches_for(
        &self,
        simulation: SimulationId,
    ) -> impl Future<Output = Result<Vec<BranchEvent>, StoreError>> + Send;
}

/// Branch records grouped by simulation.
pub(crate) type BranchMap = HashMap<SimulationId, Vec<BranchEvent>>;

/// Stamp a draft and insert it at the front, evicting the oldest.
pub(crate) fn insert_recent(list: &mut Vec<Simulation>, draft: SimulationDraft) -> Simulation {
    let simulation = Simulation::from_draft(draft, SimulationId::new(), Utc::now());
    list.insert(0, simulation.clone());
    list.truncate(MAX_SIMULATIONS);
    simulation
}

/// Remove by id; `true` if something was removed.
pub(crate) fn remove_by_id(list: &mut Vec<Simulation>, id: SimulationId) -> bool {
    let before = list.len();
    list.retain(|s| s.id != id);
    list.len() != before
}

/// Overwrite in place by id; `true` if found.
pub(crate) fn replace_by_id(list: &mut [Simulation], simulation: &Simulation) -> bool {
    list.iter_mut()
        .find(|s| s.id == simulation.id)
        .map(|slot| *slot = simulation.clone())
        .is_some()
}

/// Stamp a branch draft and append it under its simulation.
pub(crate) fn append_to(map: &mut BranchMap, simulation: SimulationId, draft: BranchDraft) -> BranchEvent {
    let event = BranchEvent::from_draft(draft, BranchId::new(), Utc::now());
    map.entry(simulation).or_default().push(event.clone());
    event
}
