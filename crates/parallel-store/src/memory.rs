//! In-memory store, used as a test double and for `--no-save` runs.

use parallel_types::{BranchDraft, BranchEvent, Simulation, SimulationDraft, SimulationId};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::{
    BranchLog, BranchMap, SimulationStore, append_to, insert_recent, remove_by_id, replace_by_id,
};

/// Volatile store holding everything behind async locks.
#[derive(Debug, Default)]
pub struct MemoryStore {
    simulations: RwLock<Vec<Simulation>>,
    branches: RwLock<BranchMap>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SimulationStore for MemoryStore {
    async fn save(&self, draft: SimulationDraft) -> Result<Simulation, StoreError> {
        let mut list = self.simulations.write().await;
        Ok(insert_recent(&mut list, draft))
    }

    async fn list(&self) -> Result<Vec<Simulation>, StoreError> {
        Ok(self.simulations.read().await.clone())
    }

    async fn get(&self, id: SimulationId) -> Result<Option<Simulation>, StoreError> {
        let list = self.simulations.read().await;
        Ok(list.iter().find(|s| s.id == id).cloned())
    }

    async fn delete(&self, id: SimulationId) -> Result<bool, StoreError> {
        let mut list = self.simulations.write().await;
        Ok(remove_by_id(&mut list, id))
    }

    async fn replace(&self, simulation: &Simulation) -> Result<bool, StoreError> {
        let mut list = self.simulations.write().await;
        Ok(replace_by_id(&mut list, simulation))
    }
}

impl BranchLog for MemoryStore {
    async fn append_branch(
        &self,
        simulation: SimulationId,
        draft: BranchDraft,
    ) -> Result<BranchEvent, StoreError> {
        let mut map = self.branches.write().await;
        Ok(append_to(&mut map, simulation, draft))
    }

    async fn branches_for(&self, simulation: SimulationId) -> Result<Vec<BranchEvent>, StoreError> {
        let map = self.branches.read().await;
        Ok(map.get(&simulation).cloned().unwrap_or_default())
    }
}
