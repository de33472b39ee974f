//! JSON-file store: one file for simulations, one for branch records.
//!
//! Layout under the store directory:
//!
//! ```text
//! <dir>/simulations.json   [Simulation, ...]      most recent first
//! <dir>/branches.json      { "<sim id>": [BranchEvent, ...] }
//! ```
//!
//! Every operation reads the whole file and every write rewrites it. A
//! missing or corrupt file reads as empty.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parallel_types::{BranchDraft, BranchEvent, Simulation, SimulationDraft, SimulationId};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::store::{
    BranchLog, BranchMap, SimulationStore, append_to, insert_recent, remove_by_id, replace_by_id,
};

const SIMULATIONS_FILE: &str = "simulations.json";
const BRANCHES_FILE: &str = "branches.json";

/// Store persisting to JSON files in a directory.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`. Nothing is created until first write.
    pub fn open(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        debug!(dir = %dir.display(), "opened JSON file store");
        Self {
            dir,
            write_lock: Mutex::new(()),
        }
    }

    /// The directory this store writes to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn simulations_path(&self) -> PathBuf {
        self.dir.join(SIMULATIONS_FILE)
    }

    fn branches_path(&self) -> PathBuf {
        self.dir.join(BRANCHES_FILE)
    }

    async fn read_simulations(&self) -> Result<Vec<Simulation>, StoreError> {
        read_or_empty(&self.simulations_path()).await
    }

    async fn read_branches(&self) -> Result<BranchMap, StoreError> {
        read_or_empty(&self.branches_path()).await
    }
}

/// Read and decode a JSON file, treating absence or corruption as empty.
async fn read_or_empty<T: DeserializeOwned + Default>(path: &Path) -> Result<T, StoreError> {
    let contents = match tokio::fs::read(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(io_error(path, e)),
    };

    if contents.trim_ascii().is_empty() {
        return Ok(T::default());
    }

    // Invalid UTF-8 is a decode error here, not an I/O error.
    Ok(serde_json::from_slice(&contents).unwrap_or_else(|e| {
        warn!(
            path = %path.display(),
            error = %e,
            "stored data is corrupt, treating as empty"
        );
        T::default()
    }))
}

/// Encode and write a JSON file through a sibling temp file and a rename.
async fn write_json<T: Serialize + Sync>(path: &Path, value: &T) -> Result<(), StoreError> {
    let contents = serde_json::to_vec_pretty(value)?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| io_error(parent, e))?;
    }

    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, contents)
        .await
        .map_err(|e| io_error(&tmp, e))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| io_error(path, e))?;

    debug!(path = %path.display(), "store file written");
    Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

impl SimulationStore for JsonFileStore {
    async fn save(&self, draft: SimulationDraft) -> Result<Simulation, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut list = self.read_simulations().await?;
        let saved = insert_recent(&mut list, draft);
        write_json(&self.simulations_path(), &list).await?;
        Ok(saved)
    }

    async fn list(&self) -> Result<Vec<Simulation>, StoreError> {
        self.read_simulations().await
    }

    async fn get(&self, id: SimulationId) -> Result<Option<Simulation>, StoreError> {
        let list = self.read_simulations().await?;
        Ok(list.into_iter().find(|s| s.id == id))
    }

    async fn delete(&self, id: SimulationId) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut list = self.read_simulations().await?;
        let removed = remove_by_id(&mut list, id);
        if removed {
            write_json(&self.simulations_path(), &list).await?;
        }
        Ok(removed)
    }

    async fn replace(&self, simulation: &Simulation) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut list = self.read_simulations().await?;
        let found = replace_by_id(&mut list, simulation);
        if found {
            write_json(&self.simulations_path(), &list).await?;
        }
        Ok(found)
    }
}

impl BranchLog for JsonFileStore {
    async fn append_branch(
        &self,
        simulation: SimulationId,
        draft: BranchDraft,
    ) -> Result<BranchEvent, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_branches().await?;
        let event = append_to(&mut map, simulation, draft);
        write_json(&self.branches_path(), &map).await?;
        Ok(event)
    }

    async fn branches_for(&self, simulation: SimulationId) -> Result<Vec<BranchEvent>, StoreError> {
        let mut map = self.read_branches().await?;
        Ok(map.remove(&simulation).unwrap_or_default())
    }
}
