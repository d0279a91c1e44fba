//! In-memory snapshot history.
//!
//! [`InMemorySnapshotStore`] keeps every snapshot in a `HashMap` protected by
//! a `RwLock`. Snapshots are `Arc`-backed, so a reader holding one is never
//! affected by a later overwrite.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use fmerge_types::RecordId;
use tracing::debug;

use crate::error::{HistoryError, HistoryResult};
use crate::snapshot::Snapshot;
use crate::traits::SnapshotStore;

/// An in-memory implementation of [`SnapshotStore`].
///
/// Data lives as long as the store; nothing is ever evicted.
pub struct InMemorySnapshotStore {
    snapshots: RwLock<HashMap<RecordId, Snapshot>>,
}

impl InMemorySnapshotStore {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(HashMap::new()),
        }
    }

    /// Number of identifiers with a recorded snapshot.
    pub fn len(&self) -> usize {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a snapshot exists for `id`.
    pub fn contains(&self, id: &RecordId) -> bool {
        self.snapshots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Sorted list of recorded identifiers.
    pub fn ids(&self) -> Vec<RecordId> {
        let map = self.snapshots.read().unwrap_or_else(PoisonError::into_inner);
        let mut ids: Vec<RecordId> = map.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl Default for InMemorySnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn put(&self, snapshot: Snapshot) -> HistoryResult<()> {
        let mut map = self
            .snapshots
            .write()
            .map_err(|e| HistoryError::LockPoisoned(e.to_string()))?;
        let id = snapshot.id().clone();
        let kind = snapshot.kind().to_string();
        let replaced = map.insert(id.clone(), snapshot).is_some();
        debug!(id = %id, kind = %kind, replaced, "snapshot saved");
        Ok(())
    }

    fn latest_snapshot(&self, id: &RecordId) -> Option<Snapshot> {
        let map = self.snapshots.read().unwrap_or_else(PoisonError::into_inner);
        map.get(id).cloned()
    }
}

impl std::fmt::Debug for InMemorySnapshotStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySnapshotStore")
            .field("snapshot_count", &self.len())
            .finish()
    }
}
