// store.rs - Snapshot repository: the persistence seam of the board service

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LifeError, LifeResult};
use crate::snapshot::Snapshot;

/// Identifier handed out by a store when a snapshot is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotId(pub u64);

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub trait SnapshotStore {
    fn get(&self, id: SnapshotId) -> Option<Snapshot>;

    fn add(&mut self, snapshot: Snapshot) -> SnapshotId;

    /// Replaces an existing snapshot; unknown ids are an error.
    fn update(&mut self, id: SnapshotId, snapshot: Snapshot) -> LifeResult<()>;

    /// Returns whether a snapshot was removed.
    fn delete(&mut self, id: SnapshotId) -> bool;
}

/// Process-local store. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct MemoryStore {
    next_id: u64,
    snapshots: BTreeMap<SnapshotId, Snapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Stored snapshots in id order.
    pub fn iter(&self) -> impl Iterator<Item = (SnapshotId, &Snapshot)> {
        self.snapshots.iter().map(|(id, snapshot)| (*id, snapshot))
    }
}

impl SnapshotStore for MemoryStore {
    fn get(&self, id: SnapshotId) -> Option<Snapshot> {
        self.snapshots.get(&id).cloned()
    }

    fn add(&mut self, snapshot: Snapshot) -> SnapshotId {
        self.next_id += 1;
        let id = SnapshotId(self.next_id);
        self.snapshots.insert(id, snapshot);
        id
    }

    fn update(&mut self, id: SnapshotId, snapshot: Snapshot) -> LifeResult<()> {
        match self.snapshots.get_mut(&id) {
            Some(existing) => {
                *existing = snapshot;
                Ok(())
            }
            None => Err(LifeError::NotFound(id)),
        }
    }

    fn delete(&mut self, id: SnapshotId) -> bool {
        self.snapshots.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(cells: &str) -> Snapshot {
        Snapshot { width: cells.len(), height: 1, cells: cells.to_string() }
    }

    #[test]
    fn add_then_get() {
        let mut store = MemoryStore::new();
        let id = store.add(snapshot("101"));
        assert_eq!(store.get(id), Some(snapshot("101")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn ids_are_not_reused() {
        let mut store = MemoryStore::new();
        let first = store.add(snapshot("1"));
        assert!(store.delete(first));
        let second = store.add(snapshot("0"));
        assert_ne!(first, second);
        assert_eq!(store.get(first), None);
    }

    #[test]
    fn update_replaces_existing() {
        let mut store = MemoryStore::new();
        let id = store.add(snapshot("10"));
        store.update(id, snapshot("01")).expect("update");
        assert_eq!(store.get(id), Some(snapshot("01")));
    }

    #[test]
    fn update_unknown_id_fails() {
        let mut store = MemoryStore::new();
        let result = store.update(SnapshotId(42), snapshot("1"));
        assert!(matches!(result, Err(LifeError::NotFound(SnapshotId(42)))));
    }

    #[test]
    fn delete_unknown_id_is_false() {
        let mut store = MemoryStore::new();
        assert!(!store.delete(SnapshotId(7)));
        assert!(store.is_empty());
    }

    #[test]
    fn iter_is_in_id_order() {
        let mut store = MemoryStore::new();
        let a = store.add(snapshot("1"));
        let b = store.add(snapshot("0"));
        let ids: Vec<_> = store.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, b]);
    }
}
