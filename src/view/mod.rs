// ============================================================================
// Optimistic View Cache
// ============================================================================
//
// The in-memory list the UI renders. Staging and undo mutate it directly,
// ahead of any backend confirmation; the commit path later replaces it with
// the authoritative list.
// ============================================================================

use crate::core::{Record, RecordId};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// New list with every record whose id is in `ids` removed.
pub fn remove_by_ids(records: &[Record], ids: &[RecordId]) -> Vec<Record> {
    let staged: HashSet<&str> = ids.iter().map(String::as_str).collect();
    records
        .iter()
        .filter(|r| !staged.contains(r.id.as_str()))
        .cloned()
        .collect()
}

/// New list with `restored` appended. Records whose id is already present are
/// skipped; only re-inclusion is guaranteed, not the prior ordering.
pub fn reinsert_all(records: &[Record], restored: &[Record]) -> Vec<Record> {
    let present: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
    let mut merged = records.to_vec();
    merged.extend(
        restored
            .iter()
            .filter(|r| !present.contains(r.id.as_str()))
            .cloned(),
    );
    merged
}

/// Shared handle over the rendered list snapshot.
#[derive(Clone, Default)]
pub struct ViewCache {
    records: Arc<RwLock<Vec<Record>>>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list, e.g. after an authoritative re-fetch.
    pub async fn replace_all(&self, records: Vec<Record>) {
        *self.records.write().await = records;
    }

    pub async fn remove_by_ids(&self, ids: &[RecordId]) {
        let mut records = self.records.write().await;
        *records = remove_by_ids(&records, ids);
    }

    pub async fn reinsert_all(&self, restored: &[Record]) {
        let mut records = self.records.write().await;
        *records = reinsert_all(&records, restored);
    }

    pub async fn snapshot(&self) -> Vec<Record> {
        self.records.read().await.clone()
    }

    pub async fn ids(&self) -> Vec<RecordId> {
        self.records.read().await.iter().map(|r| r.id.clone()).collect()
    }

    /// Records matching `ids`, in the order the ids were given. Unknown ids
    /// are skipped.
    pub async fn get_many(&self, ids: &[RecordId]) -> Vec<Record> {
        let records = self.records.read().await;
        ids.iter()
            .filter_map(|id| records.iter().find(|r| &r.id == id).cloned())
            .collect()
    }

    pub async fn contains(&self, id: &RecordId) -> bool {
        self.records.read().await.iter().any(|r| &r.id == id)
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}
