// ============================================================================
// Staged Batch
// ============================================================================
//
// The single unit of deferred work: an ordered set of record snapshots plus
// the absolute timestamp after which the batch becomes eligible for commit.
//
// Lifecycle:
// ```text
// staged ──ttl elapses / teardown──> committed (deletes issued)
//   │
//   └──undo──> cancelled (records restored, no backend calls)
// ```
//
// At most one batch exists at any time, in memory or in the staging store.
// ============================================================================

use super::record::{Record, RecordId};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Current wall-clock time as epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// A set of records staged for deletion, persisted as
/// `{ "records": [...], "expiresAt": n }` under the staging key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedBatch {
    /// Full record snapshots, in staging order. Snapshots (not just ids) are
    /// required so undo/restore works without a re-fetch.
    pub records: Vec<Record>,

    /// Absolute expiry timestamp, epoch milliseconds.
    pub expires_at: i64,
}

impl StagedBatch {
    /// Create a batch expiring `ttl` from now.
    pub fn new(records: Vec<Record>, ttl: Duration) -> Self {
        Self {
            records,
            expires_at: now_millis() + ttl.as_millis() as i64,
        }
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.records.iter().map(|r| r.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the batch is eligible for commit at `now` (epoch ms).
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at <= now
    }

    /// Time left until expiry at `now`; zero once expired.
    pub fn remaining_ttl(&self, now: i64) -> Duration {
        Duration::from_millis(self.expires_at.saturating_sub(now).max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn record(id: &str) -> Record {
        Record::new(id, Map::new())
    }

    #[test]
    fn test_expiry_math() {
        let batch = StagedBatch {
            records: vec![record("1")],
            expires_at: 10_000,
        };

        assert!(!batch.is_expired(9_999));
        assert!(batch.is_expired(10_000));
        assert!(batch.is_expired(10_001));

        assert_eq!(batch.remaining_ttl(7_000), Duration::from_millis(3_000));
        assert_eq!(batch.remaining_ttl(10_000), Duration::ZERO);
        assert_eq!(batch.remaining_ttl(99_999), Duration::ZERO);
    }

    #[test]
    fn test_new_batch_expires_after_ttl() {
        let before = now_millis();
        let batch = StagedBatch::new(vec![record("1")], Duration::from_millis(5_000));
        assert!(batch.expires_at >= before + 5_000);
        assert!(!batch.is_expired(before));
    }

    #[test]
    fn test_persisted_layout_uses_camel_case() {
        let batch = StagedBatch {
            records: vec![record("1"), record("2")],
            expires_at: 123,
        };

        let json = serde_json::to_string(&batch).unwrap();
        assert!(json.contains("\"expiresAt\":123"));
        assert!(json.contains("\"records\""));

        let back: StagedBatch = serde_json::from_str(&json).unwrap();
        assert_eq!(back.ids(), vec!["1".to_string(), "2".to_string()]);
    }
}
