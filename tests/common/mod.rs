//! Shared test doubles: a scripted backend client and a recording gate.

use async_trait::async_trait;
use serde_json::{Map, json};
use stagebin::{
    ConfirmationGate, EngineError, Record, RecordClient, RecordId, Result, UndoHandle,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;

// ============================================================================
// Mock record client
// ============================================================================

/// Backend double: records every call, mutates an in-memory record list, and
/// fails on demand per id.
pub struct MockRecordClient {
    backend: Mutex<Vec<Record>>,
    delete_calls: Mutex<Vec<RecordId>>,
    create_calls: Mutex<Vec<Record>>,
    failing_deletes: Mutex<HashSet<RecordId>>,
    fail_creates: AtomicBool,
    next_id: AtomicUsize,
}

impl MockRecordClient {
    pub fn new(initial: Vec<Record>) -> Arc<Self> {
        Arc::new(Self {
            backend: Mutex::new(initial),
            delete_calls: Mutex::new(Vec::new()),
            create_calls: Mutex::new(Vec::new()),
            failing_deletes: Mutex::new(HashSet::new()),
            fail_creates: AtomicBool::new(false),
            next_id: AtomicUsize::new(0),
        })
    }

    /// Make every delete for `id` fail without touching the backend list.
    pub async fn fail_delete(&self, id: &str) {
        self.failing_deletes.lock().await.insert(id.to_string());
    }

    /// Make every create call fail.
    pub fn fail_creates(&self) {
        self.fail_creates.store(true, Ordering::SeqCst);
    }

    /// Every delete call issued so far, in call order, failures included.
    pub async fn delete_calls(&self) -> Vec<RecordId> {
        self.delete_calls.lock().await.clone()
    }

    pub async fn create_calls(&self) -> Vec<Record> {
        self.create_calls.lock().await.clone()
    }

    pub async fn backend_ids(&self) -> Vec<RecordId> {
        self.backend.lock().await.iter().map(|r| r.id.clone()).collect()
    }
}

#[async_trait]
impl RecordClient for MockRecordClient {
    async fn delete_by_id(&self, id: &RecordId) -> Result<()> {
        self.delete_calls.lock().await.push(id.clone());
        if self.failing_deletes.lock().await.contains(id) {
            return Err(EngineError::Client(format!(
                "injected delete failure for {}",
                id
            )));
        }
        self.backend.lock().await.retain(|r| &r.id != id);
        Ok(())
    }

    async fn create(&self, record: &Record) -> Result<()> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(EngineError::Client("injected create failure".into()));
        }
        self.create_calls.lock().await.push(record.clone());
        // The backend assigns a fresh id; the original one is not reused.
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let assigned = Record::new(format!("srv-{}", n), record.fields_without_id());
        self.backend.lock().await.push(assigned);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Record>> {
        Ok(self.backend.lock().await.clone())
    }
}

// ============================================================================
// Recording gate
// ============================================================================

/// Gate double: answers `confirm` with a settable decision and records every
/// notification and undo handle it is given.
pub struct RecordingGate {
    decision: AtomicBool,
    confirms: Mutex<Vec<String>>,
    notices: Mutex<Vec<String>>,
    undo_handles: Mutex<Vec<UndoHandle>>,
}

impl RecordingGate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            decision: AtomicBool::new(true),
            confirms: Mutex::new(Vec::new()),
            notices: Mutex::new(Vec::new()),
            undo_handles: Mutex::new(Vec::new()),
        })
    }

    pub fn set_decision(&self, decision: bool) {
        self.decision.store(decision, Ordering::SeqCst);
    }

    pub async fn confirm_count(&self) -> usize {
        self.confirms.lock().await.len()
    }

    pub async fn notices(&self) -> Vec<String> {
        self.notices.lock().await.clone()
    }

    /// The undo handle from the most recent undoable notification.
    pub async fn last_undo(&self) -> Option<UndoHandle> {
        self.undo_handles.lock().await.last().cloned()
    }

    pub async fn undoable_count(&self) -> usize {
        self.undo_handles.lock().await.len()
    }
}

#[async_trait]
impl ConfirmationGate for RecordingGate {
    async fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().await.push(message.to_string());
        self.decision.load(Ordering::SeqCst)
    }

    async fn notify(&self, message: &str) {
        self.notices.lock().await.push(message.to_string());
    }

    async fn notify_undoable(&self, message: &str, undo: UndoHandle) {
        self.notices.lock().await.push(message.to_string());
        self.undo_handles.lock().await.push(undo);
    }
}

// ============================================================================
// Record fixtures
// ============================================================================

pub fn make_record(id: &str, name: &str) -> Record {
    let mut fields = Map::new();
    fields.insert("name".to_string(), json!(name));
    fields.insert("email".to_string(), json!(format!("{}@example.com", name)));
    fields.insert("role".to_string(), json!("User"));
    Record::new(id, fields)
}

pub fn unique_record(name: &str) -> Record {
    make_record(&uuid::Uuid::new_v4().to_string(), name)
}

/// Three named records, the shape most scenarios start from.
pub fn seed_records() -> Vec<Record> {
    vec![
        make_record("1", "alice"),
        make_record("2", "bob"),
        make_record("3", "carol"),
    ]
}
