// ============================================================================
// Staging Coordinator
// ============================================================================
//
// Orchestrates the staged-deletion lifecycle across the staging store, the
// optimistic view cache, the commit scheduler, and the backend client.
//
// State transitions:
// ```text
// stage ──ttl elapses / commit() / shutdown()──> committed (deletes issued)
//   │
//   └──undo / cancel()──> cancelled (records restored, no backend calls)
// ```
//
// The timer-fire and user-undo paths race for the same batch. Each staged
// batch carries a generation drawn from an atomic counter; both paths take
// the batch only when their generation still matches, so whichever runs
// first wins and the other becomes a no-op.
// ============================================================================

use crate::client::RecordClient;
use crate::config::StagingConfig;
use crate::core::{Record, RecordId, Result, StagedBatch, now_millis};
use crate::gate::ConfirmationGate;
use crate::scheduler::CommitScheduler;
use crate::store::{FileStagingStore, StagingStore};
use crate::view::ViewCache;
use log::{debug, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

/// The currently staged batch plus the bookkeeping both resolution paths
/// check before acting.
struct PendingBatch {
    batch: StagedBatch,
    generation: u64,
    /// Recovered batches restore through re-creation on undo; the view the
    /// records were removed from no longer exists.
    recovered: bool,
}

/// Single-use undo action attached to the staged-deletion notification.
///
/// Inert once the batch resolves by any path: the generation it captured no
/// longer matches and [`UndoHandle::undo`] becomes a no-op.
#[derive(Clone)]
pub struct UndoHandle {
    coordinator: StagingCoordinator,
    generation: u64,
}

impl UndoHandle {
    fn new(coordinator: StagingCoordinator, generation: u64) -> Self {
        Self {
            coordinator,
            generation,
        }
    }

    pub async fn undo(&self) -> Result<()> {
        self.coordinator.cancel_generation(self.generation).await
    }
}

/// The staged destructive operation engine.
///
/// Holds its dependencies behind `Arc`s, so clones share all state; the
/// scheduled commit task runs against a clone of the coordinator that armed
/// it.
#[derive(Clone)]
pub struct StagingCoordinator {
    store: Arc<dyn StagingStore>,
    client: Arc<dyn RecordClient>,
    gate: Arc<dyn ConfirmationGate>,
    view: ViewCache,
    scheduler: Arc<CommitScheduler>,
    current: Arc<Mutex<Option<PendingBatch>>>,
    generation: Arc<AtomicU64>,
    config: StagingConfig,
}

impl StagingCoordinator {
    pub fn new(
        store: Arc<dyn StagingStore>,
        client: Arc<dyn RecordClient>,
        gate: Arc<dyn ConfirmationGate>,
        config: StagingConfig,
    ) -> Self {
        Self {
            store,
            client,
            gate,
            view: ViewCache::new(),
            scheduler: Arc::new(CommitScheduler::new()),
            current: Arc::new(Mutex::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
            config,
        }
    }

    /// Coordinator over a file-backed staging store in the configured
    /// staging directory.
    pub fn with_file_store(
        client: Arc<dyn RecordClient>,
        gate: Arc<dyn ConfirmationGate>,
        config: StagingConfig,
    ) -> Self {
        let store = Arc::new(FileStagingStore::new(&config.staging_dir));
        Self::new(store, client, gate, config)
    }

    /// Shared handle on the list the UI renders.
    pub fn view(&self) -> ViewCache {
        self.view.clone()
    }

    pub async fn has_staged(&self) -> bool {
        self.current.lock().await.is_some()
    }

    pub async fn staged_len(&self) -> usize {
        self.current
            .lock()
            .await
            .as_ref()
            .map(|p| p.batch.len())
            .unwrap_or(0)
    }

    /// The confirmation-gate entry point: resolve the selection against the
    /// view, ask the user, and stage on approval with the configured TTL.
    ///
    /// Returns whether a batch was staged. An empty or unknown selection
    /// never reaches the gate.
    pub async fn request_delete(&self, ids: &[RecordId]) -> Result<bool> {
        let records = self.view.get_many(ids).await;
        if records.is_empty() {
            debug!("delete requested for empty or unknown selection");
            return Ok(false);
        }

        let message = format!(
            "Are you sure you want to delete {} records?",
            records.len()
        );
        if !self.gate.confirm(&message).await {
            return Ok(false);
        }

        self.stage(records, self.config.undo_ttl).await?;
        Ok(true)
    }

    /// Stage `records` for deletion, committing after `ttl` unless undone.
    ///
    /// An already-pending batch is committed (flushed) first; a new deletion
    /// never merges with or discards a prior one. Staging an empty set is a
    /// no-op and leaves any pending batch untouched.
    ///
    /// The store is written before the scheduler is armed, so an
    /// interruption between the two never produces a persisted batch without
    /// a recoverable timer.
    pub async fn stage(&self, records: Vec<Record>, ttl: Duration) -> Result<()> {
        if records.is_empty() {
            debug!("stage called with empty selection, nothing to do");
            return Ok(());
        }

        self.commit().await?;

        let generation = self.next_generation();
        let batch = StagedBatch::new(records, ttl);
        let ids = batch.ids();

        self.view.remove_by_ids(&ids).await;
        if let Err(err) = self.store.save(&batch).await {
            // The optimistic removal rolls back; nothing was armed yet.
            self.view.reinsert_all(&batch.records).await;
            return Err(err);
        }

        let message = format!("{} records deleted", batch.len());
        info!("staged {} records for deletion, ttl {:?}", batch.len(), ttl);
        {
            *self.current.lock().await = Some(PendingBatch {
                batch,
                generation,
                recovered: false,
            });
        }

        self.arm_commit(generation, ttl).await;
        self.gate
            .notify_undoable(&message, UndoHandle::new(self.clone(), generation))
            .await;
        Ok(())
    }

    /// Undo the pending batch: disarm the timer, clear the store, restore
    /// the records. No-op with nothing staged.
    pub async fn cancel(&self) -> Result<()> {
        let pending = self.current.lock().await.take();
        let Some(pending) = pending else {
            return Ok(());
        };
        self.scheduler.disarm().await;
        self.cancel_batch(pending).await
    }

    /// Commit the pending batch: one delete per record, in staging order.
    /// No-op with nothing staged.
    pub async fn commit(&self) -> Result<()> {
        let pending = self.current.lock().await.take();
        let Some(pending) = pending else {
            return Ok(());
        };
        self.scheduler.disarm().await;
        self.commit_batch(pending).await
    }

    /// Rebuild engine state from the staging store after a restart.
    ///
    /// An expired persisted batch commits immediately; a live one is
    /// re-armed for its remaining TTL and gets its undo affordance back.
    /// Malformed persisted state is cleared and treated as no pending batch;
    /// startup is never blocked on it.
    pub async fn recover_on_startup(&self) -> Result<()> {
        let batch = match self.store.load().await {
            Ok(Some(batch)) => batch,
            Ok(None) => return Ok(()),
            Err(err) => {
                warn!("discarding corrupt staged state: {}", err);
                self.clear_store().await;
                return Ok(());
            }
        };

        let generation = self.next_generation();
        let now = now_millis();

        if batch.is_expired(now) {
            info!("recovered expired batch of {} records, committing", batch.len());
            *self.current.lock().await = Some(PendingBatch {
                batch,
                generation,
                recovered: true,
            });
            return self.commit_generation(generation).await;
        }

        let remaining = batch.remaining_ttl(now);
        let message = format!("{} records deleted", batch.len());
        info!(
            "recovered staged batch of {} records, {:?} remaining",
            batch.len(),
            remaining
        );

        // The persisted batch is the source of truth; the rebuilt view may
        // still show the staged records.
        self.view.remove_by_ids(&batch.ids()).await;
        {
            *self.current.lock().await = Some(PendingBatch {
                batch,
                generation,
                recovered: true,
            });
        }

        self.arm_commit(generation, remaining).await;
        self.gate
            .notify_undoable(&message, UndoHandle::new(self.clone(), generation))
            .await;
        Ok(())
    }

    /// App-teardown contract: a still-staged batch is committed, never
    /// silently dropped. The undo affordance is inert afterwards.
    pub async fn shutdown(&self) -> Result<()> {
        self.commit().await
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn arm_commit(&self, generation: u64, delay: Duration) {
        let coordinator = self.clone();
        self.scheduler
            .arm(delay, async move {
                if let Err(err) = coordinator.commit_generation(generation).await {
                    warn!("scheduled commit failed: {}", err);
                }
            })
            .await;
    }

    /// Take the pending batch if `generation` still matches.
    async fn take_if_generation(&self, generation: u64) -> Option<PendingBatch> {
        let mut slot = self.current.lock().await;
        if slot.as_ref().is_some_and(|p| p.generation == generation) {
            slot.take()
        } else {
            None
        }
    }

    async fn commit_generation(&self, generation: u64) -> Result<()> {
        let Some(pending) = self.take_if_generation(generation).await else {
            return Ok(());
        };
        self.scheduler.disarm().await;
        self.commit_batch(pending).await
    }

    async fn cancel_generation(&self, generation: u64) -> Result<()> {
        let Some(pending) = self.take_if_generation(generation).await else {
            return Ok(());
        };
        self.scheduler.disarm().await;
        self.cancel_batch(pending).await
    }

    async fn commit_batch(&self, pending: PendingBatch) -> Result<()> {
        // A slot cleared externally mid-TTL means there is nothing left to
        // commit.
        if matches!(self.store.load().await, Ok(None)) {
            info!(
                "staging slot already cleared, skipping commit of {} records",
                pending.batch.len()
            );
            return Ok(());
        }

        let total = pending.batch.len();
        let mut failed = 0usize;
        for record in &pending.batch.records {
            if let Err(err) = self.client.delete_by_id(&record.id).await {
                warn!("delete failed for record {}: {}", record.id, err);
                failed += 1;
            }
        }

        self.clear_store().await;
        self.refresh_view().await;

        if failed > 0 {
            self.gate
                .notify(&format!("{} of {} deletions failed", failed, total))
                .await;
        }
        info!("committed staged batch: {} deleted, {} failed", total - failed, failed);
        Ok(())
    }

    async fn cancel_batch(&self, pending: PendingBatch) -> Result<()> {
        self.clear_store().await;

        if pending.recovered {
            // Full restoration: the view the records were removed from did
            // not survive the restart, so each record is re-created and the
            // backend assigns fresh ids.
            let total = pending.batch.len();
            let mut failed = 0usize;
            for record in &pending.batch.records {
                if let Err(err) = self.client.create(record).await {
                    warn!("restore failed for record {}: {}", record.id, err);
                    failed += 1;
                }
            }
            self.refresh_view().await;
            if failed > 0 {
                self.gate
                    .notify(&format!("{} of {} records could not be restored", failed, total))
                    .await;
            }
        } else {
            self.view.reinsert_all(&pending.batch.records).await;
        }

        info!("cancelled staged batch of {} records", pending.batch.len());
        Ok(())
    }

    /// Converge the view with the backend's true state.
    async fn refresh_view(&self) {
        match self.client.list().await {
            Ok(records) => self.view.replace_all(records).await,
            Err(err) => warn!("authoritative list refresh failed: {}", err),
        }
    }

    async fn clear_store(&self) {
        if let Err(err) = self.store.clear().await {
            warn!("failed to clear staging store: {}", err);
            self.gate
                .notify("Could not clear staged deletion state")
                .await;
        }
    }
}
