// ============================================================================
// Commit Scheduler
// ============================================================================
//
// A single-slot delayed callback, matching the at-most-one-batch invariant:
// arming replaces any previously armed callback, disarming stops a pending
// one. Disarm is a stop signal, never an abort: a callback already past its
// sleep runs to completion.
// ============================================================================

use std::future::Future;
use std::time::Duration;
use tokio::sync::{Mutex, oneshot};
use tokio::time::sleep;

pub struct CommitScheduler {
    slot: Mutex<Option<oneshot::Sender<()>>>,
}

impl Default for CommitScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitScheduler {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Arm the slot: run `on_fire` once `delay` elapses, unless disarmed
    /// first. Any previously armed callback is disarmed before the new one is
    /// installed.
    pub async fn arm<F>(&self, delay: Duration, on_fire: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.disarm().await;

        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            tokio::select! {
                _ = &mut stop_rx => {}
                _ = sleep(delay) => {
                    on_fire.await;
                }
            }
        });

        *self.slot.lock().await = Some(stop_tx);
    }

    /// Stop a pending callback. No effect if none is armed or the callback
    /// has already started running.
    pub async fn disarm(&self) {
        if let Some(stop_tx) = self.slot.lock().await.take() {
            let _ = stop_tx.send(());
        }
    }

    pub async fn is_armed(&self) -> bool {
        self.slot.lock().await.is_some()
    }
}
