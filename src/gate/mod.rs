use crate::coordinator::UndoHandle;
use async_trait::async_trait;

/// The user-facing side of the engine: a confirmation prompt before staging
/// begins, and transient notifications afterwards.
///
/// `notify_undoable` carries the batch's [`UndoHandle`]; the gate invokes it
/// if and only if the user clicks the action. The handle is inert once the
/// batch resolves by any path, so a late click is a safe no-op.
#[async_trait]
pub trait ConfirmationGate: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;

    async fn notify(&self, message: &str);

    async fn notify_undoable(&self, message: &str, undo: UndoHandle);
}

/// Headless gate for non-interactive embeddings: answers `confirm` with a
/// fixed decision and routes notifications to the log.
pub struct AutoConfirmGate {
    decision: bool,
}

impl AutoConfirmGate {
    pub fn new(decision: bool) -> Self {
        Self { decision }
    }

    pub fn approving() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl ConfirmationGate for AutoConfirmGate {
    async fn confirm(&self, message: &str) -> bool {
        log::debug!("auto-answering '{}' with {}", message, self.decision);
        self.decision
    }

    async fn notify(&self, message: &str) {
        log::info!("{}", message);
    }

    async fn notify_undoable(&self, message: &str, _undo: UndoHandle) {
        // Headless: the undo action is dropped unused and the batch commits
        // when its TTL elapses.
        log::info!("{} (undo available)", message);
    }
}
