// ============================================================================
// Stagebin Library
// ============================================================================
//
// A staged (deferred) bulk-delete engine: deleting records optimistically
// removes them from the rendered list, stages the deletion with a TTL, and
// persists it so it survives a restart. The destructive backend calls are
// only issued once the TTL expires, unless the user undoes first.
// ============================================================================

pub mod client;
pub mod config;
pub mod coordinator;
pub mod core;
pub mod gate;
pub mod scheduler;
pub mod store;
pub mod view;

// Re-export main types for convenience
pub use crate::config::{DEFAULT_UNDO_TTL_MS, StagingConfig};
pub use crate::coordinator::{StagingCoordinator, UndoHandle};
pub use crate::core::{EngineError, Record, RecordId, Result, StagedBatch};

// Re-export the collaborator seams
pub use crate::client::{HttpRecordClient, RecordClient};
pub use crate::gate::{AutoConfirmGate, ConfirmationGate};
pub use crate::scheduler::CommitScheduler;
pub use crate::store::{FileStagingStore, MemoryStagingStore, STAGING_KEY, StagingStore};
pub use crate::view::ViewCache;
