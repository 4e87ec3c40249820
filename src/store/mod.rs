// ============================================================================
// Persistent Staging Store
// ============================================================================
//
// A durable single-slot key-value store: at most one staged batch lives under
// the well-known staging key. Absence of the key is the canonical
// "no pending batch" state.
// ============================================================================

use crate::core::{Result, StagedBatch};
use async_trait::async_trait;

pub mod file;
pub mod memory;

pub use file::FileStagingStore;
pub use memory::MemoryStagingStore;

/// The well-known key the pending batch is stored under.
pub const STAGING_KEY: &str = "staged-batch";

/// Durable slot for the pending batch.
///
/// Implementations must make `save` visible before it returns: the
/// coordinator writes the store before arming the commit timer, so recovery
/// can always re-derive the timer from the persisted `expiresAt`.
#[async_trait]
pub trait StagingStore: Send + Sync {
    /// Write the batch to the slot, replacing any previous content.
    async fn save(&self, batch: &StagedBatch) -> Result<()>;

    /// Read the slot. `Ok(None)` means no pending batch; decode failures
    /// surface as `EngineError::CorruptState`.
    async fn load(&self) -> Result<Option<StagedBatch>>;

    /// Empty the slot. Clearing an already-empty slot is a no-op.
    async fn clear(&self) -> Result<()>;
}
