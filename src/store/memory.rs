use super::StagingStore;
use crate::core::{Result, StagedBatch};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-process staging store. Loses its slot on restart, so it only suits
/// tests and embeddings that do not need the recovery path.
#[derive(Default)]
pub struct MemoryStagingStore {
    slot: RwLock<Option<StagedBatch>>,
}

impl MemoryStagingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StagingStore for MemoryStagingStore {
    async fn save(&self, batch: &StagedBatch) -> Result<()> {
        *self.slot.write().await = Some(batch.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<StagedBatch>> {
        Ok(self.slot.read().await.clone())
    }

    async fn clear(&self) -> Result<()> {
        *self.slot.write().await = None;
        Ok(())
    }
}
