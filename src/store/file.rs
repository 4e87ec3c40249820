use super::{STAGING_KEY, StagingStore};
use crate::core::{EngineError, Result, StagedBatch};
use async_trait::async_trait;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File-backed staging store: one JSON document under
/// `<dir>/staged-batch.json`.
///
/// Writes go through a temp file in the same directory followed by a rename,
/// so a crash mid-write never leaves a half-written slot behind.
pub struct FileStagingStore {
    path: PathBuf,
}

impl FileStagingStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", STAGING_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StagingStore for FileStagingStore {
    async fn save(&self, batch: &StagedBatch) -> Result<()> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| EngineError::Store("staging path has no parent directory".into()))?;
        fs::create_dir_all(dir)
            .map_err(|e| EngineError::Io(format!("Failed to create staging directory: {}", e)))?;

        let serialized = serde_json::to_string(batch)
            .map_err(|e| EngineError::Serialization(format!("Failed to serialize batch: {}", e)))?;

        let mut temp_file = NamedTempFile::new_in(dir)
            .map_err(|e| EngineError::Io(format!("Failed to create temp file: {}", e)))?;
        temp_file
            .write_all(serialized.as_bytes())
            .map_err(|e| EngineError::Io(format!("Failed to write staged batch: {}", e)))?;
        temp_file
            .as_file()
            .sync_all()
            .map_err(|e| EngineError::Io(format!("Failed to sync staged batch: {}", e)))?;
        temp_file
            .persist(&self.path)
            .map_err(|e| EngineError::Io(format!("Failed to persist staged batch: {}", e)))?;
        Ok(())
    }

    async fn load(&self) -> Result<Option<StagedBatch>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)
            .map_err(|e| EngineError::Io(format!("Failed to read staged batch: {}", e)))?;
        let batch: StagedBatch = serde_json::from_str(&data)
            .map_err(|e| EngineError::CorruptState(format!("Failed to decode staged batch: {}", e)))?;
        Ok(Some(batch))
    }

    async fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .map_err(|e| EngineError::Io(format!("Failed to clear staged batch: {}", e)))?;
        }
        Ok(())
    }
}
