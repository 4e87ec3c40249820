use std::path::PathBuf;
use std::time::Duration;

/// Default undo window: 5 seconds, the lifetime of the undo toast.
pub const DEFAULT_UNDO_TTL_MS: u64 = 5_000;

/// Staging engine configuration
#[derive(Debug, Clone)]
pub struct StagingConfig {
    /// How long a staged batch stays cancellable before it commits.
    pub undo_ttl: Duration,

    /// Directory the file-backed staging store keeps its slot in.
    pub staging_dir: PathBuf,
}

impl StagingConfig {
    pub fn new() -> Self {
        Self {
            undo_ttl: Duration::from_millis(DEFAULT_UNDO_TTL_MS),
            staging_dir: PathBuf::from(".stagebin"),
        }
    }

    /// Set the undo window
    pub fn undo_ttl(mut self, ttl: Duration) -> Self {
        self.undo_ttl = ttl;
        self
    }

    /// Set the staging store directory
    pub fn staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self::new()
    }
}
