pub mod batch;
pub mod error;
pub mod record;

pub use batch::{StagedBatch, now_millis};
pub use error::{EngineError, Result};
pub use record::{Record, RecordId};
