use crate::core::{Record, RecordId, Result};
use async_trait::async_trait;

pub mod http;

pub use http::HttpRecordClient;

/// The backend the engine commits against. Each call is independently
/// failable; the engine never retries, it reports.
#[async_trait]
pub trait RecordClient: Send + Sync {
    /// Issue the destructive delete for one record.
    async fn delete_by_id(&self, id: &RecordId) -> Result<()>;

    /// Re-create a record during restoration. The original id is not sent;
    /// the backend assigns a new one.
    async fn create(&self, record: &Record) -> Result<()>;

    /// Fetch the authoritative record list, used to converge the view after
    /// a commit or a recovery restoration.
    async fn list(&self) -> Result<Vec<Record>>;
}
