use super::RecordClient;
use crate::core::{EngineError, Record, RecordId, Result};
use async_trait::async_trait;

/// HTTP record client against a conventional REST resource:
/// `GET /api/v1/<resource>`, `POST /api/v1/<resource>`,
/// `DELETE /api/v1/<resource>/<id>`.
pub struct HttpRecordClient {
    http: reqwest::Client,
    base_url: String,
    resource: String,
}

impl HttpRecordClient {
    pub fn new(base_url: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            resource: resource.into(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/api/v1/{}", self.base_url, self.resource)
    }

    fn record_url(&self, id: &RecordId) -> String {
        format!("{}/{}", self.collection_url(), id)
    }
}

#[async_trait]
impl RecordClient for HttpRecordClient {
    async fn delete_by_id(&self, id: &RecordId) -> Result<()> {
        self.http
            .delete(self.record_url(id))
            .send()
            .await
            .map_err(|e| EngineError::Client(format!("Failed to delete record {}: {}", id, e)))?
            .error_for_status()
            .map_err(|e| EngineError::Client(format!("Delete rejected for record {}: {}", id, e)))?;
        Ok(())
    }

    async fn create(&self, record: &Record) -> Result<()> {
        self.http
            .post(self.collection_url())
            .json(&record.fields_without_id())
            .send()
            .await
            .map_err(|e| EngineError::Client(format!("Failed to create record: {}", e)))?
            .error_for_status()
            .map_err(|e| EngineError::Client(format!("Create rejected: {}", e)))?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Record>> {
        let records = self
            .http
            .get(self.collection_url())
            .send()
            .await
            .map_err(|e| EngineError::Client(format!("Failed to fetch records: {}", e)))?
            .error_for_status()
            .map_err(|e| EngineError::Client(format!("List rejected: {}", e)))?
            .json::<Vec<Record>>()
            .await
            .map_err(|e| EngineError::Client(format!("Failed to decode record list: {}", e)))?;
        Ok(records)
    }
}
