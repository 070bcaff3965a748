/// Record store
///
/// Coordinates validation, key derivation, serialization, and the single
/// object-store write each request performs.
use crate::{
    error::{RecordsError, RecordsResult},
    metrics,
    object_store::{ObjectStore, PutOptions},
    record_store::{keys, RecordRequest, WriteReceipt},
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Main record store
#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn ObjectStore>,
}

impl RecordStore {
    /// Create a new record store over an object storage backend
    pub fn new(backend: Arc<dyn ObjectStore>) -> Self {
        Self { backend }
    }

    /// Validate and persist a record, returning its generated id and the
    /// public URL of the stored JSON.
    pub async fn write(&self, request: RecordRequest) -> RecordsResult<WriteReceipt> {
        self.write_at(request, Utc::now()).await
    }

    /// `write` with the request instant fixed by the caller. Key derivation
    /// and the generated id both use this instant, so two calls with the
    /// same partition value and the same instant target the same key and
    /// the later write wins at the store.
    pub async fn write_at(
        &self,
        request: RecordRequest,
        now: DateTime<Utc>,
    ) -> RecordsResult<WriteReceipt> {
        let kind = request.kind();

        if let Err(e) = request.validate() {
            metrics::record_write_failure(kind.as_str(), "validation");
            return Err(e);
        }

        let record_id = keys::generated_id(kind, now);
        let key = request.storage_key(now);
        let payload = request.into_payload(&record_id, now);

        let body = serde_json::to_string_pretty(&payload)
            .map_err(|e| RecordsError::Internal(format!("Failed to serialize record: {}", e)))?;

        let stored = self
            .backend
            .put(
                &key,
                body,
                PutOptions {
                    public_read: true,
                    exact_key: true,
                },
            )
            .await
            .map_err(|e| {
                metrics::record_write_failure(kind.as_str(), "storage");
                e
            })?;

        metrics::record_write(kind.as_str());
        tracing::info!(
            kind = kind.as_str(),
            key = %key,
            record_id = %record_id,
            "record persisted"
        );

        Ok(WriteReceipt {
            id: record_id,
            url: stored.url,
            key,
        })
    }
}
