//! Remote backend adapter.
//!
//! Wraps a blocking [`RemoteVectorClient`] in the uniform
//! [`VectorBackend`] contract. Input validation happens here, before
//! any network round trip; every vendor call runs on the offload pool;
//! every vendor error is converted into `VectorStoreError` at this
//! boundary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use vector_backend::{BackendStats, VectorBackend};
use vector_types::{
    FilterExpression, OffloadSettings, QueryMatch, VectorRecord, VectorStoreError,
};

use crate::client::RemoteVectorClient;
use crate::offload::OffloadPool;

/// `VectorBackend` over a remote ANN service.
pub struct RemoteBackend {
    client: Arc<dyn RemoteVectorClient>,
    pool: OffloadPool,
    name: String,
    dimension: usize,
    /// Cleared when a call fails with unavailability, set again on the
    /// next success; purely informational (stats)
    available: AtomicBool,
}

impl RemoteBackend {
    /// Connect to the remote service and verify it answers.
    ///
    /// The probe is a `count` on the default namespace; a service that
    /// cannot answer it fails construction with `BackendUnavailable`,
    /// matching the fail-fast-at-startup policy for backend selection.
    pub async fn connect(
        client: Arc<dyn RemoteVectorClient>,
        dimension: usize,
        offload: &OffloadSettings,
    ) -> Result<Self, VectorStoreError> {
        let pool = OffloadPool::new(offload);
        let name = client.backend_name().to_string();

        let probe = client.clone();
        pool.run("connect", move || {
            probe.count(vector_types::DEFAULT_NAMESPACE)
        })
        .await?;

        info!(backend = %name, dimension, "Connected to remote vector backend");
        Ok(Self {
            client,
            pool,
            name,
            dimension,
            available: AtomicBool::new(true),
        })
    }

    fn note_outcome<T>(&self, result: Result<T, VectorStoreError>) -> Result<T, VectorStoreError> {
        match &result {
            Ok(_) => self.available.store(true, Ordering::Relaxed),
            Err(e) if e.is_degraded_result() => self.available.store(false, Ordering::Relaxed),
            Err(_) => {}
        }
        result
    }
}

#[async_trait]
impl VectorBackend for RemoteBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn upsert(&self, record: VectorRecord) -> Result<bool, VectorStoreError> {
        if record.vector.is_empty() {
            warn!(id = %record.id, "Rejected upsert: empty vector");
            return Ok(false);
        }
        if record.dimension() != self.dimension {
            warn!(
                id = %record.id,
                expected = self.dimension,
                actual = record.dimension(),
                "Rejected upsert: dimension mismatch"
            );
            return Ok(false);
        }

        let client = self.client.clone();
        let result = self
            .pool
            .run("upsert", move || client.upsert(&record).map(|_| true))
            .await;
        self.note_outcome(result)
    }

    async fn query(
        &self,
        namespace: &str,
        vector: &[f32],
        k: usize,
        filter: Option<&FilterExpression>,
    ) -> Result<Vec<QueryMatch>, VectorStoreError> {
        if vector.is_empty() {
            return Err(VectorStoreError::Validation(
                "query vector must not be empty".into(),
            ));
        }
        if vector.len() != self.dimension {
            return Err(VectorStoreError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }

        let client = self.client.clone();
        let namespace = namespace.to_string();
        let vector = vector.to_vec();
        let filter = filter.cloned();

        let result = self
            .pool
            .run("query", move || {
                client.query(&namespace, &vector, k, filter.as_ref())
            })
            .await
            .map(|mut matches| {
                // The vendor owns ranking; we only enforce the length bound
                matches.truncate(k);
                matches
            });
        self.note_outcome(result)
    }

    async fn get(
        &self,
        namespace: &str,
        id: &str,
    ) -> Result<Option<VectorRecord>, VectorStoreError> {
        let client = self.client.clone();
        let namespace = namespace.to_string();
        let id = id.to_string();
        let result = self
            .pool
            .run("get", move || client.fetch(&namespace, &id))
            .await;
        self.note_outcome(result)
    }

    async fn delete(&self, namespace: &str, id: &str) -> Result<bool, VectorStoreError> {
        let client = self.client.clone();
        let namespace = namespace.to_string();
        let id = id.to_string();
        let result = self
            .pool
            .run("delete", move || client.delete(&namespace, &id))
            .await;
        self.note_outcome(result)
    }

    async fn clear(&self, namespace: &str) -> Result<(), VectorStoreError> {
        let client = self.client.clone();
        let namespace = namespace.to_string();
        let result = self
            .pool
            .run("clear", move || client.clear(&namespace))
            .await;
        self.note_outcome(result)
    }

    async fn count(&self, namespace: &str) -> Result<usize, VectorStoreError> {
        let client = self.client.clone();
        let namespace = namespace.to_string();
        let result = self
            .pool
            .run("count", move || client.count(&namespace))
            .await;
        self.note_outcome(result)
    }

    fn stats(&self) -> BackendStats {
        BackendStats {
            // Record counts live on the remote service; use count()
            record_count: 0,
            dimension: Some(self.dimension),
            unsupported_filter_skips: 0,
            available: self.available.load(Ordering::Relaxed),
        }
    }
}
