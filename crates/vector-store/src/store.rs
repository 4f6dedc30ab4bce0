//! The vector store facade.
//!
//! One uniform surface for every caller: agent hooks, memory tools,
//! tests. Delegates to the backend chosen at build time, applies the
//! default namespace, and downgrades transient backend failures into
//! degraded results so callers never crash because a remote vector
//! service is briefly down.

use std::sync::Arc;

use tracing::warn;

use vector_backend::{BackendStats, VectorBackend};
use vector_types::{
    FilterExpression, Metadata, QueryResponse, VectorRecord, VectorStoreError,
};

use crate::registry::VectorStoreBuilder;

/// Handle to the active vector backend.
///
/// Cheap to clone; clones share the backend and may use different
/// default namespaces via [`VectorStore::in_namespace`]. Safe for
/// concurrent callers: the in-memory backend serializes mutation behind
/// its single lock, remote backends delegate to the vendor service.
#[derive(Clone)]
pub struct VectorStore {
    backend: Arc<dyn VectorBackend>,
    namespace: String,
}

impl VectorStore {
    /// Start building a store from settings.
    pub fn builder(settings: vector_types::VectorStoreSettings) -> VectorStoreBuilder {
        VectorStoreBuilder::new(settings)
    }

    pub(crate) fn new(backend: Arc<dyn VectorBackend>, namespace: String) -> Self {
        Self { backend, namespace }
    }

    /// Name of the active backend.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// The namespace applied to this handle's operations.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// A handle over the same backend bound to a different namespace.
    pub fn in_namespace(&self, namespace: impl Into<String>) -> Self {
        Self {
            backend: self.backend.clone(),
            namespace: namespace.into(),
        }
    }

    /// Store or overwrite a vector.
    ///
    /// Returns `Ok(false)` when the input fails validation or the
    /// backend is unreachable; the record is not stored in either case.
    pub async fn upsert(
        &self,
        id: impl Into<String>,
        vector: Vec<f32>,
        metadata: Option<Metadata>,
    ) -> Result<bool, VectorStoreError> {
        let record = VectorRecord::new(id, vector)
            .with_metadata(metadata.unwrap_or_default())
            .with_namespace(&self.namespace);

        match self.backend.upsert(record).await {
            Ok(stored) => Ok(stored),
            Err(e) if e.is_degraded_result() => {
                warn!(backend = %self.backend.name(), error = %e, "Upsert degraded to false");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// The k nearest stored vectors, best first, restricted to records
    /// matching `filter`.
    ///
    /// When the backend is unreachable the response carries an empty
    /// match list with [`QueryStatus::Degraded`] instead of an error;
    /// validation failures (wrong dimension, empty vector) propagate.
    ///
    /// [`QueryStatus::Degraded`]: vector_types::QueryStatus::Degraded
    pub async fn query(
        &self,
        vector: &[f32],
        k: usize,
        filter: Option<&FilterExpression>,
    ) -> Result<QueryResponse, VectorStoreError> {
        match self.backend.query(&self.namespace, vector, k, filter).await {
            Ok(matches) => Ok(QueryResponse::ok(matches)),
            Err(e) if e.is_degraded_result() => {
                warn!(backend = %self.backend.name(), error = %e, "Query degraded to empty");
                Ok(QueryResponse::degraded(e.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch a record by id. A miss is `Ok(None)`.
    pub async fn get(&self, id: &str) -> Result<Option<VectorRecord>, VectorStoreError> {
        self.backend.get(&self.namespace, id).await
    }

    /// Delete a record by id; `Ok(true)` if it existed.
    ///
    /// An unreachable backend degrades to `Ok(false)`.
    pub async fn delete(&self, id: &str) -> Result<bool, VectorStoreError> {
        match self.backend.delete(&self.namespace, id).await {
            Ok(removed) => Ok(removed),
            Err(e) if e.is_degraded_result() => {
                warn!(backend = %self.backend.name(), error = %e, "Delete degraded to false");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Remove every record in this handle's namespace.
    ///
    /// Destructive, so unavailability propagates as an error rather
    /// than silently reporting success.
    pub async fn clear(&self) -> Result<(), VectorStoreError> {
        self.backend.clear(&self.namespace).await
    }

    /// Number of records in this handle's namespace.
    pub async fn count(&self) -> Result<usize, VectorStoreError> {
        self.backend.count(&self.namespace).await
    }

    /// Statistics from the active backend.
    pub fn stats(&self) -> BackendStats {
        self.backend.stats()
    }
}
